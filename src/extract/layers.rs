use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use super::error::{ExtractError, Result};
use super::themes::ThemeEntries;
use crate::model::Theme;

pub const HIGHLIGHT_LAYER_PREFIX: &str = "oereb-highlight";
pub const OPAQUE: u8 = 255;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceReference {
    pub base_url: String,
    pub version: Option<String>,
    pub format: Option<String>,
    pub bbox: Option<String>,
    pub layers: Option<String>,
}

pub fn parse_service_reference(raw: &str) -> Result<ServiceReference> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ExtractError::MalformedServiceReference {
            url: String::new(),
            message: "empty url".to_string(),
        });
    }

    let mut url = Url::parse(raw).map_err(|err| ExtractError::MalformedServiceReference {
        url: raw.to_string(),
        message: err.to_string(),
    })?;

    let mut reference = ServiceReference::default();
    for (key, value) in url.query_pairs() {
        let slot = match key.to_ascii_uppercase().as_str() {
            "VERSION" => &mut reference.version,
            "FORMAT" => &mut reference.format,
            "BBOX" => &mut reference.bbox,
            "LAYERS" => &mut reference.layers,
            _ => continue,
        };
        *slot = Some(value.into_owned());
    }

    url.set_query(None);
    url.set_fragment(None);
    reference.base_url = url.to_string();
    Ok(reference)
}

pub fn opacity_from_fraction(fraction: Option<f64>) -> u8 {
    match fraction {
        Some(value) if (0.0..=1.0).contains(&value) => (value * f64::from(OPAQUE)).round() as u8,
        _ => OPAQUE,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayLayerDescriptor {
    pub id: String,
    pub name: String,
    pub title: String,
    pub kind: String,
    pub url: String,
    pub legend_url: String,
    pub feature_info_url: String,
    pub version: Option<String>,
    pub format: Option<String>,
    pub bbox: Option<String>,
    pub layers: Option<String>,
    pub opacity: u8,
    pub queryable: bool,
    pub visible: bool,
    pub highlight: bool,
    pub subtheme: String,
}

impl OverlayLayerDescriptor {
    fn from_reference(
        theme: &Theme,
        subtheme: &str,
        reference: ServiceReference,
        opacity: u8,
    ) -> Self {
        let name = theme.id();
        Self {
            id: format!("{HIGHLIGHT_LAYER_PREFIX}:{name}:{subtheme}"),
            name,
            title: theme.text.clone(),
            kind: "wms".to_string(),
            url: reference.base_url.clone(),
            legend_url: reference.base_url.clone(),
            feature_info_url: reference.base_url,
            version: reference.version,
            format: reference.format,
            bbox: reference.bbox,
            layers: reference.layers,
            opacity,
            queryable: false,
            visible: true,
            highlight: true,
            subtheme: subtheme.to_string(),
        }
    }
}

/// Layers for the activated `theme`, whose entries may have matched by subtheme label only.
pub fn synthesize_layers(
    theme: &Theme,
    resolved: &ThemeEntries<'_>,
) -> Vec<OverlayLayerDescriptor> {
    let mut seen_subthemes: HashSet<&str> = HashSet::new();
    let mut descriptors = Vec::new();

    for entry in &resolved.entries {
        let Some(map) = entry.map.as_ref() else {
            continue;
        };
        if seen_subthemes.contains(entry.subtheme.as_str()) {
            continue;
        }

        let reference = match parse_service_reference(&map.reference_wms) {
            Ok(reference) => reference,
            Err(err) => {
                debug!(theme = %theme.id(), error = %err, "skipping service reference");
                continue;
            }
        };

        let opacity = opacity_from_fraction(map.layer_opacity);
        descriptors.push(OverlayLayerDescriptor::from_reference(
            theme,
            &entry.subtheme,
            reference,
            opacity,
        ));
        seen_subthemes.insert(entry.subtheme.as_str());
    }

    descriptors
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerProperty {
    Visibility(bool),
}

/// Host map layer registry.
pub trait LayerRegistry {
    fn add_layer(&mut self, layer: OverlayLayerDescriptor);

    /// Removing an unknown layer is a no-op.
    fn remove_layer(&mut self, id: &str);

    fn set_layer_property(&mut self, id: &str, property: LayerProperty);

    fn layers(&self) -> Vec<OverlayLayerDescriptor>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLayerRegistry {
    layers: Vec<OverlayLayerDescriptor>,
}

impl LayerRegistry for InMemoryLayerRegistry {
    fn add_layer(&mut self, layer: OverlayLayerDescriptor) {
        match self.layers.iter_mut().find(|existing| existing.id == layer.id) {
            Some(existing) => *existing = layer,
            None => self.layers.push(layer),
        }
    }

    fn remove_layer(&mut self, id: &str) {
        self.layers.retain(|layer| layer.id != id);
    }

    fn set_layer_property(&mut self, id: &str, property: LayerProperty) {
        let Some(layer) = self.layers.iter_mut().find(|layer| layer.id == id) else {
            return;
        };
        match property {
            LayerProperty::Visibility(visible) => layer.visible = visible,
        }
    }

    fn layers(&self) -> Vec<OverlayLayerDescriptor> {
        self.layers.clone()
    }
}
