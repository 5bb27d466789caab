use serde::{Deserialize, Serialize};
use tracing::debug;

use super::layers::{LayerProperty, LayerRegistry};
use super::view::{ExtractView, SectionKind};
use crate::model::theme_id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionPhase {
    NoSection,
    Section,
    Theme,
    Legend,
}

/// Expand/collapse state of a rendered extract. Owned by the presentation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpansionState {
    pub section: Option<SectionKind>,
    pub theme: Option<String>,
    pub legend: Option<String>,
}

pub fn full_legend_id(theme_id: &str, subtheme: &str) -> String {
    format!("{theme_id}_{subtheme}")
}

pub fn remove_highlight_layers<R: LayerRegistry + ?Sized>(registry: &mut R) -> usize {
    let highlighted: Vec<String> = registry
        .layers()
        .into_iter()
        .filter(|layer| layer.highlight)
        .map(|layer| layer.id)
        .collect();
    for id in &highlighted {
        registry.remove_layer(id);
    }
    highlighted.len()
}

impl ExpansionState {
    pub fn phase(&self) -> ExpansionPhase {
        match (&self.section, &self.theme, &self.legend) {
            (None, _, _) => ExpansionPhase::NoSection,
            (Some(_), None, _) => ExpansionPhase::Section,
            (Some(_), Some(_), None) => ExpansionPhase::Theme,
            (Some(_), Some(_), Some(_)) => ExpansionPhase::Legend,
        }
    }

    pub fn toggle_section<R: LayerRegistry + ?Sized>(
        &mut self,
        kind: SectionKind,
        registry: &mut R,
    ) {
        self.section = if self.section == Some(kind) {
            None
        } else {
            Some(kind)
        };
        self.theme = None;
        self.legend = None;
        remove_highlight_layers(registry);
    }

    /// Returns the number of overlay layers added.
    pub fn toggle_theme<R: LayerRegistry + ?Sized>(
        &mut self,
        view: &ExtractView<'_>,
        code: &str,
        subcode: &str,
        registry: &mut R,
    ) -> usize {
        let id = theme_id(code, subcode);
        self.theme = if self.theme.as_deref() == Some(id.as_str()) {
            None
        } else {
            Some(id.clone())
        };
        self.legend = None;

        let removed = remove_highlight_layers(registry);
        if self.theme.is_none() {
            debug!(theme = %id, removed, "theme collapsed");
            return 0;
        }

        let layers = view.theme_layers(code, subcode);
        let added = layers.len();
        for layer in layers {
            registry.add_layer(layer);
        }
        debug!(theme = %id, removed, added, "theme expanded");
        added
    }

    pub fn toggle_full_legend(&mut self, legend_id: &str) {
        self.legend = if self.legend.as_deref() == Some(legend_id) {
            None
        } else {
            Some(legend_id.to_string())
        };
    }

    pub fn is_legend_expanded(&self, subtheme: &str) -> bool {
        match (&self.theme, &self.legend) {
            (Some(theme), Some(legend)) => *legend == full_legend_id(theme, subtheme),
            _ => false,
        }
    }

    /// Flips visibility of the layer tagged with `subtheme` while a theme is expanded.
    pub fn toggle_subtheme_layer<R: LayerRegistry + ?Sized>(
        &self,
        subtheme: &str,
        registry: &mut R,
    ) -> Option<bool> {
        self.theme.as_ref()?;
        let layer = registry
            .layers()
            .into_iter()
            .find(|layer| layer.subtheme == subtheme)?;
        let visible = !layer.visible;
        registry.set_layer_property(&layer.id, LayerProperty::Visibility(visible));
        Some(visible)
    }

    pub fn close<R: LayerRegistry + ?Sized>(&mut self, registry: &mut R) {
        *self = Self::default();
        remove_highlight_layers(registry);
    }
}
