use percent_encoding::percent_decode_str;
use serde_json::map::Entry;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::{ExtractError, Result};
use crate::model::DocumentEncoding;

pub const RESPONSE_ROOT: &str = "GetExtractByIdResponse";

const ATTRIBUTE_KEY: &str = "$";
const TEXT_KEY: &str = "_";

#[derive(Debug, Clone, PartialEq)]
pub enum SourceDocument {
    Structured(Value),
    Markup(String),
}

impl SourceDocument {
    pub fn detect(raw: &str) -> Result<Self> {
        let body = raw.trim_start_matches('\u{feff}').trim_start();
        if body.starts_with('{') {
            let value = serde_json::from_str(body)
                .map_err(|err| ExtractError::parse(format!("invalid JSON document: {err}")))?;
            return Ok(Self::Structured(value));
        }
        Ok(Self::Markup(body.to_string()))
    }

    pub fn encoding(&self) -> DocumentEncoding {
        match self {
            Self::Structured(_) => DocumentEncoding::Json,
            Self::Markup(_) => DocumentEncoding::Xml,
        }
    }
}

pub fn normalize(source: SourceDocument) -> Result<Value> {
    match source {
        SourceDocument::Structured(value) => Ok(value),
        SourceDocument::Markup(text) => {
            let mut value = markup_to_value(&text)?;
            bridge_extract_casing(&mut value);
            Ok(value)
        }
    }
}

fn markup_to_value(text: &str) -> Result<Value> {
    let document = roxmltree::Document::parse(text)
        .map_err(|err| ExtractError::parse(format!("invalid XML document: {err}")))?;
    let root = document.root_element();

    let mut object = Map::new();
    object.insert(root.tag_name().name().to_string(), element_value(root)?);
    Ok(Value::Object(object))
}

fn element_value(node: roxmltree::Node<'_, '_>) -> Result<Value> {
    let mut object = Map::new();
    let mut text = String::new();

    let attributes: Map<String, Value> = node
        .attributes()
        .map(|attribute| {
            (
                attribute.name().to_string(),
                Value::String(attribute.value().to_string()),
            )
        })
        .collect();
    if !attributes.is_empty() {
        object.insert(ATTRIBUTE_KEY.to_string(), Value::Object(attributes));
    }

    for child in node.children() {
        if child.is_element() {
            let name = child.tag_name().name().to_string();
            append_child(&mut object, name, element_value(child)?);
        } else if child.is_text() {
            text.push_str(child.text().unwrap_or_default());
        }
    }

    if text.trim().is_empty() {
        if object.is_empty() {
            return Ok(Value::String(String::new()));
        }
        return Ok(Value::Object(object));
    }

    let decoded = decode_text(&text)?;
    if object.is_empty() {
        return Ok(Value::String(decoded));
    }
    object.insert(TEXT_KEY.to_string(), Value::String(decoded));
    Ok(Value::Object(object))
}

fn append_child(object: &mut Map<String, Value>, name: String, value: Value) {
    match object.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::Array(items) => items.push(value),
            existing => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        },
    }
}

fn decode_text(text: &str) -> Result<String> {
    percent_decode_str(text)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|err| ExtractError::parse(format!("text value is not valid UTF-8: {err}")))
}

/// Markup extracts name the node `Extract`; consumers read `extract`.
fn bridge_extract_casing(value: &mut Value) {
    let Some(Value::Object(response)) = value.get_mut(RESPONSE_ROOT) else {
        return;
    };
    if response.contains_key("extract") {
        return;
    }
    if let Some(extract) = response.get("Extract").cloned() {
        debug!("copied Extract node onto extract");
        response.insert("extract".to_string(), extract);
    }
}
