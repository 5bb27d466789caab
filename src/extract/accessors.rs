//! Total accessors over the canonical document value.
//!
//! A missing field is never an error: it reads as `Null`, which in turn reads as
//! an empty sequence, an empty string or zero.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::model::{LocalizedEntry, LocalizedText};

static NULL: Value = Value::Null;

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?")
        .expect("numeric prefix pattern is valid")
});

pub fn field<'a>(value: &'a Value, key: &str) -> &'a Value {
    value.get(key).unwrap_or(&NULL)
}

pub fn path<'a>(value: &'a Value, keys: &[&str]) -> &'a Value {
    keys.iter().fold(value, |current, key| field(current, key))
}

pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

pub fn ensure_array(value: &Value) -> Vec<&Value> {
    match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

pub fn ensure_number(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64().unwrap_or(0.0),
        Value::String(text) => parse_number_prefix(text),
        Value::Object(_) => parse_number_prefix(&text_value(value)),
        Value::Null | Value::Bool(_) | Value::Array(_) => 0.0,
    };
    if parsed.is_finite() { parsed } else { 0.0 }
}

fn parse_number_prefix(text: &str) -> f64 {
    NUMERIC_PREFIX
        .find(text)
        .and_then(|found| found.as_str().trim_start().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Exact decimal reading of a numeric field, with the same prefix rules as [`ensure_number`].
pub fn ensure_decimal(value: &Value) -> Decimal {
    let text = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Object(_) => text_value(value),
        Value::Null | Value::Bool(_) | Value::Array(_) => return Decimal::ZERO,
    };
    parse_decimal_prefix(&text).unwrap_or(Decimal::ZERO)
}

fn parse_decimal_prefix(text: &str) -> Option<Decimal> {
    let found = NUMERIC_PREFIX.find(text)?.as_str().trim_start();
    let (negative, unsigned) = match found.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, found.trim_start_matches('+')),
    };
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(at) => (&unsigned[..at], Some(&unsigned[at + 1..])),
        None => (unsigned, None),
    };
    let mantissa = mantissa.trim_end_matches('.');
    let mantissa = match mantissa.strip_prefix('.') {
        Some(fraction) => format!("0.{fraction}"),
        None => mantissa.to_string(),
    };

    let decimal = match exponent {
        Some(exponent) => Decimal::from_scientific(&format!("{mantissa}e{exponent}")).ok()?,
        None => Decimal::from_str_exact(&mantissa).ok()?,
    };
    Some(if negative { -decimal } else { decimal })
}

/// Scalar text of a node. Markup elements carrying attributes keep their text under `_`.
pub fn text_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Object(map) => map.get("_").map(text_value).unwrap_or_default(),
        Value::Null | Value::Array(_) => String::new(),
    }
}

pub fn localized_entries(value: &Value) -> LocalizedText {
    if is_blank(value) {
        return LocalizedText::default();
    }

    let node = match value.get("LocalisedText") {
        Some(inner) if !is_blank(inner) => inner,
        _ => value,
    };

    match node {
        Value::Array(items) => LocalizedText {
            entries: items.iter().map(localized_entry).collect(),
        },
        Value::Object(_) => LocalizedText {
            entries: vec![localized_entry(node)],
        },
        other => LocalizedText::single(text_value(other)),
    }
}

fn localized_entry(value: &Value) -> LocalizedEntry {
    let language = text_value(field(value, "Language"));
    LocalizedEntry {
        language: (!language.is_empty()).then_some(language),
        text: match value.get("Text") {
            Some(text) => text_value(text),
            None => text_value(value),
        },
    }
}

pub fn localized_text(value: &Value, language: &str) -> String {
    localized_entries(value).resolve(language)
}
