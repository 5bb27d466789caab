use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LANGUAGE: &str = "de";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractConfig {
    /// Subtheme priority per theme code.
    pub subthemes: BTreeMap<String, Vec<String>>,
    pub responsible_office_from_restriction: bool,
    pub hide_logo: bool,
    pub language: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            subthemes: BTreeMap::new(),
            responsible_office_from_restriction: false,
            hide_logo: false,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl ExtractConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_slice(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))
    }
}
