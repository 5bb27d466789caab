use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::extract::ViewModel;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedEntry {
    pub language: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText {
    pub entries: Vec<LocalizedEntry>,
}

impl LocalizedText {
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            entries: vec![LocalizedEntry {
                language: None,
                text: text.into(),
            }],
        }
    }

    pub fn resolve(&self, language: &str) -> String {
        self.entries
            .iter()
            .find(|entry| entry.language.as_deref() == Some(language))
            .or_else(|| self.entries.first())
            .map(|entry| entry.text.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Theme {
    pub code: String,
    pub subcode: String,
    pub text: String,
}

impl Theme {
    pub fn id(&self) -> String {
        theme_id(&self.code, &self.subcode)
    }

    pub fn matches(&self, code: &str, subcode: &str) -> bool {
        self.code == code && self.subcode == subcode
    }
}

pub fn theme_id(code: &str, subcode: &str) -> String {
    format!("{code}:{subcode}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponsibleOffice {
    pub name: String,
    pub office_at_web: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CadastreAuthority {
    pub name: String,
    pub street: String,
    pub number: String,
    pub postal_code: String,
    pub city: String,
    pub office_at_web: String,
}

impl CadastreAuthority {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
            && self.street.is_empty()
            && self.number.is_empty()
            && self.postal_code.is_empty()
            && self.city.is_empty()
            && self.office_at_web.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoEntry {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProvisionKind {
    Regulation,
    Statute,
    Hint,
    /// No declared type, as in v1 extracts.
    Undeclared,
    Other(String),
}

impl ProvisionKind {
    pub fn from_code(code: &str) -> Self {
        match code {
            "LegalProvision" => Self::Regulation,
            "Law" => Self::Statute,
            "Hint" => Self::Hint,
            "" => Self::Undeclared,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalReference {
    pub title: String,
    pub abbreviation: String,
    pub official_number: String,
    pub text_at_web: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalProvision {
    pub kind: ProvisionKind,
    pub title: String,
    pub official_number: String,
    pub abbreviation: String,
    pub text_at_web: String,
    pub index: i64,
    pub responsible_office: ResponsibleOffice,
    pub references: Vec<LegalReference>,
}

/// Measured shares of one restriction entry. Zero means the document did not state it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shares {
    pub nr_of_points: Decimal,
    pub length_share: Decimal,
    pub area_share: Decimal,
    pub part_in_percent: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapReference {
    pub reference_wms: String,
    pub legend_at_web: String,
    pub layer_opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestrictionEntry {
    pub theme: Theme,
    pub subtheme: String,
    pub law_status: String,
    pub legend_text: String,
    pub symbol_ref: String,
    pub shares: Shares,
    pub map: Option<MapReference>,
    pub responsible_office: ResponsibleOffice,
    pub provisions: Vec<LegalProvision>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extract {
    pub cantonal_logo_ref: String,
    pub authority: CadastreAuthority,
    pub general_information: String,
    pub base_data: String,
    pub update_date_raw: String,
    pub update_date: Option<NaiveDate>,
    pub exclusions_of_liability: Vec<InfoEntry>,
    pub disclaimers: Vec<InfoEntry>,
    pub concerned_themes: Vec<Theme>,
    pub not_concerned_themes: Vec<Theme>,
    pub themes_without_data: Vec<Theme>,
    pub restrictions: Vec<RestrictionEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentEncoding {
    Json,
    Xml,
}

impl DocumentEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_path: String,
    pub source_sha256: String,
    pub encoding: DocumentEncoding,
    pub language: String,
    pub view: ViewModel,
}
