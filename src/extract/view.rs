use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::layers::{OverlayLayerDescriptor, synthesize_layers};
use super::legend::{SubthemeLegend, aggregate_legend};
use super::provisions::{DocumentLink, OfficeLink, classify_provisions};
use super::themes::{ThemeEntries, resolve_theme_entries};
use crate::config::ExtractConfig;
use crate::model::{CadastreAuthority, Extract, InfoEntry, Theme, theme_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    ConcernedThemes,
    NotConcernedThemes,
    ThemesWithoutData,
    GeneralInformation,
}

impl SectionKind {
    pub const ALL: [SectionKind; 4] = [
        Self::ConcernedThemes,
        Self::NotConcernedThemes,
        Self::ThemesWithoutData,
        Self::GeneralInformation,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ConcernedThemes => "concernedThemes",
            Self::NotConcernedThemes => "notConcernedThemes",
            Self::ThemesWithoutData => "themeWithoutData",
            Self::GeneralInformation => "generalInformation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewModel {
    pub sections: Vec<Section>,
}

impl ViewModel {
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    pub body: SectionBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "snake_case")]
pub enum SectionBody {
    ConcernedThemes(Vec<ConcernedTheme>),
    Themes(Vec<ThemeSummary>),
    GeneralInformation(Box<GeneralInformation>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSummary {
    pub id: String,
    pub code: String,
    pub subcode: String,
    pub text: String,
}

impl From<&Theme> for ThemeSummary {
    fn from(theme: &Theme) -> Self {
        Self {
            id: theme.id(),
            code: theme.code.clone(),
            subcode: theme.subcode.clone(),
            text: theme.text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcernedTheme {
    #[serde(flatten)]
    pub theme: ThemeSummary,
    pub law_status: String,
    pub contents: ThemeContents,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeContents {
    pub theme_id: String,
    pub is_subtheme_only: bool,
    pub subthemes: Vec<SubthemeLegend>,
    pub regulations: Vec<DocumentLink>,
    pub legal_bases: Vec<DocumentLink>,
    pub hints: Vec<DocumentLink>,
    pub responsible_offices: Vec<OfficeLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralInformation {
    pub authority: CadastreAuthority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cantonal_logo_ref: Option<String>,
    pub update_date: Option<NaiveDate>,
    pub update_date_raw: String,
    pub base_data: String,
    pub general_information: String,
    pub exclusions_of_liability: Vec<InfoEntry>,
    pub disclaimers: Vec<InfoEntry>,
}

impl GeneralInformation {
    fn is_empty(&self) -> bool {
        self.authority.is_empty()
            && self.cantonal_logo_ref.as_deref().unwrap_or_default().is_empty()
            && self.update_date_raw.is_empty()
            && self.base_data.is_empty()
            && self.general_information.is_empty()
            && self.exclusions_of_liability.is_empty()
            && self.disclaimers.is_empty()
    }
}

/// Read-only queries over one extract.
#[derive(Debug, Clone, Copy)]
pub struct ExtractView<'a> {
    extract: &'a Extract,
    config: &'a ExtractConfig,
}

impl<'a> ExtractView<'a> {
    pub fn new(extract: &'a Extract, config: &'a ExtractConfig) -> Self {
        Self { extract, config }
    }

    pub fn extract(&self) -> &'a Extract {
        self.extract
    }

    pub fn assemble(&self) -> ViewModel {
        ViewModel {
            sections: SectionKind::ALL
                .into_iter()
                .filter_map(|kind| self.section(kind))
                .collect(),
        }
    }

    pub fn section(&self, kind: SectionKind) -> Option<Section> {
        let (count, body) = match kind {
            SectionKind::ConcernedThemes => {
                let themes = &self.extract.concerned_themes;
                let items = themes.iter().map(|theme| self.concerned_theme(theme)).collect();
                (Some(themes.len()), SectionBody::ConcernedThemes(items))
            }
            SectionKind::NotConcernedThemes => themes_body(&self.extract.not_concerned_themes),
            SectionKind::ThemesWithoutData => themes_body(&self.extract.themes_without_data),
            SectionKind::GeneralInformation => {
                let info = self.general_information();
                if info.is_empty() {
                    return None;
                }
                (None, SectionBody::GeneralInformation(Box::new(info)))
            }
        };

        if count == Some(0) {
            return None;
        }
        Some(Section { kind, count, body })
    }

    pub fn resolve(&self, code: &str, subcode: &str) -> ThemeEntries<'a> {
        resolve_theme_entries(
            &self.extract.restrictions,
            code,
            subcode,
            &self.config.subthemes,
        )
    }

    pub fn theme_contents(&self, code: &str, subcode: &str) -> ThemeContents {
        let resolved = self.resolve(code, subcode);
        let provisions = classify_provisions(
            &resolved.entries,
            self.config.responsible_office_from_restriction,
            &self.config.language,
        );

        ThemeContents {
            theme_id: theme_id(code, subcode),
            is_subtheme_only: resolved.is_subtheme_only,
            subthemes: aggregate_legend(&resolved),
            regulations: provisions.regulations,
            legal_bases: provisions.legal_bases,
            hints: provisions.hints,
            responsible_offices: provisions.responsible_offices,
        }
    }

    pub fn theme_layers(&self, code: &str, subcode: &str) -> Vec<OverlayLayerDescriptor> {
        let resolved = self.resolve(code, subcode);
        synthesize_layers(&self.activated_theme(code, subcode, &resolved), &resolved)
    }

    /// The listed concerned theme, or one named after the first matched entry.
    fn activated_theme(&self, code: &str, subcode: &str, resolved: &ThemeEntries<'_>) -> Theme {
        if let Some(theme) = self
            .extract
            .concerned_themes
            .iter()
            .find(|theme| theme.matches(code, subcode))
        {
            return theme.clone();
        }
        Theme {
            code: code.to_string(),
            subcode: subcode.to_string(),
            text: resolved
                .entries
                .first()
                .map(|entry| entry.theme.text.clone())
                .unwrap_or_default(),
        }
    }

    fn concerned_theme(&self, theme: &Theme) -> ConcernedTheme {
        let law_status = self
            .extract
            .restrictions
            .iter()
            .find(|entry| entry.theme.matches(&theme.code, &theme.subcode))
            .map(|entry| entry.law_status.clone())
            .unwrap_or_default();

        ConcernedTheme {
            theme: ThemeSummary::from(theme),
            law_status,
            contents: self.theme_contents(&theme.code, &theme.subcode),
        }
    }

    fn general_information(&self) -> GeneralInformation {
        let extract = self.extract;
        GeneralInformation {
            authority: extract.authority.clone(),
            cantonal_logo_ref: (!self.config.hide_logo).then(|| extract.cantonal_logo_ref.clone()),
            update_date: extract.update_date,
            update_date_raw: extract.update_date_raw.clone(),
            base_data: extract.base_data.clone(),
            general_information: extract.general_information.clone(),
            exclusions_of_liability: extract.exclusions_of_liability.clone(),
            disclaimers: extract.disclaimers.clone(),
        }
    }
}

fn themes_body(themes: &[Theme]) -> (Option<usize>, SectionBody) {
    (
        Some(themes.len()),
        SectionBody::Themes(themes.iter().map(ThemeSummary::from).collect()),
    )
}
