use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use super::accessors::{
    ensure_array, ensure_decimal, ensure_number, field, is_blank, localized_text, path, text_value,
};
use super::error::{ExtractError, Result};
use super::normalize::{RESPONSE_ROOT, SourceDocument, normalize};
use crate::model::{
    CadastreAuthority, Extract, InfoEntry, LegalProvision, LegalReference, MapReference,
    ProvisionKind, ResponsibleOffice, RestrictionEntry, Shares, Theme,
};

pub fn load_extract(source: SourceDocument, language: &str) -> Result<Extract> {
    let document = normalize(source)?;
    read_extract(&document, language)
}

pub fn read_extract(document: &Value, language: &str) -> Result<Extract> {
    let extract = path(document, &[RESPONSE_ROOT, "extract"]);
    if !extract.is_object() {
        return Err(ExtractError::MissingExtract);
    }

    let reader = Reader { language };
    let update_date_raw = text_value(field(extract, "UpdateDateCS"));

    Ok(Extract {
        cantonal_logo_ref: text_value(field(extract, "CantonalLogoRef")),
        authority: reader.authority(field(extract, "PLRCadastreAuthority")),
        general_information: reader.text(field(extract, "GeneralInformation")),
        base_data: reader.text(field(extract, "BaseData")),
        update_date: parse_update_date(&update_date_raw),
        update_date_raw,
        exclusions_of_liability: reader.info_entries(field(extract, "ExclusionOfLiability")),
        disclaimers: reader.info_entries(field(extract, "Disclaimer")),
        concerned_themes: reader.themes(field(extract, "ConcernedTheme")),
        not_concerned_themes: reader.themes(field(extract, "NotConcernedTheme")),
        themes_without_data: reader.themes(field(extract, "ThemeWithoutData")),
        restrictions: ensure_array(path(extract, &["RealEstate", "RestrictionOnLandownership"]))
            .into_iter()
            .map(|entry| reader.restriction(entry))
            .collect(),
    })
}

struct Reader<'a> {
    language: &'a str,
}

impl Reader<'_> {
    fn text(&self, value: &Value) -> String {
        localized_text(value, self.language)
    }

    fn authority(&self, value: &Value) -> CadastreAuthority {
        CadastreAuthority {
            name: self.text(field(value, "Name")),
            street: text_value(field(value, "Street")),
            number: text_value(field(value, "Number")),
            postal_code: text_value(field(value, "PostalCode")),
            city: text_value(field(value, "City")),
            office_at_web: self.text(field(value, "OfficeAtWeb")),
        }
    }

    fn info_entries(&self, value: &Value) -> Vec<InfoEntry> {
        ensure_array(value)
            .into_iter()
            .map(|entry| InfoEntry {
                title: self.text(field(entry, "Title")),
                content: self.text(field(entry, "Content")),
            })
            .collect()
    }

    fn themes(&self, value: &Value) -> Vec<Theme> {
        ensure_array(value)
            .into_iter()
            .map(|theme| self.theme(theme))
            .collect()
    }

    fn theme(&self, value: &Value) -> Theme {
        Theme {
            code: text_value(field(value, "Code")),
            subcode: text_value(field(value, "SubCode")),
            text: self.text(field(value, "Text")),
        }
    }

    fn office(&self, value: &Value) -> ResponsibleOffice {
        ResponsibleOffice {
            name: self.text(field(value, "Name")),
            office_at_web: self.text(field(value, "OfficeAtWeb")),
        }
    }

    fn restriction(&self, value: &Value) -> RestrictionEntry {
        let legend_text = match field(value, "LegendText") {
            text if !is_blank(text) => self.text(text),
            _ => self.text(field(value, "Information")),
        };

        RestrictionEntry {
            theme: self.theme(field(value, "Theme")),
            subtheme: self.text(field(value, "SubTheme")),
            law_status: self.text(path(value, &["Lawstatus", "Text"])),
            legend_text,
            symbol_ref: self.text(field(value, "SymbolRef")),
            shares: Shares {
                nr_of_points: ensure_decimal(field(value, "NrOfPoints")),
                length_share: ensure_decimal(field(value, "LengthShare")),
                area_share: ensure_decimal(field(value, "AreaShare")),
                part_in_percent: ensure_decimal(field(value, "PartInPercent")),
            },
            map: self.map_reference(field(value, "Map")),
            responsible_office: self.office(field(value, "ResponsibleOffice")),
            provisions: ensure_array(field(value, "LegalProvisions"))
                .into_iter()
                .map(|provision| self.provision(provision))
                .collect(),
        }
    }

    fn map_reference(&self, value: &Value) -> Option<MapReference> {
        if is_blank(value) {
            return None;
        }
        let opacity = field(value, "layerOpacity");
        Some(MapReference {
            reference_wms: self.text(field(value, "ReferenceWMS")),
            legend_at_web: self.text(field(value, "LegendAtWeb")),
            layer_opacity: (!opacity.is_null()).then(|| ensure_number(opacity)),
        })
    }

    fn provision(&self, value: &Value) -> LegalProvision {
        LegalProvision {
            kind: ProvisionKind::from_code(&text_value(path(value, &["Type", "Code"]))),
            title: self.text(field(value, "Title")),
            official_number: self.text(field(value, "OfficialNumber")),
            abbreviation: self.text(field(value, "Abbreviation")),
            text_at_web: self.text(field(value, "TextAtWeb")),
            index: ensure_number(field(value, "Index")) as i64,
            responsible_office: self.office(field(value, "ResponsibleOffice")),
            references: ensure_array(field(value, "Reference"))
                .into_iter()
                .map(|reference| LegalReference {
                    title: self.text(field(reference, "Title")),
                    abbreviation: self.text(field(reference, "Abbreviation")),
                    official_number: self.text(field(reference, "OfficialNumber")),
                    text_at_web: self.text(field(reference, "TextAtWeb")),
                })
                .collect(),
        }
    }
}

fn parse_update_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp.date());
    }
    raw.get(..10)
        .unwrap_or(raw)
        .parse::<NaiveDate>()
        .ok()
}
