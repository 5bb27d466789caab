use std::collections::BTreeMap;

use tracing::debug;

use crate::model::RestrictionEntry;

#[derive(Debug, Clone, PartialEq)]
pub struct ThemeEntries<'a> {
    pub entries: Vec<&'a RestrictionEntry>,
    pub ordered_subthemes: Vec<String>,
    /// The theme was only found as a subtheme label; subtheme headers are suppressed.
    pub is_subtheme_only: bool,
}

impl ThemeEntries<'_> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn resolve_theme_entries<'a>(
    all_entries: &'a [RestrictionEntry],
    code: &str,
    subcode: &str,
    subtheme_order: &BTreeMap<String, Vec<String>>,
) -> ThemeEntries<'a> {
    let mut entries: Vec<&RestrictionEntry> = all_entries
        .iter()
        .filter(|entry| entry.theme.matches(code, subcode))
        .collect();

    if !entries.is_empty() {
        let priority = subtheme_order
            .get(code)
            .filter(|labels| !labels.is_empty())
            .cloned()
            .unwrap_or_else(|| vec![String::new()]);

        entries.sort_by_key(|entry| {
            priority
                .iter()
                .position(|label| *label == entry.subtheme)
                .unwrap_or(priority.len())
        });

        let mut ordered_subthemes = priority;
        for entry in &entries {
            if !ordered_subthemes.contains(&entry.subtheme) {
                ordered_subthemes.push(entry.subtheme.clone());
            }
        }

        return ThemeEntries {
            entries,
            ordered_subthemes,
            is_subtheme_only: false,
        };
    }

    let entries: Vec<&RestrictionEntry> = all_entries
        .iter()
        .filter(|entry| !code.is_empty() && entry.subtheme == code)
        .collect();

    if entries.is_empty() {
        return ThemeEntries {
            entries,
            ordered_subthemes: vec![String::new()],
            is_subtheme_only: false,
        };
    }

    debug!(code, matched = entries.len(), "theme matched by subtheme label");
    ThemeEntries {
        entries,
        ordered_subthemes: vec![code.to_string()],
        is_subtheme_only: true,
    }
}
