use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::themes::ThemeEntries;
use crate::model::{RestrictionEntry, Shares};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendBucket {
    pub symbol_ref: String,
    pub legend_text: String,
    pub nr_of_points: Option<Decimal>,
    pub length_share: Option<Decimal>,
    pub area_share: Option<Decimal>,
    pub part_in_percent: Option<Decimal>,
    pub rows: Vec<LegendRow>,
}

impl LegendBucket {
    fn seed(entry: &RestrictionEntry) -> Self {
        Self {
            symbol_ref: entry.symbol_ref.clone(),
            legend_text: entry.legend_text.clone(),
            nr_of_points: None,
            length_share: None,
            area_share: None,
            part_in_percent: None,
            rows: Vec::new(),
        }
    }

    fn accumulate(&mut self, shares: &Shares) {
        add_share(&mut self.nr_of_points, shares.nr_of_points);
        add_share(&mut self.length_share, shares.length_share);
        add_share(&mut self.area_share, shares.area_share);
        add_share(&mut self.part_in_percent, shares.part_in_percent);
    }

    fn with_rows(mut self) -> Self {
        self.rows = self.presentation_rows();
        self
    }

    fn presentation_rows(&self) -> Vec<LegendRow> {
        let percent = self
            .part_in_percent
            .map(|value| format!("{value:.1}%"))
            .unwrap_or_else(|| "-".to_string());

        let mut rows = Vec::new();
        if let Some(points) = self.nr_of_points {
            let share = format!("{} pt", points.normalize());
            rows.push(self.row(LegendMeasure::Points, share, "-".to_string()));
        }
        if let Some(length) = self.length_share {
            let share = format!("{} m", length.normalize());
            rows.push(self.row(LegendMeasure::Length, share, percent.clone()));
        }
        if let Some(area) = self.area_share {
            let share = format!("{} m²", area.normalize());
            rows.push(self.row(LegendMeasure::Area, share, percent));
        }
        rows
    }

    fn row(&self, measure: LegendMeasure, share: String, percent: String) -> LegendRow {
        LegendRow {
            measure,
            legend_text: self.legend_text.clone(),
            symbol_ref: self.symbol_ref.clone(),
            share,
            percent,
        }
    }
}

/// Zero counts as not set: it neither starts nor changes a running total.
fn add_share(total: &mut Option<Decimal>, value: Decimal) {
    if !value.is_zero() {
        *total = Some(total.unwrap_or(Decimal::ZERO) + value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendMeasure {
    Points,
    Length,
    Area,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendRow {
    pub measure: LegendMeasure,
    pub legend_text: String,
    pub symbol_ref: String,
    pub share: String,
    pub percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubthemeLegend {
    pub label: String,
    pub show_header: bool,
    pub full_legend: String,
    pub buckets: Vec<LegendBucket>,
}

impl SubthemeLegend {
    pub fn is_placeholder(&self) -> bool {
        self.buckets.is_empty()
    }
}

struct SubthemeGroup {
    full_legend: String,
    symbols: IndexMap<String, LegendBucket>,
}

pub fn aggregate_legend(resolved: &ThemeEntries<'_>) -> Vec<SubthemeLegend> {
    let mut groups: IndexMap<&str, SubthemeGroup> = IndexMap::new();

    for entry in &resolved.entries {
        let group = groups
            .entry(entry.subtheme.as_str())
            .or_insert_with(|| SubthemeGroup {
                full_legend: entry
                    .map
                    .as_ref()
                    .map(|map| map.legend_at_web.clone())
                    .unwrap_or_default(),
                symbols: IndexMap::new(),
            });
        group
            .symbols
            .entry(entry.symbol_ref.clone())
            .or_insert_with(|| LegendBucket::seed(entry))
            .accumulate(&entry.shares);
    }

    resolved
        .ordered_subthemes
        .iter()
        .filter_map(|label| {
            let show_header = !label.is_empty() && !resolved.is_subtheme_only;
            match groups.swap_remove(label.as_str()) {
                Some(group) => Some(SubthemeLegend {
                    label: label.clone(),
                    show_header,
                    full_legend: group.full_legend,
                    buckets: group.symbols.into_values().map(LegendBucket::with_rows).collect(),
                }),
                None if label.is_empty() => None,
                None => Some(SubthemeLegend {
                    label: label.clone(),
                    show_header,
                    full_legend: String::new(),
                    buckets: Vec::new(),
                }),
            }
        })
        .collect()
}
