use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{
    LegalProvision, LegalReference, ProvisionKind, ResponsibleOffice, RestrictionEntry,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    pub label: String,
    pub link: String,
    pub index: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeLink {
    pub label: String,
    pub link: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedProvisions {
    pub regulations: Vec<DocumentLink>,
    pub legal_bases: Vec<DocumentLink>,
    pub hints: Vec<DocumentLink>,
    pub responsible_offices: Vec<OfficeLink>,
}

#[derive(Debug, Default)]
struct Buckets {
    regulations: IndexMap<String, DocumentLink>,
    legal_bases: IndexMap<String, DocumentLink>,
    hints: IndexMap<String, DocumentLink>,
    offices: IndexMap<String, OfficeLink>,
}

impl Buckets {
    fn add_provision(&mut self, provision: &LegalProvision) {
        let link = provision.text_at_web.clone();
        match &provision.kind {
            ProvisionKind::Regulation => {
                let document = document_link(regulation_label(provision), &link, provision.index);
                self.regulations.insert(link, document);
            }
            ProvisionKind::Statute => {
                let document = document_link(statute_label(provision), &link, provision.index);
                self.legal_bases.insert(link, document);
            }
            ProvisionKind::Hint => {
                let document = document_link(provision.title.clone(), &link, provision.index);
                self.hints.insert(link, document);
            }
            ProvisionKind::Undeclared => {
                let document = document_link(regulation_label(provision), &link, provision.index);
                self.regulations.insert(link, document);
                for reference in &provision.references {
                    let document = document_link(
                        reference_label(reference),
                        &reference.text_at_web,
                        provision.index,
                    );
                    self.legal_bases.insert(reference.text_at_web.clone(), document);
                }
            }
            ProvisionKind::Other(_) => {}
        }
        self.add_office(&provision.responsible_office);
    }

    fn add_office(&mut self, office: &ResponsibleOffice) {
        if office.office_at_web.is_empty() && office.name.is_empty() {
            return;
        }
        self.offices.insert(
            office.office_at_web.clone(),
            OfficeLink {
                label: office.name.clone(),
                link: office.office_at_web.clone(),
            },
        );
    }
}

fn document_link(label: String, link: &str, index: i64) -> DocumentLink {
    DocumentLink {
        label,
        link: link.to_string(),
        index,
    }
}

fn with_official_number(mut label: String, official_number: &str) -> String {
    if !official_number.is_empty() {
        label.push_str(", ");
        label.push_str(official_number);
    }
    label
}

fn regulation_label(provision: &LegalProvision) -> String {
    with_official_number(provision.title.clone(), &provision.official_number)
}

fn statute_label(provision: &LegalProvision) -> String {
    let mut label = provision.title.clone();
    if !provision.abbreviation.is_empty() {
        label.push_str(&format!(" ({})", provision.abbreviation));
    }
    with_official_number(label, &provision.official_number)
}

fn reference_label(reference: &LegalReference) -> String {
    let label = format!("{} ({})", reference.title, reference.abbreviation);
    with_official_number(label, &reference.official_number)
}

/// Label comparison for the display language, falling back to code point order
/// when no collation data is available.
struct LabelOrder {
    collator: Option<Collator>,
}

impl LabelOrder {
    fn new(language: &str) -> Self {
        let locale = language.parse::<Locale>().unwrap_or(Locale::UND);
        let collator = match Collator::try_new(&locale.into(), CollatorOptions::new()) {
            Ok(collator) => Some(collator),
            Err(err) => {
                debug!(language, error = %err, "comparing labels by code point");
                None
            }
        };
        Self { collator }
    }

    fn compare(&self, a: &str, b: &str) -> Ordering {
        match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.cmp(b),
        }
    }
}

pub fn classify_provisions(
    entries: &[&RestrictionEntry],
    office_from_restriction: bool,
    language: &str,
) -> ClassifiedProvisions {
    let mut buckets = Buckets::default();
    for entry in entries {
        for provision in &entry.provisions {
            buckets.add_provision(provision);
        }
    }

    if office_from_restriction {
        buckets.offices.clear();
        for entry in entries {
            buckets.add_office(&entry.responsible_office);
        }
    }

    let order = LabelOrder::new(language);
    let mut responsible_offices: Vec<OfficeLink> = buckets.offices.into_values().collect();
    responsible_offices.sort_by(|a, b| order.compare(&a.label, &b.label));

    ClassifiedProvisions {
        regulations: sorted_documents(buckets.regulations, &order),
        legal_bases: sorted_documents(buckets.legal_bases, &order),
        hints: sorted_documents(buckets.hints, &order),
        responsible_offices,
    }
}

fn sorted_documents(
    bucket: IndexMap<String, DocumentLink>,
    order: &LabelOrder,
) -> Vec<DocumentLink> {
    let mut documents: Vec<DocumentLink> = bucket.into_values().collect();
    documents.sort_by(|a, b| {
        a.index
            .cmp(&b.index)
            .then_with(|| order.compare(&a.label, &b.label))
    });
    documents
}
