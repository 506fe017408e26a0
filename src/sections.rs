//! Section Builder
//!
//! Projects a flat item list into ordered display sections. Pure and
//! stateless: the same items, grouping, filters and registry order always
//! produce the same sections.
//!
//! At every grouping level keys come in registry order first, then any
//! orphan keys (values with no registry entry) sorted lexicographically.
//! Inside a leaf section unpacked items precede packed ones, otherwise input
//! order is kept.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Item, VocabularyEntry, VocabularyKind};

/// How items are grouped for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode")]
pub enum Grouping {
    /// One pack-ordered list, no sections
    Flat,
    /// One level of sections
    Single { tier: VocabularyKind },
    /// Outer sections containing inner sections
    Nested {
        outer: VocabularyKind,
        inner: VocabularyKind,
    },
}

impl Grouping {
    pub fn single(tier: VocabularyKind) -> Self {
        Grouping::Single { tier }
    }

    pub fn nested(outer: VocabularyKind, inner: VocabularyKind) -> Self {
        Grouping::Nested { outer, inner }
    }
}

/// Active filters, AND-combined. `None` means no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    /// Exact group match; `Some("")` selects the ungrouped bucket
    pub group: Option<String>,
    /// Exact location match; an empty value is no restriction
    pub location: Option<String>,
}

impl Filters {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn by_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn by_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn matches(&self, item: &Item) -> bool {
        if let Some(group) = &self.group {
            if item.group != *group {
                return false;
            }
        }
        match self.location.as_deref() {
            Some(location) if !location.is_empty() => item.location == location,
            _ => true,
        }
    }
}

/// Registry display order per kind, as a list of names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabularies {
    pub categories: Vec<String>,
    pub locations: Vec<String>,
    pub groups: Vec<String>,
}

impl Vocabularies {
    /// Collect names from registry entries of any kind.
    ///
    /// Entries are ordered by `sort_order`; ties keep their input order.
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a VocabularyEntry>) -> Self {
        let mut sorted: Vec<&VocabularyEntry> = entries.into_iter().collect();
        sorted.sort_by_key(|e| e.sort_order);

        let mut vocab = Self::default();
        for entry in sorted {
            vocab.names_mut(entry.kind).push(entry.name.clone());
        }
        vocab
    }

    pub fn names(&self, kind: VocabularyKind) -> &[String] {
        match kind {
            VocabularyKind::Category => &self.categories,
            VocabularyKind::Location => &self.locations,
            VocabularyKind::Group => &self.groups,
        }
    }

    fn names_mut(&mut self, kind: VocabularyKind) -> &mut Vec<String> {
        match kind {
            VocabularyKind::Category => &mut self.categories,
            VocabularyKind::Location => &mut self.locations,
            VocabularyKind::Group => &mut self.groups,
        }
    }
}

/// A named bucket of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub key: String,
    pub items: Vec<Item>,
}

/// A named bucket of inner sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NestedSection {
    pub key: String,
    pub sections: Vec<Section>,
}

/// Builder output, shaped by the requested grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "mode", content = "sections")]
pub enum Sections {
    Flat(Vec<Item>),
    Single(Vec<Section>),
    Nested(Vec<NestedSection>),
}

impl Sections {
    /// Number of items across all sections
    pub fn item_count(&self) -> usize {
        match self {
            Sections::Flat(items) => items.len(),
            Sections::Single(sections) => sections.iter().map(|s| s.items.len()).sum(),
            Sections::Nested(outer) => outer
                .iter()
                .flat_map(|o| &o.sections)
                .map(|s| s.items.len())
                .sum(),
        }
    }

    /// Top-level keys in display order (empty for flat)
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Sections::Flat(_) => Vec::new(),
            Sections::Single(sections) => sections.iter().map(|s| s.key.as_str()).collect(),
            Sections::Nested(outer) => outer.iter().map(|o| o.key.as_str()).collect(),
        }
    }
}

/// Build display sections for `items`
pub fn build_sections(
    items: &[Item],
    grouping: Grouping,
    filters: &Filters,
    vocab: &Vocabularies,
) -> Sections {
    let filtered: Vec<&Item> = items.iter().filter(|item| filters.matches(item)).collect();

    match grouping {
        Grouping::Flat => Sections::Flat(pack_ordered(filtered)),
        Grouping::Single { tier } => Sections::Single(leaf_sections(filtered, tier, vocab)),
        Grouping::Nested { outer, inner } => Sections::Nested(
            partition(filtered, outer, vocab)
                .into_iter()
                .map(|(key, bucket)| NestedSection {
                    key: key.to_string(),
                    sections: leaf_sections(bucket, inner, vocab),
                })
                .collect(),
        ),
    }
}

fn leaf_sections(items: Vec<&Item>, tier: VocabularyKind, vocab: &Vocabularies) -> Vec<Section> {
    partition(items, tier, vocab)
        .into_iter()
        .map(|(key, bucket)| Section {
            key: key.to_string(),
            items: pack_ordered(bucket),
        })
        .collect()
}

/// Unpacked first; `sort_by_key` is stable so input order survives otherwise
fn pack_ordered(mut items: Vec<&Item>) -> Vec<Item> {
    items.sort_by_key(|item| item.is_packed);
    items.into_iter().cloned().collect()
}

/// Split items by their value for `tier`, ordered registry-first then orphans.
/// Buckets keep input order and are never empty.
fn partition<'a>(
    items: Vec<&'a Item>,
    tier: VocabularyKind,
    vocab: &Vocabularies,
) -> Vec<(&'a str, Vec<&'a Item>)> {
    let mut buckets: HashMap<&'a str, Vec<&'a Item>> = HashMap::new();
    for item in items {
        buckets.entry(item.field(tier)).or_default().push(item);
    }

    let mut ordered = Vec::with_capacity(buckets.len());
    // remove_entry also collapses names listed twice in the registry
    for name in vocab.names(tier) {
        if let Some(entry) = buckets.remove_entry(name.as_str()) {
            ordered.push(entry);
        }
    }

    let mut orphans: Vec<(&'a str, Vec<&'a Item>)> = buckets.into_iter().collect();
    orphans.sort_by(|a, b| a.0.cmp(b.0));
    ordered.extend(orphans);
    ordered
}
