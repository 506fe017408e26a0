//! Default vocabulary for a fresh install.

use crate::domain::{DomainResult, VocabularyEntry, VocabularyKind};
use crate::repository::VocabularyRepository;

pub const DEFAULT_CATEGORIES: [&str; 5] = ["Clothes", "Toiletries", "Tech", "Documents", "Misc"];

pub const DEFAULT_LOCATIONS: [&str; 6] = [
    "Bedroom",
    "Bathroom",
    "Kitchen",
    "Living Room",
    "Garage",
    "Basement",
];

/// Populate default categories and locations when both registries are empty.
///
/// Returns whether anything was inserted. Safe to call on every start.
pub async fn seed_if_needed(repo: &VocabularyRepository) -> DomainResult<bool> {
    let entries: Vec<VocabularyEntry> = defaults(VocabularyKind::Category, &DEFAULT_CATEGORIES)
        .chain(defaults(VocabularyKind::Location, &DEFAULT_LOCATIONS))
        .collect();

    let seeded = repo
        .insert_all_if_empty(&[VocabularyKind::Category, VocabularyKind::Location], &entries)
        .await?;
    if seeded {
        log::info!("Seeded {} default vocabulary entries", entries.len());
    }
    Ok(seeded)
}

fn defaults<'a>(
    kind: VocabularyKind,
    names: &'a [&'a str],
) -> impl Iterator<Item = VocabularyEntry> + 'a {
    names
        .iter()
        .enumerate()
        .map(move |(i, name)| VocabularyEntry::new(kind, name.to_string(), i as i32))
}
