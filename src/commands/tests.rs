//! Command-level tests against an in-memory database

use crate::commands::*;
use crate::config::Config;
use crate::domain::{DomainError, Item, VocabularyKind};
use crate::repository::DbState;
use crate::sections::{Filters, Grouping, Section, Sections};
use crate::AppState;
use std::path::PathBuf;

async fn setup() -> AppState {
    let config = Config {
        seed_defaults: false,
        ..Config::in_memory()
    };
    AppState::open(&config).await.expect("Failed to open state")
}

fn new_item(trip_id: u32, name: &str, category: &str, location: &str) -> NewItem {
    NewItem {
        trip_id,
        name: name.to_string(),
        category: category.to_string(),
        location: location.to_string(),
        ..NewItem::default()
    }
}

async fn add(state: &AppState, trip_id: u32, name: &str, category: &str, location: &str) -> Item {
    add_item(state, new_item(trip_id, name, category, location))
        .await
        .expect("Failed to add item")
}

fn single_keys(sections: &Sections) -> Vec<String> {
    sections.keys().into_iter().map(String::from).collect()
}

async fn by_location(state: &AppState, trip_id: u32) -> Vec<Section> {
    let grouping = Grouping::single(VocabularyKind::Location);
    match trip_sections(state, trip_id, grouping, &Filters::none()).await.unwrap() {
        Sections::Single(sections) => sections,
        other => panic!("expected single-level sections, got {:?}", other),
    }
}

fn ids(section: &Section) -> Vec<u32> {
    section.items.iter().map(|i| i.id).collect()
}

#[tokio::test]
async fn test_uninitialized_store_surfaces_persistence_errors() {
    let state = AppState::new(DbState::new(PathBuf::from("never-opened.db")));

    let err = add_option(&state, VocabularyKind::Category, "Tech").await.unwrap_err();
    assert!(matches!(err, DomainError::Persistence(_)));
    let err = rename_option(&state, 1, "Gear").await.unwrap_err();
    assert!(matches!(err, DomainError::Persistence(_)));
    let err = create_trip(&state, "Beach").await.unwrap_err();
    assert!(matches!(err, DomainError::Persistence(_)));
    let err = trip_sections(&state, 1, Grouping::Flat, &Filters::none()).await.unwrap_err();
    assert!(matches!(err, DomainError::Persistence(_)));

    // Input is still validated before the store is touched
    let err = add_option(&state, VocabularyKind::Category, "  ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(!state.db_state.is_initialized().await);
}

#[tokio::test]
async fn test_open_seeds_defaults() {
    let state = AppState::open(&Config::in_memory()).await.unwrap();
    let categories = list_options(&state, VocabularyKind::Category).await.unwrap();
    assert_eq!(categories.len(), 5);
    assert_eq!(categories[0].name, "Clothes");
}

#[tokio::test]
async fn test_create_trip_rejects_blank_name() {
    let state = setup().await;
    let err = create_trip(&state, "   ").await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert!(list_trips(&state).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_item_rejects_blank_name() {
    let state = setup().await;
    let trip = create_trip(&state, "Weekend").await.unwrap();

    let result = add_item(&state, new_item(trip.id, "  ", "Clothes", "Bedroom")).await;
    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(list_trip_items(&state, trip.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_item_to_missing_trip() {
    let state = setup().await;
    let result = add_item(&state, new_item(99, "Socks", "Clothes", "Bedroom")).await;
    assert!(matches!(result, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_add_item_trims_fields() {
    let state = setup().await;
    let trip = create_trip(&state, "  Weekend ").await.unwrap();
    assert_eq!(trip.name, "Weekend");

    let item = add_item(
        &state,
        NewItem {
            group: " Morning ".to_string(),
            container: "Backpack".to_string(),
            is_optional: true,
            ..new_item(trip.id, " Socks ", " Clothes", "Bedroom ")
        },
    )
    .await
    .unwrap();

    assert_eq!(item.name, "Socks");
    assert_eq!(item.category, "Clothes");
    assert_eq!(item.location, "Bedroom");
    assert_eq!(item.group, "Morning");
    assert_eq!(item.container, "Backpack");
    assert!(item.is_optional);
    assert!(!item.is_packed);
}

#[tokio::test]
async fn test_rename_option_rebuilds_sections() {
    let state = setup().await;
    add_option(&state, VocabularyKind::Location, "Bedroom").await.unwrap();
    add_option(&state, VocabularyKind::Location, "Bathroom").await.unwrap();
    let bedroom = list_options(&state, VocabularyKind::Location).await.unwrap()[0].clone();

    let trip = create_trip(&state, "Beach").await.unwrap();
    let other = create_trip(&state, "Ski").await.unwrap();
    add(&state, trip.id, "Socks", "Clothes", "Bedroom").await;
    add(&state, trip.id, "Toothbrush", "Toiletries", "Bathroom").await;
    let lower = add(&state, other.id, "Charger", "Tech", "bedroom").await;

    let outcome = rename_option(&state, bedroom.id, "Room 1").await.unwrap();
    assert_eq!(outcome.entry.name, "Room 1");
    assert_eq!(outcome.items_updated, 2);

    let sections = trip_sections(
        &state,
        trip.id,
        Grouping::single(VocabularyKind::Location),
        &Filters::none(),
    )
    .await
    .unwrap();
    assert_eq!(single_keys(&sections), vec!["Room 1", "Bathroom"]);

    // Case-insensitive match in another trip takes the new casing
    let moved = get_item(&state, lower.id).await.unwrap().unwrap();
    assert_eq!(moved.location, "Room 1");
}

#[tokio::test]
async fn test_rename_keeps_section_contents_and_order() {
    let state = setup().await;
    let bedroom = add_option(&state, VocabularyKind::Location, "Bedroom").await.unwrap();
    add_option(&state, VocabularyKind::Location, "Bathroom").await.unwrap();

    let trip = create_trip(&state, "Beach").await.unwrap();
    let socks = add(&state, trip.id, "Socks", "Clothes", "Bedroom").await;
    add(&state, trip.id, "Shirt", "Clothes", "Bedroom").await;
    add(&state, trip.id, "Soap", "Toiletries", "Bathroom").await;
    let charger = add(&state, trip.id, "Charger", "Tech", "Bedroom").await;
    add(&state, trip.id, "Book", "Misc", "Bedroom").await;
    toggle_packed(&state, socks.id).await.unwrap();
    toggle_packed(&state, charger.id).await.unwrap();

    let before = by_location(&state, trip.id).await;
    rename_option(&state, bedroom.id, "Room 1").await.unwrap();
    let after = by_location(&state, trip.id).await;

    assert_eq!(before.len(), after.len());
    assert_eq!(after[0].key, "Room 1");
    assert_eq!(after[1].key, "Bathroom");
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(ids(old), ids(new));
    }

    let room: Vec<(&str, bool)> =
        after[0].items.iter().map(|i| (i.name.as_str(), i.is_packed)).collect();
    assert_eq!(
        room,
        vec![("Shirt", false), ("Book", false), ("Socks", true), ("Charger", true)]
    );
    assert!(after[0].items.iter().all(|i| i.location == "Room 1"));
}

#[tokio::test]
async fn test_remove_option_keeps_item_values() {
    let state = setup().await;
    add_option(&state, VocabularyKind::Category, "Clothes").await.unwrap();
    let tech = add_option(&state, VocabularyKind::Category, "Tech").await.unwrap();

    let trip = create_trip(&state, "Work").await.unwrap();
    add(&state, trip.id, "Laptop", "Tech", "Office").await;
    add(&state, trip.id, "Shirt", "Clothes", "Bedroom").await;

    remove_option(&state, tech.id).await.unwrap();
    assert!(get_option(&state, tech.id).await.unwrap().is_none());

    let items = list_trip_items(&state, trip.id).await.unwrap();
    assert_eq!(items[0].category, "Tech");

    // Removed option now sorts after registry entries
    let sections = trip_sections(
        &state,
        trip.id,
        Grouping::single(VocabularyKind::Category),
        &Filters::none(),
    )
    .await
    .unwrap();
    assert_eq!(single_keys(&sections), vec!["Clothes", "Tech"]);

    let err = remove_option(&state, tech.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_move_option_changes_section_order() {
    let state = setup().await;
    add_option(&state, VocabularyKind::Category, "Clothes").await.unwrap();
    add_option(&state, VocabularyKind::Category, "Tech").await.unwrap();
    let docs = add_option(&state, VocabularyKind::Category, "Documents").await.unwrap();

    let trip = create_trip(&state, "Conference").await.unwrap();
    add(&state, trip.id, "Shirt", "Clothes", "Bedroom").await;
    add(&state, trip.id, "Passport", "Documents", "Office").await;
    add(&state, trip.id, "Laptop", "Tech", "Office").await;

    move_option(&state, docs.id, 0).await.unwrap();

    let order = registry_order(&state).await.unwrap();
    assert_eq!(order.categories, vec!["Documents", "Clothes", "Tech"]);

    let sections = trip_sections(
        &state,
        trip.id,
        Grouping::single(VocabularyKind::Category),
        &Filters::none(),
    )
    .await
    .unwrap();
    assert_eq!(single_keys(&sections), vec!["Documents", "Clothes", "Tech"]);
}

#[tokio::test]
async fn test_trip_sections_with_filters() {
    let state = setup().await;
    add_option(&state, VocabularyKind::Group, "Morning").await.unwrap();

    let trip = create_trip(&state, "Hike").await.unwrap();
    add_item(
        &state,
        NewItem {
            group: "Morning".to_string(),
            ..new_item(trip.id, "Boots", "Clothes", "Garage")
        },
    )
    .await
    .unwrap();
    add(&state, trip.id, "Map", "Documents", "Garage").await;
    add(&state, trip.id, "Hat", "Clothes", "Bedroom").await;

    let sections = trip_sections(
        &state,
        trip.id,
        Grouping::Flat,
        &Filters::none().by_location("Garage"),
    )
    .await
    .unwrap();
    assert_eq!(sections.item_count(), 2);

    let ungrouped = trip_sections(
        &state,
        trip.id,
        Grouping::Flat,
        &Filters::none().by_group(""),
    )
    .await
    .unwrap();
    match ungrouped {
        Sections::Flat(items) => {
            let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
            assert_eq!(names, vec!["Map", "Hat"]);
        }
        other => panic!("expected flat sections, got {:?}", other),
    }
}

#[tokio::test]
async fn test_trip_sections_missing_trip() {
    let state = setup().await;
    let err = trip_sections(&state, 42, Grouping::Flat, &Filters::none())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_toggle_reset_and_statistics() {
    let state = setup().await;
    let trip = create_trip(&state, "City").await.unwrap();
    let a = add(&state, trip.id, "Socks", "Clothes", "Bedroom").await;
    let b = add(&state, trip.id, "Passport", "Documents", "Office").await;
    add(&state, trip.id, "Charger", "Tech", "Office").await;

    assert!(toggle_packed(&state, a.id).await.unwrap().is_packed);
    assert!(toggle_packed(&state, b.id).await.unwrap().is_packed);

    let stats = trip_statistics(&state, trip.id).await.unwrap();
    assert_eq!(stats.packed_count, 2);
    assert_eq!(stats.total_count, 3);
    assert!((stats.progress - 2.0 / 3.0).abs() < 1e-9);

    assert_eq!(reset_trip(&state, trip.id).await.unwrap(), 2);
    let stats = trip_statistics(&state, trip.id).await.unwrap();
    assert_eq!(stats.packed_count, 0);
    assert_eq!(stats.progress, 0.0);

    assert!(matches!(
        reset_trip(&state, 999).await,
        Err(DomainError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_empty_trip_progress_is_zero() {
    let state = setup().await;
    let trip = create_trip(&state, "Nothing yet").await.unwrap();
    let stats = trip_statistics(&state, trip.id).await.unwrap();
    assert_eq!(stats.total_count, 0);
    assert_eq!(stats.progress, 0.0);
}

#[tokio::test]
async fn test_update_item_partial() {
    let state = setup().await;
    let trip = create_trip(&state, "Camping").await.unwrap();
    let item = add(&state, trip.id, "Tent", "Misc", "Garage").await;

    let updated = update_item(
        &state,
        item.id,
        ItemChanges {
            location: Some("Basement".to_string()),
            is_packed: Some(true),
            ..ItemChanges::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Tent");
    assert_eq!(updated.location, "Basement");
    assert!(updated.is_packed);

    let err = update_item(
        &state,
        item.id,
        ItemChanges {
            name: Some(" ".to_string()),
            ..ItemChanges::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    assert_eq!(get_item(&state, item.id).await.unwrap().unwrap().name, "Tent");
}

#[tokio::test]
async fn test_duplicate_item_appends_copy() {
    let state = setup().await;
    let trip = create_trip(&state, "Beach").await.unwrap();
    let towel = add(&state, trip.id, "Towel", "Misc", "Bathroom").await;
    add(&state, trip.id, "Sunscreen", "Toiletries", "Bathroom").await;
    toggle_packed(&state, towel.id).await.unwrap();

    let copy = duplicate_item(&state, towel.id).await.unwrap();
    assert_ne!(copy.id, towel.id);
    assert_eq!(copy.name, "Copy of Towel");
    assert_eq!(copy.category, "Misc");
    assert!(!copy.is_packed);

    let items = list_trip_items(&state, trip.id).await.unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Towel", "Sunscreen", "Copy of Towel"]);
}

#[tokio::test]
async fn test_move_item_reorders_trip() {
    let state = setup().await;
    let trip = create_trip(&state, "Beach").await.unwrap();
    add(&state, trip.id, "A", "Misc", "Garage").await;
    add(&state, trip.id, "B", "Misc", "Garage").await;
    let c = add(&state, trip.id, "C", "Misc", "Garage").await;

    move_item(&state, c.id, 0).await.unwrap();

    let names: Vec<String> = list_trip_items(&state, trip.id)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["C", "A", "B"]);
}

#[tokio::test]
async fn test_duplicate_trip_resets_packed() {
    let state = setup().await;
    let trip = create_trip(&state, "Summer").await.unwrap();
    let socks = add(&state, trip.id, "Socks", "Clothes", "Bedroom").await;
    add_item(
        &state,
        NewItem {
            group: "Evening".to_string(),
            container: "Duffel".to_string(),
            is_optional: true,
            ..new_item(trip.id, "Book", "Misc", "Living Room")
        },
    )
    .await
    .unwrap();
    toggle_packed(&state, socks.id).await.unwrap();

    let copy = duplicate_trip(&state, trip.id).await.unwrap();
    assert_ne!(copy.id, trip.id);
    assert_eq!(copy.name, "Copy of Summer");
    assert_eq!(copy.items.len(), 2);
    assert!(copy.items.iter().all(|i| !i.is_packed && i.trip_id == copy.id));

    let book = copy.items.iter().find(|i| i.name == "Book").unwrap();
    assert_eq!(book.group, "Evening");
    assert_eq!(book.container, "Duffel");
    assert!(book.is_optional);

    // Source keeps its packed state
    let source = get_trip(&state, trip.id).await.unwrap().unwrap();
    assert_eq!(source.packed_count(), 1);
}

#[tokio::test]
async fn test_rename_and_delete_trip() {
    let state = setup().await;
    let trip = create_trip(&state, "Old").await.unwrap();
    let item = add(&state, trip.id, "Socks", "Clothes", "Bedroom").await;

    let renamed = rename_trip(&state, trip.id, "New").await.unwrap();
    assert_eq!(renamed.name, "New");
    assert_eq!(renamed.items.len(), 1);

    delete_trip(&state, trip.id).await.unwrap();
    assert!(get_trip(&state, trip.id).await.unwrap().is_none());
    assert!(get_item(&state, item.id).await.unwrap().is_none());

    assert!(matches!(
        rename_trip(&state, trip.id, "Again").await,
        Err(DomainError::NotFound(_))
    ));
}
