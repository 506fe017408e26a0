//! Commands for items

use serde::{Deserialize, Serialize};

use crate::domain::{normalize_name, DomainError, DomainResult, Item};
use crate::repository::item::{ItemPositioningOperations, ItemTripOperations};
use crate::repository::Repository;
use crate::AppState;

/// Fields for a new item
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewItem {
    pub trip_id: u32,
    pub name: String,
    pub category: String,
    pub location: String,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub container: String,
    #[serde(default)]
    pub is_optional: bool,
}

/// Partial update; `None` leaves a field unchanged. The owning trip can
/// not be changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemChanges {
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub group: Option<String>,
    pub container: Option<String>,
    pub is_optional: Option<bool>,
    pub is_packed: Option<bool>,
}

/// Add an item to the end of a trip
pub async fn add_item(state: &AppState, new_item: NewItem) -> DomainResult<Item> {
    let name = normalize_name(&new_item.name, "item name")?;

    let item = Item::new(
        new_item.trip_id,
        name,
        new_item.category.trim().to_string(),
        new_item.location.trim().to_string(),
    )
    .with_group(new_item.group.trim())
    .with_container(new_item.container.trim())
    .optional(new_item.is_optional);

    state.item_repo.create(&item).await
}

pub async fn get_item(state: &AppState, id: u32) -> DomainResult<Option<Item>> {
    state.item_repo.find_by_id(id).await
}

/// Items of a trip in stored order
pub async fn list_trip_items(state: &AppState, trip_id: u32) -> DomainResult<Vec<Item>> {
    super::trip_cmd::require_trip(state, trip_id).await?;
    state.item_repo.list_by_trip(trip_id).await
}

pub async fn update_item(state: &AppState, id: u32, changes: ItemChanges) -> DomainResult<Item> {
    // Validate before loading so a bad name never reaches the store
    let name = changes
        .name
        .as_deref()
        .map(|n| normalize_name(n, "item name"))
        .transpose()?;

    let mut item = require_item(state, id).await?;
    if let Some(name) = name {
        item.name = name;
    }
    if let Some(category) = changes.category {
        item.category = category.trim().to_string();
    }
    if let Some(location) = changes.location {
        item.location = location.trim().to_string();
    }
    if let Some(group) = changes.group {
        item.group = group.trim().to_string();
    }
    if let Some(container) = changes.container {
        item.container = container.trim().to_string();
    }
    if let Some(is_optional) = changes.is_optional {
        item.is_optional = is_optional;
    }
    if let Some(is_packed) = changes.is_packed {
        item.is_packed = is_packed;
    }

    state.item_repo.update(&item).await
}

pub async fn delete_item(state: &AppState, id: u32) -> DomainResult<()> {
    state.item_repo.delete(id).await
}

/// Flip packed status
pub async fn toggle_packed(state: &AppState, id: u32) -> DomainResult<Item> {
    state.item_repo.toggle_packed(id).await
}

/// Copy an item within its trip as "Copy of {name}", unpacked, appended last
pub async fn duplicate_item(state: &AppState, id: u32) -> DomainResult<Item> {
    let source = require_item(state, id).await?;
    let mut copy = source.duplicate();
    copy.position = 0;
    state.item_repo.create(&copy).await
}

/// Move an item to a new position within its trip
pub async fn move_item(state: &AppState, id: u32, position: i32) -> DomainResult<()> {
    state.item_repo.move_item(id, position).await
}

async fn require_item(state: &AppState, id: u32) -> DomainResult<Item> {
    state
        .item_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("Item {} not found", id)))
}
