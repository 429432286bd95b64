//! JSON shapes exchanged with the inventory service.
//!
//! Field names are camelCase on the wire. Server ids may arrive as numbers or
//! strings; both become a [`ServerId`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use fridgekit_core::ServerId;
use fridgekit_inventory::{Category, InventorySnapshot, Item, Quantity};

use crate::api::{ApiError, NewIngredient};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDto {
    #[serde(deserialize_with = "id_text")]
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub category: String,
    #[serde(default, alias = "createdTime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ItemDto {
    /// Convert into a confirmed item.
    ///
    /// Items without a creation time are stamped with `received_at`.
    pub fn into_item(self, received_at: DateTime<Utc>) -> Result<Item, ApiError> {
        let id = ServerId::new(self.id).map_err(|e| ApiError::Parse(e.to_string()))?;
        let quantity = Quantity::new(self.quantity).map_err(|e| ApiError::Parse(e.to_string()))?;
        let category = self
            .category
            .parse::<Category>()
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        Ok(Item::confirmed(
            id,
            self.name,
            quantity,
            category,
            self.created_at.unwrap_or(received_at),
        ))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDto {
    #[serde(default)]
    pub ingredients: Option<Vec<ItemDto>>,
    #[serde(default)]
    pub cart_items: Option<Vec<ItemDto>>,
}

impl WorkspaceDto {
    pub fn into_snapshot(self, received_at: DateTime<Utc>) -> Result<InventorySnapshot, ApiError> {
        let convert = |items: Option<Vec<ItemDto>>| -> Result<Vec<Item>, ApiError> {
            items
                .unwrap_or_default()
                .into_iter()
                .map(|dto| dto.into_item(received_at))
                .collect()
        };
        Ok(InventorySnapshot::new(
            convert(self.ingredients)?,
            convert(self.cart_items)?,
        ))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredientDto<'a> {
    pub name: &'a str,
    pub quantity: u32,
    pub category: &'static str,
    pub icon: &'static str,
}

impl<'a> From<&'a NewIngredient> for NewIngredientDto<'a> {
    fn from(draft: &'a NewIngredient) -> Self {
        Self {
            name: &draft.name,
            quantity: draft.quantity.get(),
            category: draft.category.as_str(),
            icon: draft.category.icon(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDto {
    pub category: &'static str,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            category: category.as_str(),
        }
    }
}

/// Error body sent by the service.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDto {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

fn id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}
