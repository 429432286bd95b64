use core::num::NonZeroU32;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fridgekit_core::{DomainError, DomainResult, Entity, ItemId, ServerId, ValueObject};

use crate::zone::Category;

/// Positive item count.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quantity(NonZeroU32);

impl Quantity {
    pub const ONE: Quantity = Quantity(NonZeroU32::MIN);

    pub fn new(value: u32) -> DomainResult<Self> {
        NonZeroU32::new(value)
            .map(Self)
            .ok_or_else(|| DomainError::validation("quantity must be positive"))
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl ValueObject for Quantity {}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s
            .trim()
            .parse::<u32>()
            .map_err(|e| DomainError::validation(format!("quantity: {}", e)))?;
        Self::new(value)
    }
}

/// One inventory unit, resident either on a fridge shelf or in the cart.
///
/// Cart items keep the category they last had so they can go back onto a
/// matching shelf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
    quantity: Quantity,
    category: Category,
    created_at: DateTime<Utc>,
}

impl Item {
    /// A locally created item awaiting acknowledgement.
    pub fn provisional(
        name: impl Into<String>,
        quantity: Quantity,
        category: Category,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ItemId::provisional(),
            name: name.into(),
            quantity,
            category,
            created_at,
        }
    }

    /// An item as the inventory service knows it.
    pub fn confirmed(
        id: ServerId,
        name: impl Into<String>,
        quantity: Quantity,
        category: Category,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ItemId::Confirmed(id),
            name: name.into(),
            quantity,
            category,
            created_at,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn icon(&self) -> &'static str {
        self.category.icon()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_provisional(&self) -> bool {
        self.id.is_provisional()
    }

    /// Copy of this item for another collection, under a fresh provisional id.
    ///
    /// Name, quantity and creation time carry over.
    pub fn relocated(&self, category: Category) -> Self {
        Self {
            id: ItemId::provisional(),
            name: self.name.clone(),
            quantity: self.quantity,
            category,
            created_at: self.created_at,
        }
    }

    pub(crate) fn set_category(&mut self, category: Category) {
        self.category = category;
    }

    pub(crate) fn set_id(&mut self, id: ItemId) {
        self.id = id;
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
