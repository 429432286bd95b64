//! Zones of the virtual refrigerator.
//!
//! A [`Category`] is the food shelf an item belongs on. A [`Zone`] is anything
//! an item can be dropped into: one of the four shelves, or the cart.
//! [`Residence`] says which collection currently owns an item.

use core::str::FromStr;

use fridgekit_core::DomainError;
use serde::{Deserialize, Serialize};

/// Refrigerator shelf category (closed set).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Vegetable,
    Meat,
    Other,
    Freezer,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Vegetable,
        Category::Meat,
        Category::Other,
        Category::Freezer,
    ];

    /// Wire key agreed with the inventory service.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Vegetable => "vegetable",
            Category::Meat => "meat",
            Category::Other => "other",
            Category::Freezer => "freezer",
        }
    }

    /// Display glyph.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Vegetable => "🥕",
            Category::Meat => "🥩",
            Category::Freezer => "🧊",
            Category::Other => "🧀",
        }
    }

    /// Human-readable shelf title.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Vegetable => "Vegetables",
            Category::Meat => "Meat",
            Category::Other => "Other",
            Category::Freezer => "Freezer",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vegetable" => Ok(Category::Vegetable),
            "meat" => Ok(Category::Meat),
            "other" => Ok(Category::Other),
            "freezer" => Ok(Category::Freezer),
            other => Err(DomainError::unknown_zone(other)),
        }
    }
}

/// Drop target zone: a shelf or the cart.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Vegetable,
    Meat,
    Other,
    Freezer,
    Cart,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::Vegetable,
        Zone::Meat,
        Zone::Other,
        Zone::Freezer,
        Zone::Cart,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Vegetable => "vegetable",
            Zone::Meat => "meat",
            Zone::Other => "other",
            Zone::Freezer => "freezer",
            Zone::Cart => "cart",
        }
    }

    /// The shelf category, or `None` for the cart.
    pub fn category(&self) -> Option<Category> {
        match self {
            Zone::Vegetable => Some(Category::Vegetable),
            Zone::Meat => Some(Category::Meat),
            Zone::Other => Some(Category::Other),
            Zone::Freezer => Some(Category::Freezer),
            Zone::Cart => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self.category() {
            Some(category) => category.title(),
            None => "Cart",
        }
    }
}

impl From<Category> for Zone {
    fn from(value: Category) -> Self {
        match value {
            Category::Vegetable => Zone::Vegetable,
            Category::Meat => Zone::Meat,
            Category::Other => Zone::Other,
            Category::Freezer => Zone::Freezer,
        }
    }
}

impl core::fmt::Display for Zone {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Zone {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "cart" {
            return Ok(Zone::Cart);
        }
        s.parse::<Category>().map(Zone::from)
    }
}

/// Which collection owns an item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Residence {
    Fridge,
    Cart,
}

impl Residence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Residence::Fridge => "fridge",
            Residence::Cart => "cart",
        }
    }
}

impl core::fmt::Display for Residence {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
