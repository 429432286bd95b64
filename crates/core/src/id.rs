//! Strongly-typed item identifiers.
//!
//! An item is either *provisional* (created locally, not yet acknowledged by
//! the inventory service) or *confirmed* (carries the id the service issued).
//! The distinction is a tag on [`ItemId`], never a convention on the id text.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Locally generated placeholder identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalId(Uuid);

impl LocalId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

}

impl Default for LocalId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for LocalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for LocalId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid =
            Uuid::from_str(s).map_err(|e| DomainError::invalid_id(format!("LocalId: {}", e)))?;
        Ok(Self(uuid))
    }
}

/// Identifier issued by the inventory service.
///
/// Opaque: the service may hand out numeric or textual ids, both are kept in
/// their textual form and only ever compared or echoed back in request paths.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerId(String);

impl ServerId {
    pub fn new(id: impl Into<String>) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::invalid_id("ServerId: empty"));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ServerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ServerId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Identity of an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "id", rename_all = "lowercase")]
pub enum ItemId {
    /// Not yet acknowledged by the inventory service.
    Provisional(LocalId),
    /// Acknowledged; the service knows the item by this id.
    Confirmed(ServerId),
}

impl ItemId {
    /// Mint a fresh provisional id.
    pub fn provisional() -> Self {
        ItemId::Provisional(LocalId::new())
    }

    pub fn is_provisional(&self) -> bool {
        matches!(self, ItemId::Provisional(_))
    }

    /// The server id, if the item has been acknowledged.
    pub fn server_id(&self) -> Option<&ServerId> {
        match self {
            ItemId::Confirmed(id) => Some(id),
            ItemId::Provisional(_) => None,
        }
    }
}

impl From<ServerId> for ItemId {
    fn from(value: ServerId) -> Self {
        ItemId::Confirmed(value)
    }
}

impl From<LocalId> for ItemId {
    fn from(value: LocalId) -> Self {
        ItemId::Provisional(value)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ItemId::Provisional(id) => write!(f, "provisional:{}", id),
            ItemId::Confirmed(id) => write!(f, "{}", id),
        }
    }
}
