//! Drop targets.
//!
//! A [`ZoneContainer`] is bound to one zone. It answers whether the current
//! drag may land on it and, on an accepted drop, forwards the move to the
//! [`ItemStore`]. It never touches inventory state itself.

use fridgekit_inventory::{Category, Outcome, Residence, Zone, can_drop};

use crate::drag::{DragPayload, DragSession};
use crate::store::ItemStore;

/// Visual state of a container while something is dragged over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIndicator {
    Neutral,
    Droppable,
    NotDroppable,
}

/// Which rule a container applies to incoming payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DropRule {
    /// Shelves: the category policy.
    CategoryPolicy,
    /// The cart: anything coming out of the fridge.
    FromFridge,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DropResult {
    Refused,
    /// Forwarded to the store; `None` when the store found nothing to move.
    Moved(Option<Outcome>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneContainer {
    zone: Zone,
    rule: DropRule,
}

impl ZoneContainer {
    pub fn shelf(category: Category) -> Self {
        Self {
            zone: Zone::from(category),
            rule: DropRule::CategoryPolicy,
        }
    }

    pub fn cart() -> Self {
        Self {
            zone: Zone::Cart,
            rule: DropRule::FromFridge,
        }
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    pub fn accepts(&self, payload: &DragPayload) -> bool {
        match self.rule {
            DropRule::CategoryPolicy => can_drop(payload.category, self.zone),
            DropRule::FromFridge => payload.source == Residence::Fridge,
        }
    }

    /// Indicator for this container given the current drag.
    ///
    /// Neutral unless a drag is in progress and hovering this container.
    pub fn indicator(&self, session: &DragSession) -> DropIndicator {
        let hovered = session.hovered_zone() == Some(self.zone);
        match session.payload() {
            Some(payload) if hovered => {
                if self.accepts(payload) {
                    DropIndicator::Droppable
                } else {
                    DropIndicator::NotDroppable
                }
            }
            _ => DropIndicator::Neutral,
        }
    }

    /// Handle a drop on this container.
    pub async fn accept_drop(&self, payload: &DragPayload, store: &ItemStore) -> DropResult {
        if !self.accepts(payload) {
            tracing::debug!(
                id = %payload.id,
                zone = %self.zone,
                "drop refused"
            );
            return DropResult::Refused;
        }
        DropResult::Moved(store.move_item(&payload.id, self.zone, payload.source).await)
    }
}
