//! Full inventory state, partitioned by residence.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fridgekit_core::{Entity, ItemId};

use crate::item::Item;
use crate::zone::{Category, Residence};

/// Every item, fridge and cart, at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    fridge: Vec<Item>,
    cart: Vec<Item>,
}

impl InventorySnapshot {
    pub fn new(fridge: Vec<Item>, cart: Vec<Item>) -> Self {
        Self { fridge, cart }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn fridge(&self) -> &[Item] {
        &self.fridge
    }

    pub fn cart(&self) -> &[Item] {
        &self.cart
    }

    pub fn items(&self, residence: Residence) -> &[Item] {
        match residence {
            Residence::Fridge => &self.fridge,
            Residence::Cart => &self.cart,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fridge.is_empty() && self.cart.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fridge.len() + self.cart.len()
    }

    pub fn find(&self, id: &ItemId, residence: Residence) -> Option<&Item> {
        self.items(residence).iter().find(|item| item.is(id))
    }

    /// Fridge items on one shelf, in insertion order.
    pub fn shelf(&self, category: Category) -> impl Iterator<Item = &Item> {
        self.fridge
            .iter()
            .filter(move |item| item.category() == category)
    }

    /// Cart items grouped by their category.
    pub fn cart_by_category(&self) -> BTreeMap<Category, Vec<&Item>> {
        let mut groups: BTreeMap<Category, Vec<&Item>> = BTreeMap::new();
        for item in &self.cart {
            groups.entry(item.category()).or_default().push(item);
        }
        groups
    }

    pub(crate) fn items_mut(&mut self, residence: Residence) -> &mut Vec<Item> {
        match residence {
            Residence::Fridge => &mut self.fridge,
            Residence::Cart => &mut self.cart,
        }
    }

    pub(crate) fn find_mut(&mut self, id: &ItemId, residence: Residence) -> Option<&mut Item> {
        self.items_mut(residence).iter_mut().find(|item| item.is(id))
    }

    pub(crate) fn take(&mut self, id: &ItemId, residence: Residence) -> Option<Item> {
        let items = self.items_mut(residence);
        let pos = items.iter().position(|item| item.is(id))?;
        Some(items.remove(pos))
    }
}
