//! Fridge view state: the door and the shelf layout.

use fridgekit_inventory::{Category, InventorySnapshot, Item};

use crate::container::ZoneContainer;

/// One compartment of the fridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chamber {
    Refrigerator,
    Freezer,
}

impl Chamber {
    pub const ALL: [Chamber; 2] = [Chamber::Refrigerator, Chamber::Freezer];

    pub fn title(&self) -> &'static str {
        match self {
            Chamber::Refrigerator => "Refrigerator",
            Chamber::Freezer => "Freezer",
        }
    }

    /// Shelves in display order.
    pub fn shelves(&self) -> &'static [Category] {
        match self {
            Chamber::Refrigerator => &[Category::Vegetable, Category::Meat, Category::Other],
            Chamber::Freezer => &[Category::Freezer],
        }
    }
}

/// A shelf ready to render: its drop target and its items.
#[derive(Debug, Clone, PartialEq)]
pub struct Shelf<'a> {
    pub chamber: Chamber,
    pub category: Category,
    pub title: &'static str,
    pub container: ZoneContainer,
    pub items: Vec<&'a Item>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FridgeView {
    door_open: bool,
}

impl FridgeView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.door_open
    }

    pub fn toggle_door(&mut self) {
        self.door_open = !self.door_open;
    }

    /// Shelves behind the door; nothing is visible while it is closed.
    pub fn shelves<'a>(&self, snapshot: &'a InventorySnapshot) -> Vec<Shelf<'a>> {
        if !self.door_open {
            return Vec::new();
        }
        Chamber::ALL
            .iter()
            .flat_map(|chamber| {
                chamber.shelves().iter().map(move |category| Shelf {
                    chamber: *chamber,
                    category: *category,
                    title: category.title(),
                    container: ZoneContainer::shelf(*category),
                    items: snapshot.shelf(*category).collect(),
                })
            })
            .collect()
    }
}
