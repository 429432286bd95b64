//! Add-item form state.

use fridgekit_inventory::{Category, Quantity};

use crate::api::NewIngredient;
use crate::notify::NotificationSink;

pub const EMPTY_NAME_NOTICE: &str = "Please enter an ingredient name!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemForm {
    pub name: String,
    pub quantity: String,
    pub category: Category,
}

impl Default for AddItemForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: "1".to_string(),
            category: Category::Vegetable,
        }
    }
}

impl AddItemForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity as typed, or 1 when the text is not a positive integer.
    pub fn parsed_quantity(&self) -> Quantity {
        self.quantity.trim().parse().unwrap_or_default()
    }

    /// Validate and take the draft, resetting the form.
    ///
    /// A blank name leaves the form as is and shows a notice instead.
    pub fn submit(&mut self, notifier: &dyn NotificationSink) -> Option<NewIngredient> {
        let name = self.name.trim();
        if name.is_empty() {
            notifier.show(EMPTY_NAME_NOTICE);
            return None;
        }

        let draft = NewIngredient {
            name: name.to_string(),
            quantity: self.parsed_quantity(),
            category: self.category,
        };
        *self = Self::default();
        Some(draft)
    }
}
