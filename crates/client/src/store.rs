//! Item store: optimistic local state reconciled with the inventory service.
//!
//! Every operation applies its change to the local [`Inventory`] before the
//! first `.await`, then talks to the service and settles the change with the
//! answer. The lock around the inventory is never held across an `.await`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;

use fridgekit_core::{ItemId, ServerId};
use fridgekit_inventory::{
    Applied, Category, Change, Inventory, InventorySnapshot, Item, Mutation, Outcome, Quantity,
    Reconciliation, Residence, SnapshotToken, Zone,
};

use crate::api::{ApiError, InventoryApi, NewIngredient};
use crate::auth::AuthState;
use crate::notify::NotificationSink;

struct Shared {
    inventory: Mutex<Inventory>,
    loads: AtomicUsize,
    api: Arc<dyn InventoryApi>,
    notifier: Arc<dyn NotificationSink>,
    auth: AuthState,
}

/// Shared handle on the fridge and cart contents.
#[derive(Clone)]
pub struct ItemStore {
    shared: Arc<Shared>,
}

impl ItemStore {
    pub fn new(
        api: Arc<dyn InventoryApi>,
        notifier: Arc<dyn NotificationSink>,
        auth: AuthState,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                inventory: Mutex::new(Inventory::new()),
                loads: AtomicUsize::new(0),
                api,
                notifier,
                auth,
            }),
        }
    }

    pub fn auth(&self) -> &AuthState {
        &self.shared.auth
    }

    pub fn snapshot(&self) -> InventorySnapshot {
        self.with_inventory(|inventory| inventory.snapshot().clone())
    }

    pub fn fridge_items(&self) -> Vec<Item> {
        self.with_inventory(|inventory| inventory.snapshot().fridge().to_vec())
    }

    pub fn cart_items(&self) -> Vec<Item> {
        self.with_inventory(|inventory| inventory.snapshot().cart().to_vec())
    }

    /// True while at least one [`ItemStore::load`] is running.
    pub fn is_loading(&self) -> bool {
        self.shared.loads.load(Ordering::Acquire) > 0
    }

    /// Local changes still waiting for a service answer.
    pub fn in_flight(&self) -> usize {
        self.with_inventory(|inventory| inventory.in_flight())
    }

    /// Replace both collections with the service's workspace.
    ///
    /// Logged out, or on any failure, the store ends up empty.
    pub async fn load(&self) {
        let _loading = LoadGuard::enter(&self.shared.loads);

        if !self.shared.auth.is_logged_in() {
            tracing::debug!("logged out, clearing inventory");
            self.with_inventory(Inventory::clear);
            return;
        }

        match self.shared.api.fetch_workspace().await {
            Ok(snapshot) => {
                tracing::info!(
                    fridge = snapshot.fridge().len(),
                    cart = snapshot.cart().len(),
                    "workspace loaded"
                );
                self.with_inventory(|inventory| inventory.replace(snapshot));
            }
            Err(err) => {
                tracing::error!(error = %err, "loading workspace failed");
                self.with_inventory(Inventory::clear);
            }
        }
    }

    /// Add a fridge item. The provisional item is visible immediately and
    /// stays even when the service refuses it.
    pub async fn add_item(
        &self,
        name: impl Into<String>,
        quantity: Quantity,
        category: Category,
    ) -> Option<Outcome> {
        let name = name.into();
        let applied = self.apply(Mutation::Add {
            name: name.clone(),
            quantity,
            category,
        })?;

        let answer = if self.shared.auth.is_logged_in() {
            let draft = NewIngredient {
                name,
                quantity,
                category,
            };
            answer_with_item(
                self.shared.api.create_ingredient(&draft).await,
                "creating ingredient failed, keeping local item",
            )
        } else {
            Reconciliation::LocalOnly
        };

        Some(self.reconcile(applied.token, answer))
    }

    /// Remove an item from the fridge or the cart. Removing an absent item
    /// does nothing; failures are logged and never undone.
    pub async fn remove_item(&self, id: &ItemId, from: Residence) -> Option<Outcome> {
        let applied = self.apply(Mutation::Remove {
            id: id.clone(),
            from,
        })?;

        let answer = match self.subject(&applied) {
            Some(server_id) => {
                let result = match from {
                    Residence::Fridge => self.shared.api.delete_ingredient(&server_id).await,
                    Residence::Cart => self.shared.api.delete_cart_item(&server_id).await,
                };
                match result {
                    Ok(()) => Reconciliation::Accepted(None),
                    Err(err) => {
                        tracing::warn!(error = %err, id = %server_id, "delete failed, keeping local removal");
                        Reconciliation::Rejected
                    }
                }
            }
            None => Reconciliation::LocalOnly,
        };

        Some(self.reconcile(applied.token, answer))
    }

    /// Move an item to `target`. The category policy is not consulted here;
    /// containers decide what may be dropped.
    pub async fn move_item(&self, id: &ItemId, target: Zone, source: Residence) -> Option<Outcome> {
        match (source, target.category()) {
            (Residence::Cart, Some(category)) => self.move_to_fridge(id, category).await,
            (Residence::Fridge, None) => self.move_to_cart(id).await,
            (Residence::Fridge, Some(category)) => self.recategorize(id, category).await,
            (Residence::Cart, None) => {
                tracing::debug!(%id, "cart item dropped on the cart, nothing to do");
                None
            }
        }
    }

    async fn move_to_fridge(&self, id: &ItemId, category: Category) -> Option<Outcome> {
        let applied = self.apply(Mutation::MoveToFridge {
            id: id.clone(),
            category,
        })?;

        let answer = match self.subject(&applied) {
            Some(server_id) => answer_with_item(
                self.shared.api.move_to_fridge(&server_id, category).await,
                "moving cart item to the fridge failed, keeping local move",
            ),
            None => Reconciliation::LocalOnly,
        };

        Some(self.reconcile(applied.token, answer))
    }

    async fn move_to_cart(&self, id: &ItemId) -> Option<Outcome> {
        let applied = self.apply(Mutation::MoveToCart { id: id.clone() })?;
        if let Change::MovedToCart { origin, .. } = &applied.change {
            self.notify(&format!("'{}' moved to the cart.", origin.name()));
        }

        let answer = match self.subject(&applied) {
            Some(server_id) => answer_with_item(
                self.shared.api.move_to_cart(&server_id).await,
                "moving item to the cart failed, keeping local move",
            ),
            None => Reconciliation::LocalOnly,
        };

        Some(self.reconcile(applied.token, answer))
    }

    async fn recategorize(&self, id: &ItemId, category: Category) -> Option<Outcome> {
        let applied = self.apply(Mutation::Recategorize {
            id: id.clone(),
            category,
        })?;
        let name = match &applied.change {
            Change::Recategorized { item, .. } => item.name().to_string(),
            _ => String::new(),
        };

        let Some(server_id) = self.subject(&applied) else {
            return Some(self.reconcile(applied.token, Reconciliation::LocalOnly));
        };

        match self.shared.api.update_category(&server_id, category).await {
            Ok(()) => {
                self.notify(&format!("'{}' moved to the {} shelf.", name, category.title()));
                Some(self.reconcile(applied.token, Reconciliation::Accepted(None)))
            }
            Err(err) => {
                tracing::warn!(error = %err, id = %server_id, "shelf move refused, rolling back");
                let outcome = self.reconcile(applied.token, Reconciliation::Rejected);
                if outcome != Outcome::Stale {
                    self.notify(&refusal_notice(&err, category));
                }
                Some(outcome)
            }
        }
    }

    fn apply(&self, mutation: Mutation) -> Option<Applied> {
        let applied = self.with_inventory(|inventory| inventory.apply(mutation, Utc::now()));
        if applied.is_none() {
            tracing::debug!("item not found where expected, nothing applied");
        }
        applied
    }

    fn reconcile(&self, token: SnapshotToken, answer: Reconciliation) -> Outcome {
        let outcome = self.with_inventory(|inventory| inventory.reconcile(token, answer));
        tracing::debug!(?token, ?outcome, "reconciled");
        outcome
    }

    /// Server id to report the change under, or `None` for local-only handling.
    fn subject(&self, applied: &Applied) -> Option<ServerId> {
        if !self.shared.auth.is_logged_in() {
            return None;
        }
        applied.change.server_subject().cloned()
    }

    fn notify(&self, message: &str) {
        self.shared.notifier.show(message);
    }

    fn with_inventory<R>(&self, f: impl FnOnce(&mut Inventory) -> R) -> R {
        let mut inventory = self
            .shared
            .inventory
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut inventory)
    }
}

impl std::fmt::Debug for ItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemStore")
            .field("logged_in", &self.shared.auth.is_logged_in())
            .field("loading", &self.is_loading())
            .finish_non_exhaustive()
    }
}

fn answer_with_item(result: Result<Item, ApiError>, failure: &'static str) -> Reconciliation {
    match result {
        Ok(item) => Reconciliation::Accepted(Some(item)),
        Err(err) => {
            tracing::warn!(error = %err, "{}", failure);
            Reconciliation::Rejected
        }
    }
}

fn refusal_notice(err: &ApiError, category: Category) -> String {
    match err.reason() {
        Some(reason) => reason.to_string(),
        None => format!("Cannot move to '{}'.", category.title()),
    }
}

struct LoadGuard<'a>(&'a AtomicUsize);

impl<'a> LoadGuard<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::AcqRel);
        Self(counter)
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}
