//! Optimistic inventory ledger.
//!
//! Local changes are applied immediately through [`Inventory::apply`], which
//! hands back a [`SnapshotToken`]. When the inventory service answers, the
//! caller passes the token and the answer to [`Inventory::reconcile`]. The
//! token pins down which local change is being settled, so several changes
//! can be in flight at once without a late answer trampling a newer one.
//!
//! Only shelf-to-shelf moves are rolled back on rejection. Creates, deletes
//! and cart transfers keep their local effect whatever the service says.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use fridgekit_core::{Entity, ItemId, LocalId, ServerId};

use crate::item::{Item, Quantity};
use crate::snapshot::InventorySnapshot;
use crate::zone::{Category, Residence};

/// Handle on one applied local change.
///
/// Tokens from before the latest [`Inventory::replace`] are stale.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotToken {
    epoch: u64,
    seq: u64,
}

/// A local change request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// New fridge item.
    Add {
        name: String,
        quantity: Quantity,
        category: Category,
    },
    /// Drop an item from the fridge or the cart.
    Remove { id: ItemId, from: Residence },
    /// Cart item onto a fridge shelf.
    MoveToFridge { id: ItemId, category: Category },
    /// Fridge item into the cart.
    MoveToCart { id: ItemId },
    /// Fridge item onto another shelf.
    Recategorize { id: ItemId, category: Category },
}

/// What [`Inventory::apply`] changed locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added {
        item: Item,
    },
    Removed {
        item: Item,
        from: Residence,
    },
    /// `origin` left the cart, `item` is its provisional fridge copy.
    MovedToFridge {
        origin: Item,
        item: Item,
    },
    /// `origin` left the fridge, `item` is its provisional cart copy.
    MovedToCart {
        origin: Item,
        item: Item,
    },
    Recategorized {
        item: Item,
        from: Category,
    },
}

impl Change {
    /// The item the inventory service has to be told about, if it knows it.
    ///
    /// `None` for creates (the service has nothing yet) and for changes to
    /// items that were never acknowledged.
    pub fn server_subject(&self) -> Option<&ServerId> {
        match self {
            Change::Added { .. } => None,
            Change::Removed { item, .. } | Change::Recategorized { item, .. } => {
                item.id().server_id()
            }
            Change::MovedToFridge { origin, .. } | Change::MovedToCart { origin, .. } => {
                origin.id().server_id()
            }
        }
    }
}

/// A local change together with the token that settles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub token: SnapshotToken,
    pub change: Change,
}

/// The service's answer for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Accepted; carries the item as the service now knows it, if returned.
    Accepted(Option<Item>),
    /// Refused or failed in transit.
    Rejected,
    /// Nothing was sent (logged out, or the item was never acknowledged).
    LocalOnly,
}

/// What [`Inventory::reconcile`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A provisional item now carries its server id.
    Confirmed {
        provisional: LocalId,
        confirmed: ServerId,
    },
    /// Local state already matches; nothing to do.
    Settled,
    /// A rejected shelf move was undone; `item` is the restored record.
    RolledBack { item: Item },
    /// A newer local change owns the item; the answer was dropped.
    Superseded,
    /// The token predates the last full reload or was already settled.
    Stale,
}

#[derive(Debug, Clone)]
enum Pending {
    Create {
        provisional: ItemId,
        residence: Residence,
    },
    Delete,
    Recategorize {
        prior: InventorySnapshot,
        previous: Item,
        generation: u64,
    },
}

/// Optimistic item store state.
#[derive(Debug, Default)]
pub struct Inventory {
    snapshot: InventorySnapshot,
    epoch: u64,
    seq: u64,
    /// Bumped on every local change, used to tell whether a rollback can
    /// restore a whole snapshot.
    generation: u64,
    pending: HashMap<SnapshotToken, Pending>,
    /// Most recent in-flight token per item.
    latest: HashMap<ItemId, SnapshotToken>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> &InventorySnapshot {
        &self.snapshot
    }

    /// Number of local changes still waiting for [`Inventory::reconcile`].
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Replace the whole state, e.g. after a full reload.
    ///
    /// Every outstanding token becomes stale.
    pub fn replace(&mut self, snapshot: InventorySnapshot) {
        if !self.pending.is_empty() {
            tracing::debug!(
                discarded = self.pending.len(),
                "full reload discards in-flight local changes"
            );
        }
        self.snapshot = snapshot;
        self.epoch += 1;
        self.generation += 1;
        self.pending.clear();
        self.latest.clear();
    }

    pub fn clear(&mut self) {
        self.replace(InventorySnapshot::empty());
    }

    /// Apply a change locally.
    ///
    /// Returns `None` when the change addresses an item that is not where the
    /// caller said it was; the state is left untouched.
    pub fn apply(&mut self, mutation: Mutation, now: DateTime<Utc>) -> Option<Applied> {
        let token = self.next_token();
        let (change, pending) = match mutation {
            Mutation::Add {
                name,
                quantity,
                category,
            } => {
                let item = Item::provisional(name, quantity, category, now);
                self.snapshot.items_mut(Residence::Fridge).push(item.clone());
                let pending = Pending::Create {
                    provisional: item.id().clone(),
                    residence: Residence::Fridge,
                };
                (Change::Added { item }, pending)
            }
            Mutation::Remove { id, from } => {
                let item = self.snapshot.take(&id, from)?;
                (Change::Removed { item, from }, Pending::Delete)
            }
            Mutation::MoveToFridge { id, category } => {
                let origin = self.snapshot.take(&id, Residence::Cart)?;
                let item = origin.relocated(category);
                self.snapshot.items_mut(Residence::Fridge).push(item.clone());
                let pending = Pending::Create {
                    provisional: item.id().clone(),
                    residence: Residence::Fridge,
                };
                (Change::MovedToFridge { origin, item }, pending)
            }
            Mutation::MoveToCart { id } => {
                let origin = self.snapshot.take(&id, Residence::Fridge)?;
                let item = origin.relocated(origin.category());
                self.snapshot.items_mut(Residence::Cart).push(item.clone());
                let pending = Pending::Create {
                    provisional: item.id().clone(),
                    residence: Residence::Cart,
                };
                (Change::MovedToCart { origin, item }, pending)
            }
            Mutation::Recategorize { id, category } => {
                let prior = self.snapshot.clone();
                let entry = self.snapshot.find_mut(&id, Residence::Fridge)?;
                if entry.category() == category {
                    return None;
                }
                let previous = entry.clone();
                entry.set_category(category);
                let item = entry.clone();
                let pending = Pending::Recategorize {
                    prior,
                    previous: previous.clone(),
                    generation: self.generation + 1,
                };
                (
                    Change::Recategorized {
                        item,
                        from: previous.category(),
                    },
                    pending,
                )
            }
        };

        self.seq += 1;
        self.generation += 1;
        for id in touched(&change) {
            self.latest.insert(id.clone(), token);
        }
        self.pending.insert(token, pending);

        Some(Applied { token, change })
    }

    /// Settle a local change with the service's answer.
    pub fn reconcile(&mut self, token: SnapshotToken, answer: Reconciliation) -> Outcome {
        if token.epoch != self.epoch {
            tracing::debug!(?token, "answer predates last reload, ignoring");
            return Outcome::Stale;
        }
        let Some(pending) = self.pending.remove(&token) else {
            tracing::debug!(?token, "answer for unknown token, ignoring");
            return Outcome::Stale;
        };

        let outcome = match pending {
            Pending::Create {
                provisional,
                residence,
            } => match answer {
                Reconciliation::Accepted(Some(confirmed)) => {
                    self.confirm(token, &provisional, residence, confirmed)
                }
                _ => {
                    self.release(&provisional, token);
                    Outcome::Settled
                }
            },
            Pending::Delete => Outcome::Settled,
            Pending::Recategorize {
                prior,
                previous,
                generation,
            } => match answer {
                Reconciliation::Rejected => self.roll_back(token, prior, previous, generation),
                _ => {
                    self.release(previous.id(), token);
                    Outcome::Settled
                }
            },
        };

        self.forget(token);
        outcome
    }

    fn next_token(&self) -> SnapshotToken {
        SnapshotToken {
            epoch: self.epoch,
            seq: self.seq + 1,
        }
    }

    fn confirm(
        &mut self,
        token: SnapshotToken,
        provisional: &ItemId,
        residence: Residence,
        confirmed: Item,
    ) -> Outcome {
        let untouched = self.latest.get(provisional) == Some(&token);
        let Some(entry) = self.snapshot.find_mut(provisional, residence) else {
            tracing::warn!(
                id = %confirmed.id(),
                "service acknowledged an item that is gone locally"
            );
            self.release(provisional, token);
            return Outcome::Superseded;
        };

        let ItemId::Provisional(local) = provisional.clone() else {
            return Outcome::Settled;
        };
        let ItemId::Confirmed(server_id) = confirmed.id().clone() else {
            tracing::warn!("service answered with a provisional id, keeping local item");
            return Outcome::Settled;
        };

        if untouched {
            *entry = confirmed;
        } else {
            // Later local edits win; only the identity is adopted.
            entry.set_id(ItemId::Confirmed(server_id.clone()));
        }
        self.generation += 1;

        if let Some(newer) = self.latest.remove(provisional) {
            if newer != token {
                self.latest.insert(ItemId::Confirmed(server_id.clone()), newer);
            }
        }

        Outcome::Confirmed {
            provisional: local,
            confirmed: server_id,
        }
    }

    fn roll_back(
        &mut self,
        token: SnapshotToken,
        prior: InventorySnapshot,
        previous: Item,
        generation: u64,
    ) -> Outcome {
        if self.generation == generation {
            self.snapshot = prior;
            self.generation += 1;
            self.release(previous.id(), token);
            return Outcome::RolledBack { item: previous };
        }

        if self.latest.get(previous.id()) != Some(&token) {
            return Outcome::Superseded;
        }

        self.release(previous.id(), token);
        match self.snapshot.find_mut(previous.id(), Residence::Fridge) {
            Some(entry) => {
                *entry = previous.clone();
                self.generation += 1;
                Outcome::RolledBack { item: previous }
            }
            None => Outcome::Superseded,
        }
    }

    /// Drop the per-item marker if `token` still owns it.
    fn release(&mut self, id: &ItemId, token: SnapshotToken) {
        if self.latest.get(id) == Some(&token) {
            self.latest.remove(id);
        }
    }

    fn forget(&mut self, token: SnapshotToken) {
        self.latest.retain(|_, owner| *owner != token);
    }
}

fn touched(change: &Change) -> Vec<&ItemId> {
    match change {
        Change::Added { item }
        | Change::Removed { item, .. }
        | Change::Recategorized { item, .. } => vec![item.id()],
        Change::MovedToFridge { origin, item } | Change::MovedToCart { origin, item } => {
            vec![origin.id(), item.id()]
        }
    }
}
