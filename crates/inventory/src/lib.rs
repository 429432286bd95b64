//! Virtual refrigerator domain.
//!
//! This crate contains the inventory rules as deterministic domain logic
//! (no IO, no HTTP, no clocks beyond what callers pass in): zones and the
//! category policy, items, snapshots, and the optimistic ledger that applies
//! local changes and settles them once the inventory service answers.

pub mod item;
pub mod ledger;
pub mod policy;
pub mod snapshot;
pub mod zone;

pub use item::{Item, Quantity};
pub use ledger::{Applied, Change, Inventory, Mutation, Outcome, Reconciliation, SnapshotToken};
pub use policy::{can_drop, can_move};
pub use snapshot::InventorySnapshot;
pub use zone::{Category, Residence, Zone};
