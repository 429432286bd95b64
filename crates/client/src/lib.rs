//! `fridgekit-client`
//!
//! **Responsibility:** the async side of the virtual fridge.
//!
//! This crate provides:
//! - The inventory service port ([`InventoryApi`]) and its reqwest adapter
//! - The optimistic [`ItemStore`]
//! - Drag session, drop containers, add form and fridge view state
//! - Configuration from the environment
//!
//! The inventory service stays the authority; local changes are optimistic
//! and settled through `fridgekit-inventory`'s ledger.

pub mod api;
pub mod auth;
pub mod config;
pub mod container;
pub mod drag;
pub mod form;
pub mod http;
pub mod notify;
pub mod store;
pub mod view;
pub mod wire;

pub use api::{ApiError, InventoryApi, NewIngredient, StaticToken, TokenProvider};
pub use auth::AuthState;
pub use config::{ClientConfig, ConfigError};
pub use container::{DropIndicator, DropResult, ZoneContainer};
pub use drag::{DragPayload, DragSession, Point};
pub use form::AddItemForm;
pub use http::HttpInventoryApi;
pub use notify::{ChannelSink, Notice, NotificationSink};
pub use store::ItemStore;
pub use view::{Chamber, FridgeView};
