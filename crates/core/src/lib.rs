//! `fridgekit-core`: ids, errors and entity traits shared by the domain crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ItemId, LocalId, ServerId};
pub use value_object::ValueObject;
