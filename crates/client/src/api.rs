//! Inventory service port.
//!
//! The store only talks to the service through [`InventoryApi`], so it can be
//! driven by the reqwest adapter in [`crate::http`] or by a test double.

use async_trait::async_trait;
use thiserror::Error;

use fridgekit_core::ServerId;
use fridgekit_inventory::{Category, InventorySnapshot, Item, Quantity};

/// Fields of an ingredient that does not exist on the service yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIngredient {
    pub name: String,
    pub quantity: Quantity,
    pub category: Category,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// No response at all (connection refused, timeout, DNS).
    #[error("network error: {0}")]
    Network(String),
    /// The service answered with a non-success status.
    #[error("API error ({status}){}", detail(.message))]
    Api { status: u16, message: Option<String> },
    /// The response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),
    /// The auth provider could not produce a token.
    #[error("token error: {0}")]
    Token(String),
}

impl ApiError {
    /// Reason reported by the service, if it sent one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            ApiError::Api {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// Text suitable for a transient notice.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Cannot reach the server. Please try again shortly.".to_string()
            }
            ApiError::Api { status: 401, .. } => {
                "Authentication failed. Please log in again.".to_string()
            }
            ApiError::Api { status: 403, .. } => {
                "You do not have permission to do that.".to_string()
            }
            ApiError::Api { status: 404, .. } => {
                "The requested item could not be found.".to_string()
            }
            ApiError::Api { status: 500, .. } => {
                "The server ran into a problem. Please contact an administrator.".to_string()
            }
            other => format!("Something went wrong: {}", other),
        }
    }
}

fn detail(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {}", m))
        .unwrap_or_default()
}

/// Inventory REST endpoints, one method per call.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// `GET /api/workspace`
    async fn fetch_workspace(&self) -> Result<InventorySnapshot, ApiError>;

    /// `POST /api/ingredients`
    async fn create_ingredient(&self, draft: &NewIngredient) -> Result<Item, ApiError>;

    /// `DELETE /api/ingredients/{id}`
    async fn delete_ingredient(&self, id: &ServerId) -> Result<(), ApiError>;

    /// `PATCH /api/ingredients/{id}/category`
    async fn update_category(&self, id: &ServerId, category: Category) -> Result<(), ApiError>;

    /// `POST /api/ingredients/{id}/move-to-cart`
    async fn move_to_cart(&self, id: &ServerId) -> Result<Item, ApiError>;

    /// `DELETE /api/cart/{id}`
    async fn delete_cart_item(&self, id: &ServerId) -> Result<(), ApiError>;

    /// `POST /api/cart/{id}/move-to-fridge`
    async fn move_to_fridge(&self, id: &ServerId, category: Category) -> Result<Item, ApiError>;
}

/// Source of bearer tokens (the auth provider).
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Current token, or `None` when nobody is signed in.
    async fn bearer_token(&self) -> Result<Option<String>, ApiError>;
}

/// Fixed token, e.g. from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: Option<String>) -> Self {
        Self(token)
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn bearer_token(&self) -> Result<Option<String>, ApiError> {
        Ok(self.0.clone())
    }
}
