//! reqwest adapter for [`InventoryApi`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use fridgekit_core::ServerId;
use fridgekit_inventory::{Category, InventorySnapshot, Item};

use crate::api::{ApiError, InventoryApi, NewIngredient, TokenProvider};
use crate::config::ClientConfig;
use crate::wire::{CategoryDto, ErrorDto, ItemDto, NewIngredientDto, WorkspaceDto};

/// HTTP client for the inventory service.
///
/// Every request goes to `{api_url}/api{path}` with the configured timeout
/// and, when the token provider has one, a bearer token. Failures are only
/// logged here; deciding what the user sees is the store's job.
#[derive(Clone)]
pub struct HttpInventoryApi {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl HttpInventoryApi {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            client,
            base_url: format!("{}/api", config.api_url.trim_end_matches('/')),
            tokens,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let mut req = self.client.request(method, self.url(path));
        if let Some(token) = self.tokens.bearer_token().await? {
            req = req.bearer_auth(token);
        }
        Ok(req)
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let result = match req.send().await {
            Ok(resp) if resp.status().is_success() => Ok(resp),
            Ok(resp) => {
                let status = resp.status().as_u16();
                let message = resp
                    .json::<ErrorDto>()
                    .await
                    .ok()
                    .and_then(|body| body.message);
                Err(ApiError::Api { status, message })
            }
            Err(e) => Err(ApiError::Network(e.to_string())),
        };

        if let Err(err) = &result {
            tracing::warn!(error = %err, "inventory request failed");
        }
        result
    }

    async fn call_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = self.send(req).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn call_item(&self, req: RequestBuilder) -> Result<Item, ApiError> {
        let dto: ItemDto = self.call_json(req).await?;
        dto.into_item(Utc::now())
    }

    async fn call_empty(&self, req: RequestBuilder) -> Result<(), ApiError> {
        self.send(req).await.map(|_| ())
    }

    async fn with_body<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<RequestBuilder, ApiError> {
        Ok(self.request(method, path).await?.json(body))
    }
}

#[async_trait]
impl InventoryApi for HttpInventoryApi {
    async fn fetch_workspace(&self) -> Result<InventorySnapshot, ApiError> {
        let req = self.request(Method::GET, "/workspace").await?;
        let workspace: WorkspaceDto = self.call_json(req).await?;
        workspace.into_snapshot(Utc::now())
    }

    async fn create_ingredient(&self, draft: &NewIngredient) -> Result<Item, ApiError> {
        let req = self
            .with_body(Method::POST, "/ingredients", &NewIngredientDto::from(draft))
            .await?;
        self.call_item(req).await
    }

    async fn delete_ingredient(&self, id: &ServerId) -> Result<(), ApiError> {
        let req = self
            .request(Method::DELETE, &format!("/ingredients/{}", id))
            .await?;
        self.call_empty(req).await
    }

    async fn update_category(&self, id: &ServerId, category: Category) -> Result<(), ApiError> {
        let req = self
            .with_body(
                Method::PATCH,
                &format!("/ingredients/{}/category", id),
                &CategoryDto::from(category),
            )
            .await?;
        self.call_empty(req).await
    }

    async fn move_to_cart(&self, id: &ServerId) -> Result<Item, ApiError> {
        let req = self
            .request(Method::POST, &format!("/ingredients/{}/move-to-cart", id))
            .await?;
        self.call_item(req).await
    }

    async fn delete_cart_item(&self, id: &ServerId) -> Result<(), ApiError> {
        let req = self
            .request(Method::DELETE, &format!("/cart/{}", id))
            .await?;
        self.call_empty(req).await
    }

    async fn move_to_fridge(&self, id: &ServerId, category: Category) -> Result<Item, ApiError> {
        let req = self
            .with_body(
                Method::POST,
                &format!("/cart/{}/move-to-fridge", id),
                &CategoryDto::from(category),
            )
            .await?;
        self.call_item(req).await
    }
}
