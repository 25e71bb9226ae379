//! # Remote Cart Client - REST Client for the Cart API
//!
//! This module provides the HTTP client the [`crate::store::CartStore`] uses
//! to talk to the authoritative server-side cart, plus the [`RemoteCart`]
//! trait the store actually depends on.
//!
//! ## REST Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Cart API Round Trips                              │
//! │                                                                         │
//! │  fetch()            GET    {base}/cart          → { data: { items,     │
//! │                                                      summary } }        │
//! │  add(..)            POST   {base}/cart          → { data: { item } }   │
//! │                       body { productId, quantity, options }             │
//! │  remove(id)         DELETE {base}/cart/item/{id}                        │
//! │  update_quantity()  PATCH  {base}/cart/item/{id}                        │
//! │                       body { quantity }                                 │
//! │  clear()            DELETE {base}/cart/clear                            │
//! │                                                                         │
//! │  One request/response each. No retries. No client-side timeout beyond  │
//! │  the configured transport defaults.                                     │
//! │                                                                         │
//! │  Error bodies: { "message": "..." } (message optional).                 │
//! │  No response at all (connect/DNS/timeout) → CartError::Transport.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use souk_core::types::{CartItem, CartSummary, SelectedOptions};

use crate::config::CartClientConfig;
use crate::error::{CartError, CartResult};

// =============================================================================
// Wire Types
// =============================================================================

/// Success envelope the cart API wraps every body in.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Error body shape. `message` is optional; transport failures have none.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// The server's view of the cart, returned by `fetch`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartPayload {
    /// Cart lines in insertion order.
    #[serde(default)]
    pub items: Vec<CartItem>,

    /// Server-computed totals. Older deployments omit this; the store
    /// recomputes from the items when absent.
    #[serde(default)]
    pub summary: Option<CartSummary>,
}

/// The server-confirmed line returned by `add`.
///
/// Carries the authoritative quantity and timestamp; the store supplies the
/// product snapshot it already holds when appending the line locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmedItem {
    pub product_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub selected_options: SelectedOptions,
    #[serde(default = "Utc::now")]
    pub added_at: DateTime<Utc>,
}

/// Body of the `add` response envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AddData {
    pub item: ConfirmedItem,
}

/// Request body for `add`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddRequest<'a> {
    product_id: &'a str,
    quantity: i64,
    options: &'a SelectedOptions,
}

/// Request body for `update_quantity`.
#[derive(Debug, Serialize)]
struct UpdateRequest {
    quantity: i64,
}

// =============================================================================
// RemoteCart Trait
// =============================================================================

/// The request/response contract the store depends on.
///
/// Five operations, each a single round trip. The store is generic over
/// this trait, so tests drive it with a scripted in-memory implementation
/// and production wires in [`HttpCartClient`].
#[async_trait]
pub trait RemoteCart: Send + Sync {
    /// Fetches the full server-side cart.
    async fn fetch(&self) -> CartResult<CartPayload>;

    /// Adds a product to the server-side cart.
    async fn add(
        &self,
        product_id: &str,
        quantity: i64,
        options: &SelectedOptions,
    ) -> CartResult<ConfirmedItem>;

    /// Removes a product's line from the server-side cart.
    async fn remove(&self, product_id: &str) -> CartResult<()>;

    /// Sets the quantity of a product's line on the server-side cart.
    async fn update_quantity(&self, product_id: &str, quantity: i64) -> CartResult<()>;

    /// Empties the server-side cart.
    async fn clear(&self) -> CartResult<()>;
}

// =============================================================================
// HTTP Client
// =============================================================================

/// reqwest-backed [`RemoteCart`] implementation.
pub struct HttpCartClient {
    http: reqwest::Client,
    base_url: Url,
    session_token: Option<String>,
    client_id: String,
}

impl HttpCartClient {
    /// Creates a client from the given configuration.
    ///
    /// The session token (if any) comes in through the config: explicitly
    /// owned by the caller, never read from ambient storage.
    pub fn new(config: &CartClientConfig) -> CartResult<Self> {
        config.validate()?;
        let base_url = config.parsed_api_url()?;

        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout());

        if !config.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|e| CartError::InvalidConfig(format!("http client: {}", e)))?;

        info!(url = %base_url, "cart API client ready");

        Ok(HttpCartClient {
            http,
            base_url,
            session_token: config.session_token.clone(),
            client_id: config.client_id.clone(),
        })
    }

    /// Resolves an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> CartResult<Url> {
        self.base_url.join(path).map_err(CartError::from)
    }

    /// Builds a request with the session and correlation headers attached.
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let mut req = self
            .http
            .request(method, url)
            .header("X-Client-Id", &self.client_id);

        if let Some(token) = &self.session_token {
            req = req.bearer_auth(token);
        }

        req
    }

    /// Sends a request and decodes an enveloped body.
    async fn execute<T: DeserializeOwned>(&self, req: RequestBuilder) -> CartResult<T> {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::server_error(status, response).await);
        }

        let envelope: Envelope<T> = response.json().await?;
        Ok(envelope.data)
    }

    /// Sends a request where only the status matters.
    async fn execute_unit(&self, req: RequestBuilder) -> CartResult<()> {
        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(Self::server_error(status, response).await);
        }

        Ok(())
    }

    /// Maps an error response to `CartError::Server`, salvaging the body
    /// message when one was sent.
    async fn server_error(status: StatusCode, response: reqwest::Response) -> CartError {
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);

        CartError::Server {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl RemoteCart for HttpCartClient {
    async fn fetch(&self) -> CartResult<CartPayload> {
        debug!("GET cart");
        let url = self.endpoint("cart")?;
        self.execute(self.request(Method::GET, url)).await
    }

    async fn add(
        &self,
        product_id: &str,
        quantity: i64,
        options: &SelectedOptions,
    ) -> CartResult<ConfirmedItem> {
        debug!(product_id, quantity, "POST cart");
        let url = self.endpoint("cart")?;
        let body = AddRequest {
            product_id,
            quantity,
            options,
        };

        let data: AddData = self
            .execute(self.request(Method::POST, url).json(&body))
            .await?;
        Ok(data.item)
    }

    async fn remove(&self, product_id: &str) -> CartResult<()> {
        debug!(product_id, "DELETE cart item");
        let url = self.endpoint(&format!("cart/item/{}", product_id))?;
        self.execute_unit(self.request(Method::DELETE, url)).await
    }

    async fn update_quantity(&self, product_id: &str, quantity: i64) -> CartResult<()> {
        debug!(product_id, quantity, "PATCH cart item");
        let url = self.endpoint(&format!("cart/item/{}", product_id))?;
        self.execute_unit(
            self.request(Method::PATCH, url)
                .json(&UpdateRequest { quantity }),
        )
        .await
    }

    async fn clear(&self) -> CartResult<()> {
        debug!("DELETE cart clear");
        let url = self.endpoint("cart/clear")?;
        self.execute_unit(self.request(Method::DELETE, url)).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use souk_core::money::Money;

    #[test]
    fn test_fetch_envelope_decodes() {
        let body = r#"{
            "data": {
                "items": [
                    {
                        "productId": "p-5",
                        "quantity": 2,
                        "selectedOptions": { "size": "m" },
                        "product": {
                            "id": "p-5",
                            "name": "Ankara Tote",
                            "price": 100000,
                            "coverImage": "https://cdn.souk.example/p-5.jpg"
                        }
                    }
                ],
                "summary": { "totalItems": 2, "totalCost": 200000 }
            }
        }"#;

        let envelope: Envelope<CartPayload> = serde_json::from_str(body).unwrap();
        let payload = envelope.data;

        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].product_id, "p-5");
        assert_eq!(payload.items[0].quantity, 2);
        assert_eq!(payload.items[0].selected_options.get("size"), Some("m"));
        assert_eq!(payload.items[0].product.price, Money::from_kobo(100_000));

        let summary = payload.summary.unwrap();
        assert_eq!(summary.total_items, 2);
        assert_eq!(summary.total_cost, Money::from_kobo(200_000));
    }

    #[test]
    fn test_fetch_envelope_tolerates_missing_fields() {
        // Older deployments send an empty data object on a fresh cart.
        let envelope: Envelope<CartPayload> = serde_json::from_str(r#"{ "data": {} }"#).unwrap();
        assert!(envelope.data.items.is_empty());
        assert!(envelope.data.summary.is_none());
    }

    #[test]
    fn test_add_envelope_decodes() {
        let body = r#"{
            "data": {
                "item": {
                    "productId": "p-9",
                    "quantity": 3,
                    "selectedOptions": {}
                }
            }
        }"#;

        let envelope: Envelope<AddData> = serde_json::from_str(body).unwrap();
        let item = envelope.data.item;
        assert_eq!(item.product_id, "p-9");
        assert_eq!(item.quantity, 3);
        assert!(item.selected_options.is_empty());
    }

    #[test]
    fn test_add_request_wire_shape() {
        let options = SelectedOptions::new().with("color", "indigo");
        let body = AddRequest {
            product_id: "p-5",
            quantity: 2,
            options: &options,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["productId"], "p-5");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["options"]["color"], "indigo");
    }

    #[test]
    fn test_error_body_message_is_optional() {
        let body: ErrorBody = serde_json::from_str(r#"{ "message": "Out of stock" }"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Out of stock"));

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.message.is_none());
    }

    #[test]
    fn test_endpoint_resolution_keeps_version_prefix() {
        let config = CartClientConfig::for_url("https://souk.example.com/api/v1");
        let client = HttpCartClient::new(&config).unwrap();

        assert_eq!(
            client.endpoint("cart").unwrap().as_str(),
            "https://souk.example.com/api/v1/cart"
        );
        assert_eq!(
            client.endpoint("cart/item/p-5").unwrap().as_str(),
            "https://souk.example.com/api/v1/cart/item/p-5"
        );
        assert_eq!(
            client.endpoint("cart/clear").unwrap().as_str(),
            "https://souk.example.com/api/v1/cart/clear"
        );
    }
}
