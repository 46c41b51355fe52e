//! Integration tests for Shoe Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shoe-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart store behavior through the library API
//! - `storefront_routes` - HTTP routes driven through the router
//! - `checkout_flow` - Order placement end to end
//!
//! Routes are exercised in-process with `tower::ServiceExt::oneshot`; no
//! server is started.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;

use shoe_shop_storefront::cart::{KeyValueStore, MemoryStorage};
use shoe_shop_storefront::config::StorefrontConfig;
use shoe_shop_storefront::state::AppState;

/// Largest response body the helpers will buffer.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Configuration for tests: no artificial delays.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        add_delay: Duration::ZERO,
        payment_delay: Duration::ZERO,
        ..StorefrontConfig::default()
    }
}

/// A storefront router plus handles on its state and storage.
pub struct TestContext {
    pub state: AppState,
    pub storage: Arc<dyn KeyValueStore>,
    router: Router,
}

impl TestContext {
    /// A storefront backed by fresh in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(test_config(), Arc::new(MemoryStorage::new()))
    }

    /// A storefront over existing storage, restoring whatever cart it holds.
    #[must_use]
    pub fn with_storage(storage: Arc<dyn KeyValueStore>) -> Self {
        Self::with_config(test_config(), storage)
    }

    /// A storefront with explicit configuration and storage.
    #[must_use]
    pub fn with_config(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let state = AppState::new(config, Arc::clone(&storage));
        let router = shoe_shop_storefront::app(state.clone());
        Self {
            state,
            storage,
            router,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::get(uri)
            .body(Body::empty())
            .expect("valid GET request");
        self.send(request).await
    }

    /// Send a POST request with a form-encoded body.
    pub async fn post_form(&self, uri: &str, body: &str) -> TestResponse {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_owned()))
            .expect("valid POST request");
        self.send(request).await
    }

    /// Send an arbitrary request through the router.
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .expect("response body fits in memory");
        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A buffered response.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    /// Parse the body as JSON.
    #[must_use]
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("response body is JSON")
    }

    /// The body as text.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// The `Location` header, if any.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

/// Form body for a checkout that passes validation.
#[must_use]
pub fn valid_checkout_form() -> String {
    [
        ("name", "Asha Rao"),
        ("email", "asha@example.com"),
        ("phone", "9876543210"),
        ("address", "12 MG Road"),
        ("city", "Mumbai"),
        ("state", "Maharashtra"),
        ("pincode", "400001"),
        ("card_number", "4111111111111111"),
        ("card_name", "ASHA RAO"),
        ("expiry_date", "09/28"),
        ("cvv", "123"),
    ]
    .iter()
    .map(|(k, v)| format!("{k}={}", v.replace(' ', "+").replace('/', "%2F")))
    .collect::<Vec<_>>()
    .join("&")
}
