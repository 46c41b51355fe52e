//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cart::{CartStore, KeyValueStore};
use crate::catalog::Catalog;
use crate::checkout::{PaymentProcessor, SimulatedPayment};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart store sits behind a
/// single async mutex; each request's mutation is one exclusive turn.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    cart: Mutex<CartStore>,
    payments: Arc<dyn PaymentProcessor>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds the catalog from the configured seed, restores the cart from
    /// `storage` and uses a simulated payment processor with the configured
    /// delay.
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let catalog = Catalog::builtin(config.catalog_seed);
        let cart = CartStore::load(storage);
        let payments = Arc::new(SimulatedPayment::new(config.payment_delay));
        Self::from_parts(config, catalog, cart, payments)
    }

    /// Assemble state from already-built parts.
    #[must_use]
    pub fn from_parts(
        config: StorefrontConfig,
        catalog: Catalog,
        cart: CartStore,
        payments: Arc<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart: Mutex::new(cart),
                payments,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn cart(&self) -> &Mutex<CartStore> {
        &self.inner.cart
    }

    /// Get a reference to the payment processor.
    #[must_use]
    pub fn payments(&self) -> &dyn PaymentProcessor {
        self.inner.payments.as_ref()
    }
}
