//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero, featured products, testimonials)
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing (filters, sort, limit)
//! GET  /products/{id}          - Product detail (unknown id redirects to /products)
//!
//! # Cart
//! GET  /cart                   - Cart with totals and panel flag
//! GET  /cart/count             - Cart count badge
//! POST /cart/add               - Add to cart (opens the panel)
//! POST /cart/update            - Set line quantity (zero or less removes)
//! POST /cart/remove            - Remove line
//! POST /cart/clear             - Empty the cart
//! POST /cart/panel             - Open or close the cart panel
//!
//! # Checkout
//! GET  /checkout               - Order summary (empty cart redirects to /cart)
//! POST /checkout               - Place order
//! ```

pub mod cart;
pub mod checkout;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/panel", post(cart::panel))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", get(checkout::show).post(checkout::submit))
}
