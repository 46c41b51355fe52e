//! Cart route handlers.
//!
//! Every mutation takes one turn on the cart store lock and answers with the
//! resulting cart.

use std::num::NonZeroU32;

use axum::{Form, Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use shoe_shop_core::ProductId;

use crate::cart::{CartState, LineItem, VariantKey};
use crate::checkout::{OrderSummary, OrderSummaryDisplay};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::state::AppState;

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub image_url: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub subtotal: String,
    pub summary: OrderSummaryDisplay,
    pub is_panel_open: bool,
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCountView {
    pub count: u64,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product_id,
            name: item.name.clone(),
            brand: item.brand.clone(),
            image_url: item.image_url.clone(),
            size: item.size.clone(),
            color: item.color.clone(),
            quantity: item.quantity,
            price: item.unit_price.display(),
            line_price: item.line_total().display(),
        }
    }
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        Self {
            items: state.items().iter().map(CartItemView::from).collect(),
            item_count: state.total_items(),
            subtotal: state.subtotal().display(),
            summary: OrderSummary::for_cart(state).display(),
            is_panel_open: state.is_panel_open(),
        }
    }
}

// =============================================================================
// Forms
// =============================================================================

/// Add to cart form data.
///
/// Size and color default to the product's first option, quantity to one.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub size: Option<String>,
    pub color: Option<String>,
    pub quantity: Option<u32>,
}

/// Update cart form data. A quantity of zero or less removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

/// Cart panel visibility form data.
#[derive(Debug, Deserialize)]
pub struct PanelForm {
    pub open: bool,
}

/// Use the submitted option if present, otherwise the product default.
fn pick_option(submitted: Option<String>, default: Option<&str>) -> Option<String> {
    submitted
        .filter(|value| !value.trim().is_empty())
        .or_else(|| default.map(String::from))
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let store = state.cart().lock().await;
    Json(CartView::from(store.state()))
}

/// Get the cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCountView> {
    let count = state.cart().lock().await.total_items();
    Json(CartCountView { count })
}

/// Add an item to the cart. Opens the cart panel.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get(form.product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {}", form.product_id)))?;

    let quantity = NonZeroU32::new(form.quantity.unwrap_or(1))
        .ok_or_else(|| AppError::BadRequest("Quantity must be at least 1".to_string()))?;

    let size = pick_option(form.size, product.default_size())
        .filter(|size| product.has_size(size))
        .ok_or_else(|| AppError::BadRequest("Please select an available size".to_string()))?;
    let color = pick_option(form.color, product.default_color())
        .filter(|color| product.has_color(color))
        .ok_or_else(|| AppError::BadRequest("Please select an available color".to_string()))?;

    let selection = product.selection(&size, &color);

    let delay = state.config().add_delay;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let mut store = state.cart().lock().await;
    store.add(selection, quantity);

    let product_id = form.product_id.to_string();
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[
            ("product_id", product_id.as_str()),
            ("size", size.as_str()),
            ("color", color.as_str()),
        ]),
    );

    Ok(Json(CartView::from(store.state())))
}

/// Set the quantity of a cart line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> Json<CartView> {
    let key = VariantKey::new(form.product_id, form.size, form.color);
    let mut store = state.cart().lock().await;
    if !store.set_quantity(&key, form.quantity) {
        tracing::debug!(product_id = %key.product_id, "update for a line not in the cart");
    }
    Json(CartView::from(store.state()))
}

/// Remove a cart line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> Json<CartView> {
    let key = VariantKey::new(form.product_id, form.size, form.color);
    let mut store = state.cart().lock().await;
    if !store.remove(&key) {
        tracing::debug!(product_id = %key.product_id, "remove for a line not in the cart");
    }
    Json(CartView::from(store.state()))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut store = state.cart().lock().await;
    store.clear();
    Json(CartView::from(store.state()))
}

/// Open or close the cart panel.
#[instrument(skip(state))]
pub async fn panel(
    State(state): State<AppState>,
    Form(form): Form<PanelForm>,
) -> Json<CartView> {
    let mut store = state.cart().lock().await;
    store.set_panel_open(form.open);
    Json(CartView::from(store.state()))
}
