//! Checkout route handlers.

use axum::{
    Form, Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::instrument;

use super::cart::{CartItemView, CartView};
use crate::checkout::{
    CheckoutForm, OrderConfirmation, OrderSummaryDisplay, ShippingDetails, place_order,
};
use crate::error::Result;
use crate::state::AppState;

/// Order confirmation display data.
#[derive(Debug, Serialize)]
pub struct ConfirmationView {
    pub order_number: String,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<CartItemView>,
    pub summary: OrderSummaryDisplay,
    pub shipping: ShippingDetails,
    pub card_last4: String,
}

impl From<OrderConfirmation> for ConfirmationView {
    fn from(order: OrderConfirmation) -> Self {
        Self {
            order_number: order.order_number.to_string(),
            placed_at: order.placed_at,
            items: order.items.iter().map(CartItemView::from).collect(),
            summary: order.summary.display(),
            shipping: order.shipping,
            card_last4: order.payment.card_last4,
        }
    }
}

/// Display the checkout summary. An empty cart goes back to the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Response {
    let store = state.cart().lock().await;
    if store.state().is_empty() {
        return Redirect::to("/cart").into_response();
    }
    Json(CartView::from(store.state())).into_response()
}

/// Place the order.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<CheckoutForm>,
) -> Result<Json<ConfirmationView>> {
    let confirmation = place_order(state.cart(), &form, state.payments()).await?;
    Ok(Json(ConfirmationView::from(confirmation)))
}
