//! Checkout: form validation, order totals, payment and order confirmation.
//!
//! Placing an order validates the form against the current cart, charges the
//! card outside the cart lock, then takes the purchased quantities out of the
//! cart.

pub mod form;
pub mod payment;
pub mod summary;

use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::cart::{CartStore, LineItem};

pub use form::{
    CheckoutForm, Field, FieldErrors, PaymentDetails, ShippingDetails, ValidatedCheckout,
};
pub use payment::{
    PaymentError, PaymentProcessor, PaymentReceipt, PaymentRequest, SimulatedPayment,
};
pub use summary::{OrderSummary, OrderSummaryDisplay, TAX_RATE};

/// Prefix of every order number.
pub const ORDER_NUMBER_PREFIX: &str = "SVT-";

/// Reasons an order was not placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Invalid checkout form: {0}")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

/// Customer-facing order reference, e.g. `SVT-482913`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Draw a fresh order number: the prefix plus six random digits.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let digits: u32 = rng.random_range(100_000..=999_999);
        Self(format!("{ORDER_NUMBER_PREFIX}{digits}"))
    }

    /// The order number as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderConfirmation {
    pub order_number: OrderNumber,
    pub placed_at: DateTime<Utc>,
    pub summary: OrderSummary,
    pub items: Vec<LineItem>,
    pub shipping: ShippingDetails,
    pub payment: PaymentReceipt,
}

/// Validate `form`, charge the order total and remove the purchased items from
/// the cart.
///
/// The cart lock is released while the payment is processed, so the cart may
/// change meanwhile. Once the charge is approved only the quantities that were
/// ordered are taken out; lines added during payment stay in the cart. On any
/// error the cart is left untouched.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` if there is nothing to buy,
/// `CheckoutError::Invalid` with per-field messages if the form fails
/// validation, and `CheckoutError::Payment` if the charge fails.
#[tracing::instrument(skip_all)]
pub async fn place_order(
    cart: &Mutex<CartStore>,
    form: &CheckoutForm,
    payments: &dyn PaymentProcessor,
) -> Result<OrderConfirmation, CheckoutError> {
    let (validated, items, summary) = {
        let store = cart.lock().await;
        if store.state().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let validated = form.validate().map_err(CheckoutError::Invalid)?;
        (
            validated,
            store.items().to_vec(),
            OrderSummary::for_cart(store.state()),
        )
    };

    let request = PaymentRequest {
        amount: summary.total,
        card_name: validated.payment.card_name.clone(),
        card_last4: validated.payment.card_last4(),
    };
    let receipt = payments.process(&request).await?;

    remove_purchased(&mut *cart.lock().await, &items);

    let order_number = OrderNumber::generate(&mut rand::rng());
    tracing::info!(
        order_number = %order_number,
        total = %summary.total,
        items = items.len(),
        "order placed"
    );

    Ok(OrderConfirmation {
        order_number,
        placed_at: Utc::now(),
        summary,
        items,
        shipping: validated.shipping,
        payment: receipt,
    })
}

/// Subtract each ordered quantity from the matching line, removing lines that
/// drop to zero.
fn remove_purchased(store: &mut CartStore, purchased: &[LineItem]) {
    for item in purchased {
        let key = item.key();
        let remaining = store
            .state()
            .find(&key)
            .map(|current| current.quantity.saturating_sub(item.quantity));
        match remaining {
            Some(0) => {
                store.remove(&key);
            }
            Some(left) => {
                store.set_quantity(&key, i64::from(left));
            }
            None => {}
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::num::NonZeroU32;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use secrecy::SecretString;

    use shoe_shop_core::{Price, ProductId};

    use super::*;
    use crate::cart::{MemoryStorage, ProductSelection};

    struct Declining;

    #[async_trait]
    impl PaymentProcessor for Declining {
        async fn process(&self, _: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
            Err(PaymentError::Declined("insufficient funds".to_string()))
        }
    }

    fn selection() -> ProductSelection {
        ProductSelection {
            product_id: ProductId::new(1),
            size: "9".to_string(),
            color: "Red".to_string(),
            unit_price: Price::from_rupees(7_999),
            name: "Air Zoom Pegasus".to_string(),
            brand: "Nike".to_string(),
            image_url: String::new(),
        }
    }

    fn other_selection() -> ProductSelection {
        ProductSelection {
            product_id: ProductId::new(2),
            size: "8".to_string(),
            color: "White".to_string(),
            unit_price: Price::from_rupees(5_999),
            name: "Ultraboost".to_string(),
            brand: "Adidas".to_string(),
            image_url: String::new(),
        }
    }

    fn valid_form() -> CheckoutForm {
        serde_json::from_value(serde_json::json!({
            "name": "Asha Rao",
            "email": "asha@example.com",
            "phone": "9876543210",
            "address": "12 MG Road",
            "city": "Mumbai",
            "state": "Maharashtra",
            "pincode": "400001",
            "card_number": "4111 1111 1111 1111",
            "card_name": "ASHA RAO",
            "expiry_date": "09/28",
            "cvv": "123",
        }))
        .unwrap()
    }

    fn cart_with_one_item() -> Mutex<CartStore> {
        let mut store = CartStore::load(Arc::new(MemoryStorage::new()));
        store.add(selection(), NonZeroU32::new(2).unwrap());
        Mutex::new(store)
    }

    #[test]
    fn test_order_number_format() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let number = OrderNumber::generate(&mut rng);
            let digits = number.as_str().strip_prefix(ORDER_NUMBER_PREFIX).unwrap();
            assert_eq!(digits.len(), 6);
            let value: u32 = digits.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_place_order_clears_cart() {
        let cart = cart_with_one_item();
        let payments = SimulatedPayment::new(Duration::from_millis(2000));

        let confirmation = place_order(&cart, &valid_form(), &payments).await.unwrap();

        assert_eq!(confirmation.items.len(), 1);
        assert_eq!(confirmation.summary.subtotal, Price::from_rupees(15_998));
        assert_eq!(confirmation.payment.amount, confirmation.summary.total);
        assert_eq!(confirmation.payment.card_last4, "1111");
        assert!(confirmation.order_number.as_str().starts_with(ORDER_NUMBER_PREFIX));
        assert!(cart.lock().await.state().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_items_added_during_payment_stay_in_cart() {
        let cart = cart_with_one_item();
        let payments = SimulatedPayment::new(Duration::from_millis(2000));
        let form = valid_form();

        let (confirmation, ()) = tokio::join!(
            place_order(&cart, &form, &payments),
            async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                cart.lock().await.add_one(other_selection());
            }
        );
        let confirmation = confirmation.unwrap();

        let ordered: Vec<u32> = confirmation
            .items
            .iter()
            .map(|i| i.product_id.as_u32())
            .collect();
        assert_eq!(ordered, vec![1]);

        let store = cart.lock().await;
        assert_eq!(store.items().len(), 1);
        assert!(store.state().find(&other_selection().key()).is_some());
        assert_eq!(store.total_items(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quantity_raised_during_payment_keeps_the_extra() {
        let cart = cart_with_one_item();
        let payments = SimulatedPayment::new(Duration::from_millis(2000));
        let form = valid_form();

        let (confirmation, ()) = tokio::join!(
            place_order(&cart, &form, &payments),
            async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                cart.lock().await.add(selection(), NonZeroU32::new(3).unwrap());
            }
        );

        assert_eq!(confirmation.unwrap().items.first().unwrap().quantity, 2);
        let store = cart.lock().await;
        assert_eq!(store.state().find(&selection().key()).unwrap().quantity, 3);
    }

    #[tokio::test]
    async fn test_place_order_rejects_empty_cart() {
        let cart = Mutex::new(CartStore::load(Arc::new(MemoryStorage::new())));
        let payments = SimulatedPayment::new(Duration::ZERO);

        let err = place_order(&cart, &valid_form(), &payments).await.unwrap_err();
        assert!(matches!(err, CheckoutError::EmptyCart));
    }

    #[tokio::test]
    async fn test_invalid_form_leaves_cart_untouched() {
        let cart = cart_with_one_item();
        let payments = SimulatedPayment::new(Duration::ZERO);
        let mut form = valid_form();
        form.cvv = SecretString::from("1");

        let err = place_order(&cart, &form, &payments).await.unwrap_err();

        match err {
            CheckoutError::Invalid(errors) => {
                assert_eq!(errors.get(Field::Cvv), Some("CVV must be 3 or 4 digits"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(cart.lock().await.total_items(), 2);
    }

    #[tokio::test]
    async fn test_declined_payment_leaves_cart_untouched() {
        let cart = cart_with_one_item();

        let err = place_order(&cart, &valid_form(), &Declining).await.unwrap_err();

        assert!(matches!(err, CheckoutError::Payment(PaymentError::Declined(_))));
        assert_eq!(cart.lock().await.total_items(), 2);
    }
}
