//! Payment processing.
//!
//! No payment provider is wired up. [`SimulatedPayment`] waits for a fixed
//! delay to mimic a gateway round trip and then approves.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use shoe_shop_core::Price;

/// Payment failures.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Payment declined: {0}")]
    Declined(String),
    #[error("Payment service unavailable: {0}")]
    Unavailable(String),
}

/// A charge to make against a validated card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    pub amount: Price,
    pub card_name: String,
    pub card_last4: String,
}

/// An approved charge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentReceipt {
    pub amount: Price,
    pub card_last4: String,
}

/// Charges a card.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Charge `request.amount`.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError` if the charge is not approved.
    async fn process(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError>;
}

/// Approves every charge after a fixed delay.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedPayment {
    delay: Duration,
}

impl SimulatedPayment {
    /// Create a processor that takes `delay` per charge.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedPayment {
    async fn process(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        tracing::debug!(
            amount = %request.amount,
            card_last4 = %request.card_last4,
            delay_ms = u64::try_from(self.delay.as_millis()).unwrap_or(u64::MAX),
            "processing simulated payment"
        );
        tokio::time::sleep(self.delay).await;
        Ok(PaymentReceipt {
            amount: request.amount,
            card_last4: request.card_last4.clone(),
        })
    }
}
