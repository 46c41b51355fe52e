//! Order totals shown on the checkout page and the confirmation.

use rust_decimal::Decimal;
use serde::Serialize;

use shoe_shop_core::Price;

use crate::cart::CartState;

/// Tax rate applied to the subtotal (18%).
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

/// Subtotal, shipping, tax and total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub subtotal: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

impl OrderSummary {
    /// Compute totals for a subtotal. Shipping is free.
    #[must_use]
    pub fn from_subtotal(subtotal: Price) -> Self {
        let shipping = Price::ZERO;
        let tax = subtotal * TAX_RATE;
        Self {
            subtotal,
            shipping,
            tax,
            total: subtotal + shipping + tax,
        }
    }

    /// Compute totals for the current cart.
    #[must_use]
    pub fn for_cart(state: &CartState) -> Self {
        Self::from_subtotal(state.subtotal())
    }

    /// Formatted amounts for display.
    #[must_use]
    pub fn display(&self) -> OrderSummaryDisplay {
        OrderSummaryDisplay {
            subtotal: self.subtotal.display(),
            shipping: if self.shipping == Price::ZERO {
                "Free".to_string()
            } else {
                self.shipping.display()
            },
            tax: self.tax.display(),
            total: self.total.display(),
        }
    }
}

/// [`OrderSummary`] with each amount formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummaryDisplay {
    pub subtotal: String,
    pub shipping: String,
    pub tax: String,
    pub total: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_is_eighteen_percent() {
        let summary = OrderSummary::from_subtotal(Price::from_rupees(10_000));
        assert_eq!(summary.tax, Price::from_rupees(1_800));
        assert_eq!(summary.shipping, Price::ZERO);
        assert_eq!(summary.total, Price::from_rupees(11_800));
    }

    #[test]
    fn test_fractional_tax_kept_until_display() {
        let summary = OrderSummary::from_subtotal(Price::from_rupees(7_999));
        assert_eq!(summary.tax.amount(), Decimal::new(143_982, 2));

        let display = summary.display();
        assert_eq!(display.subtotal, "₹7,999");
        assert_eq!(display.tax, "₹1,440");
        assert_eq!(display.shipping, "Free");
        assert_eq!(display.total, "₹9,439");
    }

    #[test]
    fn test_empty_cart_is_all_zero() {
        let summary = OrderSummary::for_cart(&CartState::default());
        assert_eq!(summary.total, Price::ZERO);
        assert_eq!(summary.display().total, "₹0");
    }
}
