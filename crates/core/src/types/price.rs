//! Type-safe price representation using decimal arithmetic.
//!
//! The shop trades in a single currency (Indian rupees) and prices are whole
//! rupee amounts. Arithmetic stays exact in [`Decimal`]; rounding only happens
//! when a price is formatted for display. The operators saturate at the
//! `Decimal` bounds instead of panicking; use the `checked_*` methods to detect
//! overflow.
//!
//! ```
//! use rust_decimal::Decimal;
//! use shoe_shop_core::Price;
//!
//! let price = Price::from_rupees(123_456);
//! assert_eq!(price.display(), "₹1,23,456");
//! assert_eq!(Price::new(Decimal::new(431_946, 2)).display(), "₹4,319");
//! ```

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Symbol prefixed to formatted amounts.
pub const CURRENCY_SYMBOL: &str = "₹";

/// An amount of money in the shop currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price {
    /// Amount in whole currency units (rupees, not paise).
    amount: Decimal,
}

impl Price {
    /// Zero rupees.
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
    };

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self { amount }
    }

    /// Create a price from a whole number of rupees.
    #[must_use]
    pub fn from_rupees(rupees: i64) -> Self {
        Self {
            amount: Decimal::from(rupees),
        }
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// `self + rhs`, or `None` if the sum does not fit.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.amount.checked_add(rhs.amount).map(Self::new)
    }

    /// `self * quantity`, or `None` if the product does not fit.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.amount.checked_mul(Decimal::from(quantity)).map(Self::new)
    }

    /// Format for display, `en-IN` style with no fraction digits.
    ///
    /// The amount is rounded half away from zero and grouped the Indian way:
    /// the last three digits, then pairs (`₹12,34,567`).
    #[must_use]
    pub fn display(&self) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let digits = rounded.abs().trunc().to_string();
        let grouped = group_indian(&digits);

        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{CURRENCY_SYMBOL}{grouped}")
        } else {
            format!("{CURRENCY_SYMBOL}{grouped}")
        }
    }
}

/// Insert `en-IN` group separators into a plain digit string.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        if let Some(group) = head.get(start..end) {
            groups.push(group);
        }
        end = start;
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self::new(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.amount.saturating_add(rhs.amount))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self::Output {
        Self::new(self.amount.saturating_mul(Decimal::from(rhs)))
    }
}

impl Mul<Decimal> for Price {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self::Output {
        Self::new(self.amount.saturating_mul(rhs))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}
