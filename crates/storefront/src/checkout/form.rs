//! Checkout form and its field validation.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};

use shoe_shop_core::Email;

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("Invalid regex"));
static PINCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{6}$").expect("Invalid regex"));
static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{16}$").expect("Invalid regex"));
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/[0-9]{2}$").expect("Invalid regex"));
static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").expect("Invalid regex"));

/// A checkout form field, as named in the form body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Email,
    Phone,
    Address,
    City,
    State,
    Pincode,
    CardNumber,
    CardName,
    ExpiryDate,
    Cvv,
}

impl Field {
    /// Human-readable label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone number",
            Self::Address => "Address",
            Self::City => "City",
            Self::State => "State",
            Self::Pincode => "PIN code",
            Self::CardNumber => "Card number",
            Self::CardName => "Name on card",
            Self::ExpiryDate => "Expiry date",
            Self::Cvv => "CVV",
        }
    }
}

/// Per-field validation messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Whether no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.values().map(String::as_str).collect();
        f.write_str(&messages.join("; "))
    }
}

fn empty_secret() -> SecretString {
    SecretString::from("")
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Checkout form data as submitted.
///
/// Missing fields deserialize as empty strings so they are reported as
/// required rather than rejected as a malformed body. Card number and CVV are
/// secrets and never show up in `Debug` output.
#[derive(Debug, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default = "empty_secret", deserialize_with = "deserialize_secret")]
    pub card_number: SecretString,
    #[serde(default)]
    pub card_name: String,
    #[serde(default)]
    pub expiry_date: String,
    #[serde(default = "empty_secret", deserialize_with = "deserialize_secret")]
    pub cvv: SecretString,
}

/// Where the order ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingDetails {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// Card details that passed format validation.
#[derive(Debug)]
pub struct PaymentDetails {
    pub card_name: String,
    /// Digits only.
    pub card_number: SecretString,
    pub expiry_date: String,
    pub cvv: SecretString,
}

impl PaymentDetails {
    /// Last four digits of the card, for receipts and logs.
    #[must_use]
    pub fn card_last4(&self) -> String {
        let digits = self.card_number.expose_secret();
        digits
            .char_indices()
            .nth_back(3)
            .and_then(|(i, _)| digits.get(i..))
            .unwrap_or(digits)
            .to_owned()
    }
}

/// A form that passed validation.
#[derive(Debug)]
pub struct ValidatedCheckout {
    pub shipping: ShippingDetails,
    pub payment: PaymentDetails,
}

impl CheckoutForm {
    /// Check every field, collecting one message per failing field.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages if any field is missing or malformed.
    pub fn validate(&self) -> Result<ValidatedCheckout, FieldErrors> {
        let mut errors = FieldErrors::default();

        let required = [
            (Field::Name, self.name.as_str()),
            (Field::Email, self.email.as_str()),
            (Field::Phone, self.phone.as_str()),
            (Field::Address, self.address.as_str()),
            (Field::City, self.city.as_str()),
            (Field::State, self.state.as_str()),
            (Field::Pincode, self.pincode.as_str()),
            (Field::CardNumber, self.card_number.expose_secret()),
            (Field::CardName, self.card_name.as_str()),
            (Field::ExpiryDate, self.expiry_date.as_str()),
            (Field::Cvv, self.cvv.expose_secret()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.insert(field, format!("{} is required", field.label()));
            }
        }

        let email = Email::parse(self.email.trim());
        if email.is_err() {
            errors.insert(Field::Email, "Email is invalid");
        }
        if !PHONE_RE.is_match(&self.phone) {
            errors.insert(Field::Phone, "Phone number must be 10 digits");
        }
        if !PINCODE_RE.is_match(&self.pincode) {
            errors.insert(Field::Pincode, "PIN code must be 6 digits");
        }

        let card_digits: String = self
            .card_number
            .expose_secret()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        if !CARD_NUMBER_RE.is_match(&card_digits) {
            errors.insert(Field::CardNumber, "Card number must be 16 digits");
        }
        if !EXPIRY_RE.is_match(&self.expiry_date) {
            errors.insert(Field::ExpiryDate, "Expiry date must be in MM/YY format");
        }
        if !CVV_RE.is_match(self.cvv.expose_secret()) {
            errors.insert(Field::Cvv, "CVV must be 3 or 4 digits");
        }

        match email {
            Ok(email) if errors.is_empty() => Ok(ValidatedCheckout {
                shipping: ShippingDetails {
                    name: self.name.trim().to_owned(),
                    email,
                    phone: self.phone.clone(),
                    address: self.address.trim().to_owned(),
                    city: self.city.trim().to_owned(),
                    state: self.state.trim().to_owned(),
                    pincode: self.pincode.clone(),
                },
                payment: PaymentDetails {
                    card_name: self.card_name.trim().to_owned(),
                    card_number: SecretString::from(card_digits),
                    expiry_date: self.expiry_date.clone(),
                    cvv: SecretString::from(self.cvv.expose_secret()),
                },
            }),
            _ => Err(errors),
        }
    }
}
