//! Cart line items and the variant key that identifies them.

use serde::{Deserialize, Serialize};

use shoe_shop_core::{Price, ProductId};

/// Identifies one purchasable variant of a product.
///
/// No two line items in a cart share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantKey {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
}

impl VariantKey {
    /// Create a new variant key.
    #[must_use]
    pub fn new(product_id: ProductId, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
        }
    }
}

/// Everything needed to put a product variant in the cart.
///
/// Price and display fields are captured here, at add time, so the cart never
/// has to go back to the catalog to render itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSelection {
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    pub unit_price: Price,
    pub name: String,
    pub brand: String,
    pub image_url: String,
}

impl ProductSelection {
    /// The variant key this selection would occupy in a cart.
    #[must_use]
    pub fn key(&self) -> VariantKey {
        VariantKey::new(self.product_id, self.size.clone(), self.color.clone())
    }
}

/// One row in the cart.
///
/// Serialized field names match the device storage format used by earlier
/// versions of the shop, so saved carts keep restoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    #[serde(rename = "price")]
    pub unit_price: Price,
    #[serde(rename = "image")]
    pub image_url: String,
    pub quantity: u32,
    pub size: String,
    pub color: String,
}

impl LineItem {
    /// Create a line item from a selection.
    #[must_use]
    pub fn from_selection(selection: ProductSelection, quantity: u32) -> Self {
        Self {
            product_id: selection.product_id,
            name: selection.name,
            brand: selection.brand,
            unit_price: selection.unit_price,
            image_url: selection.image_url,
            quantity,
            size: selection.size,
            color: selection.color,
        }
    }

    /// Whether this item occupies the given variant key.
    #[must_use]
    pub fn has_key(&self, key: &VariantKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// The variant key of this item.
    #[must_use]
    pub fn key(&self) -> VariantKey {
        VariantKey::new(self.product_id, self.size.clone(), self.color.clone())
    }

    /// `unit_price * quantity`, saturating at the `Decimal` bounds.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}
