//! Catalog product records.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use shoe_shop_core::{Price, ProductId};

use crate::cart::ProductSelection;

/// Who a shoe is cut for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

/// A named color with its swatch value (hex).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorOption {
    pub name: String,
    pub value: String,
}

impl ColorOption {
    /// Create a color option.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Price,
    pub original_price: Option<Price>,
    pub description: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub colors: Vec<ColorOption>,
    pub sizes: Vec<String>,
    pub rating: f32,
    pub reviews: u32,
    pub is_new: bool,
    pub is_featured: bool,
    pub is_popular: bool,
    pub is_on_sale: bool,
    pub gender: Gender,
    pub tags: Vec<String>,
}

impl Product {
    /// Whether `size` is offered.
    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// Whether a color named `color` is offered.
    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c.name == color)
    }

    /// First listed size, preselected on the detail view.
    #[must_use]
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// First listed color, preselected on the detail view.
    #[must_use]
    pub fn default_color(&self) -> Option<&str> {
        self.colors.first().map(|c| c.name.as_str())
    }

    /// Percentage off the original price, rounded to a whole percent.
    ///
    /// `None` when there is no original price or it is not above the price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?.amount();
        if original <= self.price.amount() {
            return None;
        }
        ((original - self.price.amount()) / original * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }

    /// Main image shown on cards and in the cart.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.images.first().map_or("", String::as_str)
    }

    /// Capture a cart selection of this product at its current price.
    #[must_use]
    pub fn selection(&self, size: &str, color: &str) -> ProductSelection {
        ProductSelection {
            product_id: self.id,
            size: size.to_owned(),
            color: color.to_owned(),
            unit_price: self.price,
            name: self.name.clone(),
            brand: self.brand.clone(),
            image_url: self.primary_image().to_owned(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::seed::seed_products;

    #[test]
    fn test_discount_percent() {
        let products = seed_products();
        let by_id = |id: u32| products.iter().find(|p| p.id == ProductId::new(id)).unwrap();

        // 9999 -> 7999
        assert_eq!(by_id(1).discount_percent(), Some(20));
        // 8999 -> 7499
        assert_eq!(by_id(7).discount_percent(), Some(17));
        assert_eq!(by_id(2).discount_percent(), None);
    }

    #[test]
    fn test_selection_captures_price_and_display_fields() {
        let product = seed_products().into_iter().next().unwrap();
        let selection = product.selection("9", "Red");
        assert_eq!(selection.product_id, product.id);
        assert_eq!(selection.unit_price, product.price);
        assert_eq!(selection.image_url, product.primary_image());
    }
}
