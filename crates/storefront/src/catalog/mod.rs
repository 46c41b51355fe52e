//! In-memory product catalog.
//!
//! The catalog is built once at startup and never changes. The cart copies
//! what it needs from a [`Product`] when an item is added, so nothing here is
//! consulted when the cart is rendered.

pub mod product;
pub mod seed;

use std::cmp::Ordering;

use rust_decimal::Decimal;
use serde::Deserialize;

use shoe_shop_core::ProductId;

pub use product::{ColorOption, Gender, Product};

/// Lower bound of the listing price filter when none is given.
pub const DEFAULT_MIN_PRICE: i64 = 0;

/// Upper bound of the listing price filter when none is given.
pub const DEFAULT_MAX_PRICE: i64 = 10_000;

/// Number of products on the home page.
pub const FEATURED_LIMIT: usize = 8;

/// Number of related products on a detail page.
pub const RELATED_LIMIT: usize = 4;

/// Merchandising flags a listing can be narrowed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Highlight {
    New,
    Sale,
    Featured,
    Popular,
}

impl Highlight {
    fn matches(self, product: &Product) -> bool {
        match self {
            Self::New => product.is_new,
            Self::Sale => product.is_on_sale,
            Self::Featured => product.is_featured,
            Self::Popular => product.is_popular,
        }
    }
}

/// Listing sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Catalog order.
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
}

/// Listing filters, as taken from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    /// Products for this gender plus unisex products.
    pub gender: Option<Gender>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub filter: Option<Highlight>,
    #[serde(default)]
    pub sort: SortOrder,
    pub limit: Option<usize>,
}

impl ProductQuery {
    fn price_bounds(&self) -> (Decimal, Decimal) {
        (
            self.min_price.unwrap_or_else(|| Decimal::from(DEFAULT_MIN_PRICE)),
            self.max_price.unwrap_or_else(|| Decimal::from(DEFAULT_MAX_PRICE)),
        )
    }

    fn matches(&self, product: &Product) -> bool {
        let (min, max) = self.price_bounds();
        let price = product.price.amount();

        self.category
            .as_deref()
            .is_none_or(|category| product.category == category)
            && self.brand.as_deref().is_none_or(|brand| product.brand == brand)
            && self
                .gender
                .is_none_or(|gender| product.gender == gender || product.gender == Gender::Unisex)
            && self.filter.is_none_or(|flag| flag.matches(product))
            && price >= min
            && price <= max
    }
}

/// The product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create a catalog from a fixed product list.
    #[must_use]
    pub const fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    /// The built-in catalog: seed products plus generated variants.
    #[must_use]
    pub fn builtin(rng_seed: u64) -> Self {
        let mut products = seed::seed_products();
        let generated = seed::expand(&products, rng_seed);
        products.extend(generated);
        Self::new(products)
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in order of first appearance.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Distinct brands in order of first appearance.
    #[must_use]
    pub fn brands(&self) -> Vec<&str> {
        distinct(self.products.iter().map(|p| p.brand.as_str()))
    }

    /// The first `limit` featured products.
    #[must_use]
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_featured)
            .take(limit)
            .collect()
    }

    /// Up to `limit` other products from the same category.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .collect()
    }

    /// Products matching `query`, sorted and truncated as requested.
    #[must_use]
    pub fn search(&self, query: &ProductQuery) -> Vec<&Product> {
        let mut results: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| query.matches(p))
            .collect();

        match query.sort {
            SortOrder::Default => {}
            SortOrder::PriceAsc => results.sort_by(|a, b| a.price.cmp(&b.price)),
            SortOrder::PriceDesc => results.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::NameAsc => results.sort_by(|a, b| compare_names(a, b)),
            SortOrder::NameDesc => results.sort_by(|a, b| compare_names(b, a)),
        }

        if let Some(limit) = query.limit {
            results.truncate(limit);
        }
        results
    }
}

fn compare_names(a: &Product, b: &Product) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen: Vec<&str> = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin(42)
    }

    #[test]
    fn test_builtin_has_seventy_two_products() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 72);
        assert!(catalog.get(ProductId::new(1)).is_some());
        assert!(catalog.get(ProductId::new(72)).is_some());
        assert!(catalog.get(ProductId::new(73)).is_none());
    }

    #[test]
    fn test_categories_and_brands_first_seen_order() {
        let catalog = catalog();
        assert_eq!(
            catalog.categories(),
            vec!["Running", "Casual", "Training", "Lifestyle"]
        );
        assert_eq!(
            catalog.brands(),
            vec!["Nike", "Puma", "Adidas", "Reebok", "Converse", "Asics", "New Balance"]
        );
    }

    #[test]
    fn test_featured_limit() {
        let catalog = catalog();
        let featured = catalog.featured(FEATURED_LIMIT);
        assert_eq!(featured.len(), FEATURED_LIMIT);
        assert!(featured.iter().all(|p| p.is_featured));
        assert_eq!(featured.first().unwrap().id, ProductId::new(1));
    }

    #[test]
    fn test_related_same_category_excluding_self() {
        let catalog = catalog();
        let product = catalog.get(ProductId::new(1)).unwrap();
        let related = catalog.related(product, RELATED_LIMIT);

        assert_eq!(related.len(), RELATED_LIMIT);
        assert!(related.iter().all(|p| p.category == "Running"));
        assert!(related.iter().all(|p| p.id != product.id));
    }

    #[test]
    fn test_search_by_category_and_brand() {
        let catalog = catalog();
        let query = ProductQuery {
            category: Some("Running".to_string()),
            brand: Some("Nike".to_string()),
            max_price: Some(Decimal::from(1_000_000)),
            ..ProductQuery::default()
        };
        let results = catalog.search(&query);

        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.category == "Running" && p.brand == "Nike"));
    }

    #[test]
    fn test_search_gender_includes_unisex() {
        let catalog = catalog();
        let query = ProductQuery {
            gender: Some(Gender::Women),
            max_price: Some(Decimal::from(1_000_000)),
            ..ProductQuery::default()
        };
        assert_eq!(catalog.search(&query).len(), catalog.len());
    }

    #[test]
    fn test_search_default_price_ceiling() {
        let catalog = catalog();
        let results = catalog.search(&ProductQuery::default());
        assert!(
            results
                .iter()
                .all(|p| p.price.amount() <= Decimal::from(DEFAULT_MAX_PRICE))
        );
    }

    #[test]
    fn test_search_price_range_inclusive() {
        let catalog = catalog();
        let query = ProductQuery {
            min_price: Some(Decimal::from(4999)),
            max_price: Some(Decimal::from(4999)),
            ..ProductQuery::default()
        };
        let results = catalog.search(&query);
        assert!(results.iter().any(|p| p.id == ProductId::new(4)));
        assert!(results.iter().all(|p| p.price.amount() == Decimal::from(4999)));
    }

    #[test]
    fn test_search_highlight_filter() {
        let catalog = catalog();
        let query = ProductQuery {
            filter: Some(Highlight::Sale),
            max_price: Some(Decimal::from(1_000_000)),
            ..ProductQuery::default()
        };
        let results = catalog.search(&query);
        assert!(!results.is_empty());
        assert!(results.iter().all(|p| p.is_on_sale));
    }

    #[test]
    fn test_search_sorting_and_limit() {
        let catalog = catalog();
        let query = ProductQuery {
            sort: SortOrder::PriceAsc,
            limit: Some(5),
            ..ProductQuery::default()
        };
        let results = catalog.search(&query);
        assert_eq!(results.len(), 5);
        assert!(results.windows(2).all(|w| match w {
            [a, b] => a.price <= b.price,
            _ => true,
        }));

        let query = ProductQuery {
            sort: SortOrder::NameDesc,
            ..ProductQuery::default()
        };
        let results = catalog.search(&query);
        assert!(results.windows(2).all(|w| match w {
            [a, b] => a.name.to_lowercase() >= b.name.to_lowercase(),
            _ => true,
        }));
    }

    #[test]
    fn test_query_deserializes_from_query_string_values() {
        let query: ProductQuery = serde_json::from_value(serde_json::json!({
            "gender": "men",
            "filter": "new",
            "sort": "price-desc",
        }))
        .unwrap();

        assert_eq!(query.gender, Some(Gender::Men));
        assert_eq!(query.filter, Some(Highlight::New));
        assert_eq!(query.sort, SortOrder::PriceDesc);
    }
}
