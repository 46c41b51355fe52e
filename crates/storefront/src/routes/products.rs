//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tracing::instrument;

use shoe_shop_core::ProductId;

use crate::catalog::{ColorOption, Gender, Product, ProductQuery, RELATED_LIMIT};
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount_percent: Option<u32>,
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

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            brand: product.brand.clone(),
            category: product.category.clone(),
            price: product.price.display(),
            original_price: product.original_price.map(|p| p.display()),
            discount_percent: product.discount_percent(),
            description: product.description.clone(),
            features: product.features.clone(),
            images: product.images.clone(),
            colors: product.colors.clone(),
            sizes: product.sizes.clone(),
            rating: product.rating,
            reviews: product.reviews,
            is_new: product.is_new,
            is_featured: product.is_featured,
            is_popular: product.is_popular,
            is_on_sale: product.is_on_sale,
            gender: product.gender,
            tags: product.tags.clone(),
        }
    }
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductListView {
    pub products: Vec<ProductView>,
    pub total: usize,
    pub categories: Vec<String>,
    pub brands: Vec<String>,
}

/// Product detail response.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    pub product: ProductView,
    /// Preselected size and color.
    pub selected_size: Option<String>,
    pub selected_color: Option<String>,
    pub related_products: Vec<ProductView>,
}

/// Display product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Json<ProductListView> {
    let catalog = state.catalog();
    let products: Vec<ProductView> = catalog
        .search(&query)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Json(ProductListView {
        total: products.len(),
        products,
        categories: catalog.categories().into_iter().map(String::from).collect(),
        brands: catalog.brands().into_iter().map(String::from).collect(),
    })
}

/// Display product detail. Unknown ids go back to the listing.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let Some(product) = id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().get(id))
    else {
        tracing::debug!(id = %id, "unknown product, redirecting to listing");
        return Redirect::to("/products").into_response();
    };

    let related_products = state
        .catalog()
        .related(product, RELATED_LIMIT)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Json(ProductDetailView {
        product: ProductView::from(product),
        selected_size: product.default_size().map(String::from),
        selected_color: product.default_color().map(String::from),
        related_products,
    })
    .into_response()
}
