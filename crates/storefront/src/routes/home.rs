//! Home page route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use super::products::ProductView;
use crate::catalog::FEATURED_LIMIT;
use crate::state::AppState;

// =============================================================================
// Hero Configuration (Static content for carousel)
// =============================================================================

/// A single slide in the hero carousel.
#[derive(Debug, Clone, Serialize)]
pub struct HeroSlide {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub button_text: &'static str,
    pub button_url: &'static str,
    pub image_url: &'static str,
}

/// Hero carousel configuration.
#[derive(Debug, Clone, Serialize)]
pub struct HeroConfig {
    pub slides: Vec<HeroSlide>,
    pub autoplay_ms: u32,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            slides: vec![
                HeroSlide {
                    title: "Step into Style",
                    subtitle: "Discover the latest trends in branded footwear",
                    button_text: "Shop Now",
                    button_url: "/products",
                    image_url: "https://images.unsplash.com/photo-1600269452121-4f2416e55c28?q=80&w=1374&auto=format&fit=crop",
                },
                HeroSlide {
                    title: "Run Further",
                    subtitle: "Performance shoes for every athlete",
                    button_text: "Explore Running",
                    button_url: "/products",
                    image_url: "https://images.unsplash.com/photo-1491553895911-0055eca6402d?q=80&w=1480&auto=format&fit=crop",
                },
                HeroSlide {
                    title: "New Arrivals",
                    subtitle: "Fresh styles just dropped",
                    button_text: "See What's New",
                    button_url: "/products",
                    image_url: "https://images.unsplash.com/photo-1542291026-7eec264c27ff?q=80&w=1470&auto=format&fit=crop",
                },
            ],
            autoplay_ms: 5000,
        }
    }
}

// =============================================================================
// Testimonials
// =============================================================================

/// A customer testimonial for display on the homepage.
#[derive(Debug, Clone, Serialize)]
pub struct TestimonialView {
    pub author: &'static str,
    pub role: &'static str,
    pub text: &'static str,
    pub avatar_url: &'static str,
}

/// Static testimonials for the homepage.
fn featured_testimonials() -> Vec<TestimonialView> {
    vec![
        TestimonialView {
            author: "Priya Sharma",
            role: "Marathon Runner",
            text: "These shoes are phenomenal! I've been wearing them for my daily runs and they provide exceptional support and comfort. Definitely worth every rupee.",
            avatar_url: "https://randomuser.me/api/portraits/women/42.jpg",
        },
        TestimonialView {
            author: "Rajesh Patel",
            role: "Parent",
            text: "I bought these shoes for my son and he absolutely loves them. The quality is excellent and they've held up well despite his active lifestyle.",
            avatar_url: "https://randomuser.me/api/portraits/men/32.jpg",
        },
        TestimonialView {
            author: "Ananya Singh",
            role: "Fashion Designer",
            text: "The customer service at ShoeVault is outstanding. When I had an issue with sizing, they promptly arranged an exchange. And the shoes? Simply perfect!",
            avatar_url: "https://randomuser.me/api/portraits/women/65.jpg",
        },
    ]
}

/// Home page data.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub hero: HeroConfig,
    pub featured_products: Vec<ProductView>,
    pub testimonials: Vec<TestimonialView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Json<HomeView> {
    let featured_products = state
        .catalog()
        .featured(FEATURED_LIMIT)
        .into_iter()
        .map(ProductView::from)
        .collect();

    Json(HomeView {
        hero: HeroConfig::default(),
        featured_products,
        testimonials: featured_testimonials(),
    })
}
