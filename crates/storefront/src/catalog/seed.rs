//! Built-in product data.
//!
//! Twelve hand-written products, expanded at startup into templated variants
//! (ids 13 through 72) so listing views have something to page through.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use shoe_shop_core::{Price, ProductId};

use super::product::{ColorOption, Gender, Product};

/// Highest id produced by [`expand`].
pub const LAST_GENERATED_ID: u32 = 72;

const IMAGE_PREFIX: &str = "https://images.unsplash.com/photo-";
const IMAGE_SUFFIX: &str = "?q=80&w=1470&auto=format&fit=crop";

const NAME_SUFFIXES: [&str; 8] = ["Elite", "Pro", "Plus", "X", "Ultra", "Max", "Classic", "Lite"];

struct SeedProduct {
    id: u32,
    name: &'static str,
    brand: &'static str,
    category: &'static str,
    price: i64,
    original_price: Option<i64>,
    description: &'static str,
    features: [&'static str; 5],
    photos: [&'static str; 3],
    colors: [(&'static str, &'static str); 3],
    sizes: &'static [&'static str],
    rating: f32,
    reviews: u32,
    is_new: bool,
    is_featured: bool,
    is_popular: bool,
    is_on_sale: bool,
    tags: [&'static str; 3],
}

static SEED: [SeedProduct; 12] = [
    SeedProduct {
        id: 1,
        name: "Air Max Ultra",
        brand: "Nike",
        category: "Running",
        price: 7999,
        original_price: Some(9999),
        description: "Experience ultimate comfort with Nike's Air Max Ultra. These lightweight running shoes feature advanced cushioning technology for a smooth ride.",
        features: [
            "Mesh upper for breathability",
            "Air-Sole unit for lightweight cushioning",
            "Rubber outsole for durability and traction",
            "Padded collar for comfort",
            "Reflective details for visibility in low light",
        ],
        photos: ["1542291026-7eec264c27ff", "1607522370275-f14206abe5d3", "1595950653106-6c9ebd614d3a"],
        colors: [("Red", "#FF5A5F"), ("Blue", "#2563EB"), ("White", "#FFFFFF")],
        sizes: &["7", "8", "9", "10", "11"],
        rating: 4.5,
        reviews: 128,
        is_new: true,
        is_featured: true,
        is_popular: false,
        is_on_sale: false,
        tags: ["running", "lightweight", "cushioned"],
    },
    SeedProduct {
        id: 2,
        name: "Classic Suede",
        brand: "Puma",
        category: "Casual",
        price: 5999,
        original_price: None,
        description: "The iconic Puma Suede reinvented with modern comfort features while maintaining its classic look.",
        features: [
            "Premium suede upper",
            "Cushioned midsole for comfort",
            "Rubber outsole for grip",
            "Signature Puma Formstrip",
            "Padded collar for added comfort",
        ],
        photos: ["1608231387042-66d1773070a5", "1605408499391-6368c628ef42", "1605348532760-6753d2c43329"],
        colors: [("Black", "#000000"), ("Grey", "#6B7280"), ("Navy", "#1E40AF")],
        sizes: &["6", "7", "8", "9", "10", "11"],
        rating: 4.2,
        reviews: 86,
        is_new: false,
        is_featured: false,
        is_popular: true,
        is_on_sale: false,
        tags: ["casual", "suede", "retro"],
    },
    SeedProduct {
        id: 3,
        name: "Ultraboost Pro",
        brand: "Adidas",
        category: "Running",
        price: 8499,
        original_price: Some(9999),
        description: "Designed for serious runners, the Ultraboost Pro combines responsive cushioning with energy return technology for an unmatched running experience.",
        features: [
            "Primeknit+ upper for adaptable support",
            "Boost midsole for responsive cushioning",
            "Continental Rubber outsole for extraordinary grip",
            "Torsion system for midfoot integrity",
            "Molded heel counter for natural fit",
        ],
        photos: ["1587563871167-1ee9c731aefb", "1579338559194-a162d19bf842", "1551107696-a4b0c5a0d9a2"],
        colors: [("Core Black", "#000000"), ("Cloud White", "#FFFFFF"), ("Signal Orange", "#FB923C")],
        sizes: &["7", "8", "9", "10", "11", "12"],
        rating: 4.8,
        reviews: 234,
        is_new: false,
        is_featured: true,
        is_popular: false,
        is_on_sale: true,
        tags: ["running", "responsive", "comfort"],
    },
    SeedProduct {
        id: 4,
        name: "Classic Leather",
        brand: "Reebok",
        category: "Casual",
        price: 4999,
        original_price: None,
        description: "A timeless silhouette with premium leather upper for everyday style and comfort.",
        features: [
            "Full-grain leather upper for comfort and support",
            "EVA midsole for lightweight cushioning",
            "High abrasion rubber outsole",
            "Die-cut EVA sockliner",
            "Padded foam sockliner for added comfort",
        ],
        photos: ["1543508282-6319a3e2621f", "1600269452121-4f2416e55c28", "1606107557195-0e29a4b5b4aa"],
        colors: [("White", "#FFFFFF"), ("Black", "#000000"), ("Chalk", "#EAE8DC")],
        sizes: &["6", "7", "8", "9", "10", "11"],
        rating: 4.3,
        reviews: 92,
        is_new: false,
        is_featured: false,
        is_popular: true,
        is_on_sale: false,
        tags: ["classic", "leather", "heritage"],
    },
    SeedProduct {
        id: 5,
        name: "Chuck Taylor All Star",
        brand: "Converse",
        category: "Casual",
        price: 3499,
        original_price: None,
        description: "The iconic Chuck Taylor All Star with canvas upper and timeless design.",
        features: [
            "Canvas upper for lightweight comfort",
            "Medial eyelets enhance airflow",
            "OrthoLite insole for cushioning",
            "Diamond pattern outsole",
            "Signature Chuck Taylor ankle patch",
        ],
        photos: ["1607522370275-f14206abe5d3", "1556048219-bb6978360b84", "1494496195158-c3becb4f2475"],
        colors: [("Optical White", "#FFFFFF"), ("Black", "#000000"), ("Red", "#EF4444")],
        sizes: &["5", "6", "7", "8", "9", "10", "11", "12"],
        rating: 4.4,
        reviews: 318,
        is_new: false,
        is_featured: false,
        is_popular: true,
        is_on_sale: false,
        tags: ["classic", "canvas", "casual"],
    },
    SeedProduct {
        id: 6,
        name: "SuperRep Go",
        brand: "Nike",
        category: "Training",
        price: 6499,
        original_price: None,
        description: "Versatile training shoes designed for circuit training, HIIT workouts, and cardio.",
        features: [
            "Mesh upper for ventilation",
            "Arc on the outsole for smooth transitions",
            "Cushlon foam midsole provides responsive cushioning",
            "Burpee break for flexibility",
            "Rope wrap for durability during rope climbs",
        ],
        photos: ["1606890658317-7d14490b76fd", "1608231387042-66d1773070a5", "1600269452121-4f2416e55c28"],
        colors: [("Black/White", "#000000"), ("Racer Blue", "#2463EB"), ("Digital Pink", "#EC4899")],
        sizes: &["6", "7", "8", "9", "10", "11"],
        rating: 4.6,
        reviews: 86,
        is_new: true,
        is_featured: false,
        is_popular: false,
        is_on_sale: false,
        tags: ["training", "hiit", "fitness"],
    },
    SeedProduct {
        id: 7,
        name: "RS-X Bold",
        brand: "Puma",
        category: "Lifestyle",
        price: 7499,
        original_price: Some(8999),
        description: "Bold and chunky silhouette with futuristic design elements and maximum style impact.",
        features: [
            "Mesh and synthetic upper",
            "Bulky design with bold colors",
            "RS cushioning technology",
            "Rubber outsole for traction",
            "Padded collar and tongue for comfort",
        ],
        photos: ["1605408499391-6368c628ef42", "1582588678413-dbf45f4823e9", "1595341888016-a392ef81b7de"],
        colors: [("Puma White", "#FFFFFF"), ("High Risk Red", "#DC2626"), ("Puma Black", "#000000")],
        sizes: &["7", "8", "9", "10", "11"],
        rating: 4.3,
        reviews: 59,
        is_new: false,
        is_featured: false,
        is_popular: false,
        is_on_sale: true,
        tags: ["chunky", "retro", "streetstyle"],
    },
    SeedProduct {
        id: 8,
        name: "Metcon 7",
        brand: "Nike",
        category: "Training",
        price: 7999,
        original_price: None,
        description: "The ultimate training shoe for weightlifting and high-intensity workouts.",
        features: [
            "Mesh upper with textured overlays for durability",
            "Wide, flat heel for stability during lifts",
            "Firm foam midsole for security",
            "Removable Hyperlift insert",
            "Rubber tread on the outsole for traction",
        ],
        photos: ["1539185441755-769473a23570", "1460353581641-37baddab0fa2", "1491553895911-0055eca6402d"],
        colors: [("Black", "#000000"), ("University Red", "#DC2626"), ("Particle Grey", "#6B7280")],
        sizes: &["7", "8", "9", "10", "11", "12"],
        rating: 4.7,
        reviews: 142,
        is_new: false,
        is_featured: false,
        is_popular: true,
        is_on_sale: false,
        tags: ["crossfit", "weightlifting", "training"],
    },
    SeedProduct {
        id: 9,
        name: "Gel-Kayano 28",
        brand: "Asics",
        category: "Running",
        price: 8999,
        original_price: None,
        description: "Premium stability running shoes with exceptional cushioning for long-distance comfort.",
        features: [
            "Engineered mesh upper for breathability",
            "Dynamic DuoMax Support System",
            "Rearfoot and Forefoot GEL Technology Cushioning System",
            "FLYTEFOAM Propel Technology for bounce",
            "AHAR Plus Outsole for durability",
        ],
        photos: ["1465453869711-7e174808ace9", "1460353581641-37baddab0fa2", "1606753930828-beee975f3ff8"],
        colors: [("Black/Graphite Grey", "#000000"), ("White/Pure Silver", "#FFFFFF"), ("Thunder Blue", "#1E3A8A")],
        sizes: &["7", "8", "9", "10", "11", "12"],
        rating: 4.9,
        reviews: 207,
        is_new: false,
        is_featured: true,
        is_popular: false,
        is_on_sale: false,
        tags: ["running", "stability", "cushioned"],
    },
    SeedProduct {
        id: 10,
        name: "574 Core",
        brand: "New Balance",
        category: "Lifestyle",
        price: 5499,
        original_price: None,
        description: "Iconic silhouette combining style and comfort with ENCAP midsole technology.",
        features: [
            "Suede and mesh upper for support and breathability",
            "ENCAP midsole technology for support and durability",
            "EVA foam midsole for cushioning",
            "Rubber outsole for traction",
            "Padded collar and tongue",
        ],
        photos: ["1539185441755-769473a23570", "1607522370275-f14206abe5d3", "1491553895911-0055eca6402d"],
        colors: [("Navy", "#1E3A8A"), ("Grey", "#6B7280"), ("Burgundy", "#9F1239")],
        sizes: &["7", "8", "9", "10", "11"],
        rating: 4.4,
        reviews: 98,
        is_new: false,
        is_featured: false,
        is_popular: true,
        is_on_sale: false,
        tags: ["classic", "lifestyle", "retro"],
    },
    SeedProduct {
        id: 11,
        name: "Stan Smith",
        brand: "Adidas",
        category: "Lifestyle",
        price: 6499,
        original_price: None,
        description: "The iconic tennis-inspired sneaker with clean lines and classic style.",
        features: [
            "Full grain leather upper",
            "Perforated 3-Stripes",
            "Rubber cupsole",
            "OrthoLite sockliner",
            "Synthetic leather lining",
        ],
        photos: ["1543508282-5c1f427f023f", "1587563871167-1ee9c731aefb", "1600269452121-4f2416e55c28"],
        colors: [("White/Green", "#FFFFFF"), ("White/Navy", "#FFFFFF"), ("White/Black", "#FFFFFF")],
        sizes: &["5", "6", "7", "8", "9", "10", "11", "12"],
        rating: 4.5,
        reviews: 326,
        is_new: false,
        is_featured: false,
        is_popular: true,
        is_on_sale: false,
        tags: ["classic", "tennis", "casual"],
    },
    SeedProduct {
        id: 12,
        name: "Fresh Foam 1080v11",
        brand: "New Balance",
        category: "Running",
        price: 9999,
        original_price: None,
        description: "Premium cushioned running shoes for maximum comfort on long distances.",
        features: [
            "Engineered Hypoknit upper",
            "Fresh Foam X midsole",
            "Ultra Heel design hugs the back of the foot",
            "Blown rubber outsole",
            "Bootie construction for a snug fit",
        ],
        photos: ["1542291026-7eec264c27ff", "1595341888016-a392ef81b7de", "1465453869711-7e174808ace9"],
        colors: [("White", "#FFFFFF"), ("Black", "#000000"), ("Light Blue", "#93C5FD")],
        sizes: &["7", "8", "9", "10", "11", "12"],
        rating: 4.8,
        reviews: 183,
        is_new: false,
        is_featured: true,
        is_popular: false,
        is_on_sale: false,
        tags: ["running", "cushioned", "comfort"],
    },
];

impl SeedProduct {
    fn to_product(&self) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name.to_owned(),
            brand: self.brand.to_owned(),
            category: self.category.to_owned(),
            price: Price::from_rupees(self.price),
            original_price: self.original_price.map(Price::from_rupees),
            description: self.description.to_owned(),
            features: self.features.iter().map(|f| (*f).to_owned()).collect(),
            images: self
                .photos
                .iter()
                .map(|photo| format!("{IMAGE_PREFIX}{photo}{IMAGE_SUFFIX}"))
                .collect(),
            colors: self
                .colors
                .iter()
                .map(|(name, value)| ColorOption::new(*name, *value))
                .collect(),
            sizes: self.sizes.iter().map(|s| (*s).to_owned()).collect(),
            rating: self.rating,
            reviews: self.reviews,
            is_new: self.is_new,
            is_featured: self.is_featured,
            is_popular: self.is_popular,
            is_on_sale: self.is_on_sale,
            gender: Gender::Unisex,
            tags: self.tags.iter().map(|t| (*t).to_owned()).collect(),
        }
    }
}

/// The hand-written products, ids 1 through 12.
#[must_use]
pub fn seed_products() -> Vec<Product> {
    SEED.iter().map(SeedProduct::to_product).collect()
}

/// Derive ids `seed.len() + 1 ..= LAST_GENERATED_ID` from the seed products.
///
/// Product `i` copies seed product `i % 12`, gets a name suffix, a price nudged
/// by a multiple of 100 in `-500..=400` and flags derived from `i`. Prices come
/// from an RNG seeded with `rng_seed`, so a given seed always yields the same
/// catalog.
#[must_use]
pub fn expand(seed: &[Product], rng_seed: u64) -> Vec<Product> {
    let mut rng = StdRng::seed_from_u64(rng_seed);
    let first = u32::try_from(seed.len()).unwrap_or(u32::MAX).saturating_add(1);

    (first..=LAST_GENERATED_ID)
        .filter_map(|i| {
            let index = usize::try_from(i).ok()?;
            let template = seed.get(index % seed.len())?;
            let suffix = NAME_SUFFIXES.get(index % NAME_SUFFIXES.len())?;
            let nudge: i64 = rng.random_range(-5_i64..5) * 100;

            let mut product = template.clone();
            product.id = ProductId::new(i);
            product.name = format!("{} {suffix}", template.name);
            product.price = template.price + Price::from_rupees(nudge);
            product.is_new = i % 7 == 0;
            product.is_on_sale = i % 5 == 0;
            product.is_featured = i % 10 == 0;
            product.is_popular = i % 8 == 0;
            if i % 3 == 0 {
                product.colors.push(ColorOption::new("Teal", "#14B8A6"));
            }
            Some(product)
        })
        .collect()
}
