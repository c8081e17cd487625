//! Random product generation.

use rand::Rng;
use rand::seq::SliceRandom;

use catalog_domain::NewProduct;

/// Storefront categories products are spread across
pub const CATEGORIES: &[&str] = &[
    "jeans", "t-shirts", "shoes", "glasses", "jackets", "suits", "bags",
];

const ADJECTIVES: &[&str] = &[
    "Classic", "Slim", "Vintage", "Urban", "Premium", "Relaxed", "Tailored", "Everyday",
];

const MATERIALS: &[&str] = &["cotton", "denim", "leather", "linen", "wool", "canvas"];

/// Generates plausible products, optionally pinned to one category.
pub struct ProductGenerator {
    category: Option<String>,
    with_images: bool,
    sequence: u32,
}

impl ProductGenerator {
    pub fn new(category: Option<String>) -> Self {
        Self {
            category,
            with_images: false,
            sequence: 0,
        }
    }

    /// Attach a remote image URL to every generated product.
    #[must_use]
    pub fn with_images(mut self, enabled: bool) -> Self {
        self.with_images = enabled;
        self
    }

    /// Generate the next product.
    pub fn generate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> NewProduct {
        self.sequence += 1;

        let category = match &self.category {
            Some(category) => category.clone(),
            None => (*CATEGORIES.choose(rng).unwrap_or(&"t-shirts")).to_string(),
        };
        let adjective = ADJECTIVES.choose(rng).unwrap_or(&"Classic");
        let material = MATERIALS.choose(rng).unwrap_or(&"cotton");

        // Two decimal places
        let cents: u32 = rng.gen_range(500..25_000);
        let price = f64::from(cents) / 100.0;

        let image = self.with_images.then(|| {
            format!(
                "https://picsum.photos/seed/{category}-{}/600/600.jpg",
                self.sequence
            )
        });

        NewProduct {
            name: format!("{adjective} {} #{}", singular(&category), self.sequence),
            description: format!("{adjective} {material} {category} for every season."),
            price,
            image,
            category,
        }
    }

    /// Number of products generated so far.
    pub fn generated(&self) -> u32 {
        self.sequence
    }
}

fn singular(category: &str) -> &str {
    match category {
        "jeans" | "glasses" => category,
        "t-shirts" => "T-shirt",
        other => other.strip_suffix('s').unwrap_or(other),
    }
}
