//! Catalog Seeder CLI
//!
//! Creates generated products through the catalog API and features a few.

use anyhow::Result;
use catalog_seeder::{CatalogClient, ProductGenerator};
use clap::Parser;
use rand::seq::SliceRandom;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "catalog-seeder")]
#[command(about = "Seed the product catalog with generated products")]
struct Args {
    /// API server root
    #[arg(long, default_value = "http://localhost:8080")]
    api_url: String,

    /// Number of products to create
    #[arg(short, long, default_value = "20")]
    count: u32,

    /// How many of the created products to mark featured
    #[arg(short, long, default_value = "4")]
    featured: usize,

    /// Only generate products in this category
    #[arg(long)]
    category: Option<String>,

    /// Attach remote image URLs (requires a configured image host)
    #[arg(long)]
    images: bool,

    /// Dry run (don't post to API)
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("catalog_seeder=info".parse()?))
        .init();

    let args = Args::parse();

    let client = CatalogClient::new(&args.api_url);
    let mut generator = ProductGenerator::new(args.category.clone()).with_images(args.images);
    let mut rng = rand::thread_rng();

    info!("Seeding {} products into {}", args.count, client.products_url());

    let mut created = Vec::new();
    for _ in 0..args.count {
        let product = generator.generate(&mut rng);

        if args.dry_run {
            info!(
                "  [dry-run] {} | {} | ${:.2}",
                product.name, product.category, product.price
            );
            continue;
        }

        match client.create_product(&product).await {
            Ok(stored) => {
                info!("  created {} ({})", stored.name, stored.id);
                created.push(stored);
            }
            Err(err) => warn!("Failed to create product: {err:#}"),
        }
    }

    let picks: Vec<_> = created
        .choose_multiple(&mut rng, args.featured.min(created.len()))
        .map(|p| p.id)
        .collect();

    for id in picks {
        match client.toggle_featured(id).await {
            Ok(product) => info!("  featured {}", product.name),
            Err(err) => warn!("Failed to feature product {id}: {err:#}"),
        }
    }

    info!(
        "Seeding complete: {} generated, {} created",
        generator.generated(),
        created.len()
    );
    Ok(())
}
