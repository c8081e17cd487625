//! ScyllaDB repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use scylla::{DeserializeRow, QueryResult, Session, SessionBuilder};
use uuid::Uuid;

use super::traits::ProductRepository;
use crate::error::{PersistenceError, Result};
use catalog_domain::{Product, ProductId, ProductSummary};

const PRODUCT_COLUMNS: &str = "product_id, name, description, price, image, category, \
                               is_featured, created_at, updated_at";

// =============================================================================
// SCYLLA CONFIGURATION
// =============================================================================

/// ScyllaDB connection configuration.
#[derive(Debug, Clone)]
pub struct ScyllaConfig {
    pub hosts: Vec<String>,
    pub keyspace: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Replication factor used when the keyspace has to be created
    pub replication_factor: u32,
}

impl Default for ScyllaConfig {
    fn default() -> Self {
        Self {
            hosts: vec!["localhost:9042".to_string()],
            keyspace: "catalog".to_string(),
            username: None,
            password: None,
            replication_factor: 1,
        }
    }
}

// =============================================================================
// SCYLLA CLIENT
// =============================================================================

/// ScyllaDB client wrapper.
pub struct ScyllaClient {
    session: Arc<Session>,
    pub config: ScyllaConfig,
}

impl ScyllaClient {
    /// Create a new ScyllaDB client, creating keyspace and tables if absent.
    pub async fn new(config: ScyllaConfig) -> Result<Self> {
        if config.keyspace.is_empty()
            || !config
                .keyspace
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(PersistenceError::InvalidQuery(format!(
                "invalid keyspace name '{}'",
                config.keyspace
            )));
        }

        let mut builder = SessionBuilder::new().known_nodes(&config.hosts);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.user(user, pass);
        }

        let session = builder.build().await?;

        let client = Self {
            session: Arc::new(session),
            config,
        };
        client.ensure_schema().await?;

        Ok(client)
    }

    /// Create the keyspace, the `products` table and its secondary indexes.
    async fn ensure_schema(&self) -> Result<()> {
        let keyspace = &self.config.keyspace;

        self.session
            .query_unpaged(
                format!(
                    "CREATE KEYSPACE IF NOT EXISTS {keyspace} WITH replication = \
                     {{'class': 'SimpleStrategy', 'replication_factor': {}}}",
                    self.config.replication_factor
                ),
                (),
            )
            .await?;

        // Use keyspace
        self.session
            .query_unpaged(format!("USE {keyspace}"), ())
            .await?;

        let statements = [
            r"
            CREATE TABLE IF NOT EXISTS products (
                product_id uuid PRIMARY KEY,
                name text,
                description text,
                price double,
                image text,
                category text,
                is_featured boolean,
                created_at bigint,
                updated_at bigint
            )
            ",
            "CREATE INDEX IF NOT EXISTS products_category_idx ON products (category)",
            "CREATE INDEX IF NOT EXISTS products_featured_idx ON products (is_featured)",
        ];

        for statement in statements {
            self.session.query_unpaged(statement, ()).await?;
        }

        tracing::info!(keyspace = %keyspace, "Catalog schema ready");
        Ok(())
    }
}

// =============================================================================
// ROW MAPPING
// =============================================================================

#[derive(DeserializeRow)]
struct ProductRow {
    product_id: Uuid,
    name: String,
    description: String,
    price: f64,
    image: Option<String>,
    category: String,
    is_featured: bool,
    created_at: i64,
    updated_at: i64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: row.product_id,
            name: row.name,
            description: row.description,
            price: row.price,
            image: row.image.filter(|url| !url.is_empty()),
            category: row.category,
            is_featured: row.is_featured,
            created_at: from_millis(row.created_at),
            updated_at: from_millis(row.updated_at),
        }
    }
}

#[derive(DeserializeRow)]
struct SummaryRow {
    product_id: Uuid,
    name: String,
    description: String,
    image: Option<String>,
    price: f64,
}

impl From<SummaryRow> for ProductSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.product_id,
            name: row.name,
            description: row.description,
            image: row.image.filter(|url| !url.is_empty()),
            price: row.price,
        }
    }
}

fn from_millis(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

fn scylla_err(err: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::Scylla(err.to_string())
}

fn collect_products(result: QueryResult) -> Result<Vec<Product>> {
    let rows = result.into_rows_result().map_err(scylla_err)?;
    rows.rows::<ProductRow>()
        .map_err(scylla_err)?
        .map(|row| row.map(Product::from).map_err(scylla_err))
        .collect()
}

/// `[applied]` column of a conditional statement
fn lwt_applied(result: QueryResult) -> Result<bool> {
    let rows = result.into_rows_result().map_err(scylla_err)?;
    let (applied,) = rows.first_row::<(bool,)>().map_err(scylla_err)?;
    Ok(applied)
}

fn collect_summaries(result: QueryResult) -> Result<Vec<ProductSummary>> {
    let rows = result.into_rows_result().map_err(scylla_err)?;
    rows.rows::<SummaryRow>()
        .map_err(scylla_err)?
        .map(|row| row.map(ProductSummary::from).map_err(scylla_err))
        .collect()
}

// =============================================================================
// PRODUCT REPOSITORY
// =============================================================================

/// Repository for product operations.
pub struct ScyllaProductRepository {
    client: Arc<ScyllaClient>,
}

impl ScyllaProductRepository {
    /// Create a new product repository.
    pub fn new(client: Arc<ScyllaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductRepository for ScyllaProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products");

        let result = self.client.session.query_unpaged(query, ()).await?;
        collect_products(result)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE category = ?");

        let result = self
            .client
            .session
            .query_unpaged(query, (category,))
            .await?;
        collect_products(result)
    }

    async fn find_featured(&self) -> Result<Vec<Product>> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE is_featured = ?");

        let result = self.client.session.query_unpaged(query, (true,)).await?;
        collect_products(result)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let query = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE product_id = ?");

        let result = self.client.session.query_unpaged(query, (id,)).await?;
        Ok(collect_products(result)?.into_iter().next())
    }

    async fn insert(&self, product: &Product) -> Result<()> {
        let query = format!(
            "INSERT INTO products ({PRODUCT_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"
        );

        self.client
            .session
            .query_unpaged(
                query,
                (
                    product.id,
                    &product.name,
                    &product.description,
                    product.price,
                    product.image.as_deref(),
                    &product.category,
                    product.is_featured,
                    product.created_at.timestamp_millis(),
                    product.updated_at.timestamp_millis(),
                ),
            )
            .await?;

        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<()> {
        let query = r"
            UPDATE products
            SET name = ?,
                description = ?,
                price = ?,
                image = ?,
                category = ?,
                is_featured = ?,
                updated_at = ?
            WHERE product_id = ?
            IF EXISTS
        ";

        // Lightweight transaction: a plain UPDATE would upsert a partial row
        let result = self
            .client
            .session
            .query_unpaged(
                query,
                (
                    &product.name,
                    &product.description,
                    product.price,
                    product.image.as_deref(),
                    &product.category,
                    product.is_featured,
                    product.updated_at.timestamp_millis(),
                    product.id,
                ),
            )
            .await?;

        if !lwt_applied(result)? {
            return Err(PersistenceError::product_not_found(product.id));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let Some(product) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        self.client
            .session
            .query_unpaged("DELETE FROM products WHERE product_id = ?", (id,))
            .await?;

        Ok(Some(product))
    }

    async fn sample(&self, size: usize) -> Result<Vec<ProductSummary>> {
        let query = "SELECT product_id, name, description, image, price FROM products";

        let result = self.client.session.query_unpaged(query, ()).await?;
        let mut summaries = collect_summaries(result)?;

        // No server-side sampling in CQL: shuffle the projection and keep `size`
        summaries.shuffle(&mut rand::thread_rng());
        summaries.truncate(size);

        Ok(summaries)
    }
}
