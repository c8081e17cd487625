//! Thin HTTP client for the catalog API.

use anyhow::{Context, Result, bail};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use catalog_domain::{NewProduct, Product, ProductId};

#[derive(Debug, Deserialize)]
struct ProductEnvelope {
    product: Product,
}

/// Client for `/api/products`
pub struct CatalogClient {
    http: Client,
    products_url: String,
}

impl CatalogClient {
    /// `api_url` is the server root, e.g. `http://localhost:8080`
    pub fn new(api_url: &str) -> Self {
        Self {
            http: Client::new(),
            products_url: format!("{}/api/products", api_url.trim_end_matches('/')),
        }
    }

    pub fn products_url(&self) -> &str {
        &self.products_url
    }

    /// Create a product and return it as stored.
    pub async fn create_product(&self, product: &NewProduct) -> Result<Product> {
        let response = self
            .http
            .post(&self.products_url)
            .json(product)
            .send()
            .await
            .context("create request failed")?;

        let status = response.status();
        if status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            bail!("API returned status {status}: {body}");
        }

        let envelope: ProductEnvelope = response.json().await?;
        Ok(envelope.product)
    }

    /// Flip a product's featured flag.
    pub async fn toggle_featured(&self, id: ProductId) -> Result<Product> {
        let response = self
            .http
            .patch(format!("{}/{id}", self.products_url))
            .send()
            .await
            .context("toggle request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("API returned status {status}: {body}");
        }

        Ok(response.json().await?)
    }
}
