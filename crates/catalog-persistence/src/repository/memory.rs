//! In-process catalog store used by tests and local runs without ScyllaDB.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rand::seq::SliceRandom;
use tokio::sync::RwLock;

use super::traits::ProductRepository;
use crate::error::{PersistenceError, Result};
use catalog_domain::{Product, ProductId, ProductSummary};

/// Vec backed [`ProductRepository`]. Listing keeps insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<Vec<Product>>,
    queries: AtomicUsize,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-filled with `products`
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: RwLock::new(products),
            queries: AtomicUsize::new(0),
        }
    }

    /// Number of read queries issued so far
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    async fn select(&self, predicate: impl Fn(&Product) -> bool + Send) -> Vec<Product> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.products
            .read()
            .await
            .iter()
            .filter(|product| predicate(product))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.select(|_| true).await)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Product>> {
        Ok(self.select(|product| product.category == category).await)
    }

    async fn find_featured(&self) -> Result<Vec<Product>> {
        Ok(self.select(|product| product.is_featured).await)
    }

    async fn find_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.select(|product| product.id == id).await.into_iter().next())
    }

    async fn insert(&self, product: &Product) -> Result<()> {
        self.products.write().await.push(product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<()> {
        let mut products = self.products.write().await;
        let existing = products
            .iter_mut()
            .find(|p| p.id == product.id)
            .ok_or_else(|| PersistenceError::product_not_found(product.id))?;
        *existing = product.clone();
        Ok(())
    }

    async fn delete_by_id(&self, id: ProductId) -> Result<Option<Product>> {
        let mut products = self.products.write().await;
        let removed = products
            .iter()
            .position(|product| product.id == id)
            .map(|index| products.remove(index));
        Ok(removed)
    }

    async fn sample(&self, size: usize) -> Result<Vec<ProductSummary>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        let products = self.products.read().await;
        let picked = products
            .choose_multiple(&mut rand::thread_rng(), size)
            .map(Product::summary)
            .collect();
        Ok(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_domain::NewProduct;
    use fake::Fake;
    use fake::faker::lorem::en::{Sentence, Word};
    use std::collections::HashSet;
    use tokio_test::assert_ok;

    fn product(category: &str) -> Product {
        Product::new(
            NewProduct {
                name: Word().fake(),
                description: Sentence(2..6).fake(),
                price: 10.0,
                image: None,
                category: category.to_string(),
            },
            None,
        )
    }

    #[tokio::test]
    async fn test_find_by_category_exact_match() {
        let repo = InMemoryProductRepository::with_products(vec![
            product("shoes"),
            product("shoes"),
            product("Shoes"),
            product("bags"),
        ]);

        let shoes = assert_ok!(repo.find_by_category("shoes").await);
        assert_eq!(shoes.len(), 2);
        assert!(shoes.iter().all(|p| p.category == "shoes"));
    }

    #[tokio::test]
    async fn test_update_and_find_featured() {
        let mut featured = product("bags");
        let repo = InMemoryProductRepository::with_products(vec![featured.clone(), product("bags")]);

        featured.toggle_featured();
        assert_ok!(repo.update(&featured).await);

        let result = assert_ok!(repo.find_featured().await);
        assert_eq!(result, vec![featured]);
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let repo = InMemoryProductRepository::new();
        let ghost = product("hats");

        let err = tokio_test::assert_err!(repo.update(&ghost).await);
        assert!(err.is_not_found());
        assert!(assert_ok!(repo.find_all().await).is_empty());
    }

    #[tokio::test]
    async fn test_delete_returns_removed() {
        let target = product("hats");
        let repo = InMemoryProductRepository::with_products(vec![target.clone()]);

        let removed = assert_ok!(repo.delete_by_id(target.id).await);
        assert_eq!(removed, Some(target.clone()));

        let again = assert_ok!(repo.delete_by_id(target.id).await);
        assert!(again.is_none());
        assert!(assert_ok!(repo.find_all().await).is_empty());
    }

    #[tokio::test]
    async fn test_sample_size_and_uniqueness() {
        let repo = InMemoryProductRepository::with_products((0..10).map(|_| product("x")).collect());

        let sample = assert_ok!(repo.sample(3).await);
        assert_eq!(sample.len(), 3);

        let ids: HashSet<_> = sample.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[tokio::test]
    async fn test_sample_smaller_catalog() {
        let repo = InMemoryProductRepository::with_products(vec![product("x")]);
        assert_eq!(assert_ok!(repo.sample(3).await).len(), 1);

        let empty = InMemoryProductRepository::new();
        assert!(assert_ok!(empty.sample(3).await).is_empty());
    }
}
