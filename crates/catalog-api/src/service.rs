//! # Catalog Service
//!
//! Per-operation orchestration between the catalog store, the featured
//! snapshot and the image host. Handlers stay thin and call into this.

use catalog_domain::{
    NewProduct, PRODUCT_IMAGE_FOLDER, Product, ProductId, ProductSummary,
    RECOMMENDATION_SAMPLE_SIZE,
};
use catalog_persistence::{
    FeaturedProducts, PersistenceError, SharedImageHost, SharedProductRepository,
    SharedSnapshotCache, product_image_public_id,
};

use crate::error::ApiResult;

/// Catalog operations behind the HTTP surface
#[derive(Clone)]
pub struct CatalogService {
    repo: SharedProductRepository,
    images: SharedImageHost,
    featured: FeaturedProducts,
}

impl CatalogService {
    pub fn new(
        repo: SharedProductRepository,
        cache: SharedSnapshotCache,
        images: SharedImageHost,
    ) -> Self {
        let featured = FeaturedProducts::new(repo.clone(), cache);
        Self {
            repo,
            images,
            featured,
        }
    }

    /// Every product in the catalog
    pub async fn list_all(&self) -> ApiResult<Vec<Product>> {
        Ok(self.repo.find_all().await?)
    }

    /// Featured products through the cache-aside path
    pub async fn featured(&self) -> ApiResult<Vec<Product>> {
        Ok(self.featured.read().await?)
    }

    /// Products in `category` (exact match)
    pub async fn by_category(&self, category: &str) -> ApiResult<Vec<Product>> {
        Ok(self.repo.find_by_category(category).await?)
    }

    /// Random recommendation sample
    pub async fn recommended(&self) -> ApiResult<Vec<ProductSummary>> {
        Ok(self.repo.sample(RECOMMENDATION_SAMPLE_SIZE).await?)
    }

    /// Create a product, uploading its image first when one is supplied
    pub async fn create(&self, input: NewProduct) -> ApiResult<Product> {
        input.validate()?;

        let image_url = match input.image_data() {
            Some(data) => Some(self.images.upload(data, PRODUCT_IMAGE_FOLDER).await?),
            None => None,
        };

        let product = Product::new(input, image_url);
        self.repo.insert(&product).await?;

        tracing::info!(
            product_id = %product.id,
            category = %product.category,
            has_image = product.has_image(),
            "Product created"
        );
        Ok(product)
    }

    /// Delete a product and, best effort, its hosted image
    pub async fn delete(&self, id: ProductId) -> ApiResult<Product> {
        let Some(product) = self.repo.find_by_id(id).await? else {
            return Err(PersistenceError::product_not_found(id).into());
        };

        if let Some(url) = product.image.as_deref().filter(|url| !url.is_empty()) {
            // Best effort: a leftover hosted image never blocks deleting the record,
            // so the error is logged and dropped here.
            if let Err(e) = self.remove_image(url).await {
                tracing::warn!(product_id = %id, error = %e, "Failed to delete product image");
            }
        }

        let Some(deleted) = self.repo.delete_by_id(id).await? else {
            return Err(PersistenceError::product_not_found(id).into());
        };

        if deleted.is_featured {
            // Same partial-failure policy as toggling: the store is authoritative
            if let Err(e) = self.featured.refresh().await {
                tracing::warn!(product_id = %id, error = %e, "Failed to refresh featured products cache");
            }
        }

        tracing::info!(product_id = %id, "Product deleted");
        Ok(deleted)
    }

    /// Flip the featured flag of a product
    pub async fn toggle_featured(&self, id: ProductId) -> ApiResult<Product> {
        Ok(self.featured.toggle(id).await?)
    }

    async fn remove_image(&self, url: &str) -> Result<(), PersistenceError> {
        let public_id = product_image_public_id(url).ok_or_else(|| {
            PersistenceError::ImageHost(format!("cannot derive public id from '{url}'"))
        })?;

        self.images.destroy(&public_id).await?;
        tracing::info!(public_id = %public_id, "Product image deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use catalog_persistence::{
        FEATURED_PRODUCTS_KEY, InMemoryImageHost, InMemoryProductRepository,
        InMemorySnapshotCache, ProductRepository,
    };
    use std::sync::Arc;
    use tokio_test::{assert_err, assert_ok};
    use uuid::Uuid;

    struct Fixture {
        repo: Arc<InMemoryProductRepository>,
        cache: Arc<InMemorySnapshotCache>,
        images: Arc<InMemoryImageHost>,
        service: CatalogService,
    }

    fn fixture() -> Fixture {
        let repo = Arc::new(InMemoryProductRepository::new());
        let cache = Arc::new(InMemorySnapshotCache::new());
        let images = Arc::new(InMemoryImageHost::new());
        let service = CatalogService::new(repo.clone(), cache.clone(), images.clone());
        Fixture {
            repo,
            cache,
            images,
            service,
        }
    }

    fn input(name: &str, image: Option<&str>) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "Soft cotton".to_string(),
            price: 29.5,
            image: image.map(String::from),
            category: "t-shirts".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_without_image_skips_upload() {
        let f = fixture();

        let product = assert_ok!(f.service.create(input("tee", None)).await);
        assert!(product.image.is_none());
        assert_eq!(f.images.call_count(), 0);
        assert_eq!(assert_ok!(f.repo.find_all().await), vec![product]);
    }

    #[tokio::test]
    async fn test_create_with_image_stores_hosted_url() {
        let f = fixture();

        let product = assert_ok!(
            f.service
                .create(input("tee", Some("data:image/png;base64,AAAA")))
                .await
        );
        assert_eq!(f.images.uploads(), vec!["data:image/png;base64,AAAA".to_string()]);
        assert!(product.image.unwrap().contains("/products/"));
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let f = fixture();
        let mut bad = input("tee", Some("data:image/png;base64,AAAA"));
        bad.price = -1.0;

        let err = assert_err!(f.service.create(bad).await);
        assert!(matches!(err, ApiError::InvalidInput(_)));
        assert_eq!(f.images.call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_without_image_makes_no_image_call() {
        let f = fixture();
        let product = assert_ok!(f.service.create(input("tee", None)).await);

        assert_ok!(f.service.delete(product.id).await);
        assert_eq!(f.images.call_count(), 0);
        assert!(assert_ok!(f.repo.find_all().await).is_empty());
    }

    #[tokio::test]
    async fn test_delete_destroys_derived_public_id() {
        let f = fixture();
        let product = assert_ok!(
            f.service
                .create(input("tee", Some("https://example.com/tee.png")))
                .await
        );

        assert_ok!(f.service.delete(product.id).await);
        assert_eq!(f.images.destroyed(), vec!["products/img1".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_survives_image_failure() {
        let f = fixture();
        let product = assert_ok!(
            f.service
                .create(input("tee", Some("https://example.com/tee.png")))
                .await
        );
        f.images.fail_destroy(true);

        assert_ok!(f.service.delete(product.id).await);
        assert!(assert_ok!(f.repo.find_by_id(product.id).await).is_none());
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let f = fixture();

        let err = assert_err!(f.service.delete(Uuid::new_v4()).await);
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_featured_refreshes_snapshot() {
        let f = fixture();
        let product = assert_ok!(f.service.create(input("tee", None)).await);
        assert_ok!(f.service.toggle_featured(product.id).await);
        assert_eq!(assert_ok!(f.service.featured().await).len(), 1);

        assert_ok!(f.service.delete(product.id).await);

        assert_eq!(f.cache.peek(FEATURED_PRODUCTS_KEY).await.as_deref(), Some("[]"));
        assert!(assert_ok!(f.service.featured().await).is_empty());
    }

    #[tokio::test]
    async fn test_recommended_caps_at_sample_size() {
        let f = fixture();
        for i in 0..5 {
            assert_ok!(f.service.create(input(&format!("p{i}"), None)).await);
        }

        let picks = assert_ok!(f.service.recommended().await);
        assert_eq!(picks.len(), RECOMMENDATION_SAMPLE_SIZE);
    }

    #[tokio::test]
    async fn test_by_category() {
        let f = fixture();
        assert_ok!(f.service.create(input("tee", None)).await);
        let mut jeans = input("jeans", None);
        jeans.category = "jeans".to_string();
        assert_ok!(f.service.create(jeans).await);

        let result = assert_ok!(f.service.by_category("jeans").await);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "jeans");
    }
}
