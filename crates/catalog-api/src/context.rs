//! # API Context
//!
//! Application state and dependency injection for HTTP handlers.

use std::sync::Arc;

use catalog_persistence::{
    DisabledImageHost, InMemoryImageHost, InMemoryProductRepository, InMemorySnapshotCache,
    SharedImageHost, SharedProductRepository, SharedSnapshotCache,
};

use crate::service::CatalogService;

/// Application context shared across all handlers
#[derive(Clone)]
pub struct ApiContext {
    /// Catalog operations
    pub catalog: CatalogService,
}

impl ApiContext {
    /// Create a new API context from its backing services
    pub fn new(
        repo: SharedProductRepository,
        cache: SharedSnapshotCache,
        images: SharedImageHost,
    ) -> Self {
        Self {
            catalog: CatalogService::new(repo, cache, images),
        }
    }

    /// Context backed entirely by in-memory stores
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryProductRepository::new()),
            Arc::new(InMemorySnapshotCache::new()),
            Arc::new(InMemoryImageHost::new()),
        )
    }
}

/// Builder for ApiContext
#[derive(Default)]
pub struct ApiContextBuilder {
    repo: Option<SharedProductRepository>,
    cache: Option<SharedSnapshotCache>,
    images: Option<SharedImageHost>,
}

impl ApiContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_repository(mut self, repo: SharedProductRepository) -> Self {
        self.repo = Some(repo);
        self
    }

    #[must_use]
    pub fn with_cache(mut self, cache: SharedSnapshotCache) -> Self {
        self.cache = Some(cache);
        self
    }

    #[must_use]
    pub fn with_image_host(mut self, images: SharedImageHost) -> Self {
        self.images = Some(images);
        self
    }

    /// Build the context. Without an image host, uploads are refused.
    pub fn build(self) -> Result<ApiContext, &'static str> {
        let repo = self.repo.ok_or("product repository required")?;
        let cache = self.cache.ok_or("snapshot cache required")?;
        let images = self
            .images
            .unwrap_or_else(|| Arc::new(DisabledImageHost));
        Ok(ApiContext::new(repo, cache, images))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_repository() {
        let result = ApiContextBuilder::new()
            .with_cache(Arc::new(InMemorySnapshotCache::new()))
            .build();
        assert_eq!(result.err(), Some("product repository required"));
    }

    #[test]
    fn test_builder_requires_cache() {
        let result = ApiContextBuilder::new()
            .with_repository(Arc::new(InMemoryProductRepository::new()))
            .build();
        assert_eq!(result.err(), Some("snapshot cache required"));
    }

    #[tokio::test]
    async fn test_builder_without_image_host_refuses_uploads() {
        let ctx = ApiContextBuilder::new()
            .with_repository(Arc::new(InMemoryProductRepository::new()))
            .with_cache(Arc::new(InMemorySnapshotCache::new()))
            .build()
            .unwrap();

        let input = catalog_domain::NewProduct {
            name: "Tee".to_string(),
            description: String::new(),
            price: 10.0,
            image: Some("data:image/png;base64,AAAA".to_string()),
            category: "t-shirts".to_string(),
        };
        let err = ctx.catalog.create(input).await.unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        assert!(ctx.catalog.list_all().await.unwrap().is_empty());
    }
}
