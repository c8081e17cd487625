//! Image host used when no provider is configured.

use async_trait::async_trait;

use super::ImageHost;
use crate::error::{PersistenceError, Result};

const NOT_CONFIGURED: &str = "image host not configured";

/// [`ImageHost`] that refuses every call and keeps nothing.
///
/// Products without images still work; creating one with an image fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledImageHost;

#[async_trait]
impl ImageHost for DisabledImageHost {
    async fn upload(&self, _data: &str, _folder: &str) -> Result<String> {
        Err(PersistenceError::ImageHost(NOT_CONFIGURED.to_string()))
    }

    async fn destroy(&self, _public_id: &str) -> Result<()> {
        Err(PersistenceError::ImageHost(NOT_CONFIGURED.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_err;

    #[tokio::test]
    async fn test_upload_is_refused() {
        let err = assert_err!(DisabledImageHost.upload("data:image/png;base64,AAAA", "products").await);
        assert_eq!(err.to_string(), "Image host error: image host not configured");
    }

    #[tokio::test]
    async fn test_destroy_is_refused() {
        assert_err!(DisabledImageHost.destroy("products/abc").await);
    }
}
