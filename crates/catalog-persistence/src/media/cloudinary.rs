//! Cloudinary upload API client.
//!
//! Requests are signed: every parameter except `file`, `api_key` and
//! `signature_algorithm` is sorted, joined as `k=v&k=v`, suffixed with the
//! API secret and hashed with SHA-256.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use super::ImageHost;
use crate::error::{PersistenceError, Result};

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

/// Cloudinary account credentials
#[derive(Debug, Clone, Default)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl CloudinaryConfig {
    /// Whether all credentials are present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.cloud_name.is_empty() && !self.api_key.is_empty() && !self.api_secret.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

/// [`ImageHost`] backed by the Cloudinary REST API
#[derive(Clone)]
pub struct CloudinaryImageHost {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryImageHost {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{API_BASE}/{}/image/{action}", self.config.cloud_name)
    }

    /// Add `timestamp`, `api_key` and the signature to `params`
    fn sign(&self, mut params: BTreeMap<&'static str, String>) -> BTreeMap<&'static str, String> {
        params.insert("timestamp", chrono::Utc::now().timestamp().to_string());

        let signature = signature(&params, &self.config.api_secret);

        params.insert("api_key", self.config.api_key.clone());
        params.insert("signature", signature);
        params.insert("signature_algorithm", "sha256".to_string());
        params
    }

    async fn post<T: for<'de> Deserialize<'de>>(
        &self,
        action: &str,
        params: BTreeMap<&'static str, String>,
    ) -> Result<T> {
        let response = self
            .http
            .post(self.endpoint(action))
            .form(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map_or_else(|_| status.to_string(), |body| body.error.message);
            return Err(PersistenceError::ImageHost(format!("{action} failed: {message}")));
        }

        Ok(response.json::<T>().await?)
    }
}

/// Hex SHA-256 over the sorted `k=v` pairs followed by the secret.
/// `file` is never part of the signed string.
fn signature(params: &BTreeMap<&'static str, String>, secret: &str) -> String {
    let to_sign = params
        .iter()
        .filter(|(key, _)| **key != "file")
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn upload(&self, data: &str, folder: &str) -> Result<String> {
        let mut params = BTreeMap::new();
        params.insert("folder", folder.to_string());
        let mut params = self.sign(params);
        params.insert("file", data.to_string());

        let body: UploadResponse = self.post("upload", params).await?;
        tracing::debug!(url = %body.secure_url, "Image uploaded");
        Ok(body.secure_url)
    }

    async fn destroy(&self, public_id: &str) -> Result<()> {
        let mut params = BTreeMap::new();
        params.insert("public_id", public_id.to_string());
        let params = self.sign(params);

        let body: DestroyResponse = self.post("destroy", params).await?;
        if body.result != "ok" {
            return Err(PersistenceError::ImageHost(format!(
                "destroy {public_id}: {}",
                body.result
            )));
        }
        Ok(())
    }
}
