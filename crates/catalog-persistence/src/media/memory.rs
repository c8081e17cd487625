//! Recording image host for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use super::ImageHost;
use crate::error::{PersistenceError, Result};

/// [`ImageHost`] that records every call instead of talking to a remote service
#[derive(Debug, Default)]
pub struct InMemoryImageHost {
    uploads: Mutex<Vec<String>>,
    destroyed: Mutex<Vec<String>>,
    fail_destroy: AtomicBool,
}

impl InMemoryImageHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads uploaded so far
    pub fn uploads(&self) -> Vec<String> {
        self.uploads.lock().map(|u| u.clone()).unwrap_or_default()
    }

    /// Public ids destroyed so far, including failed attempts
    pub fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().map(|d| d.clone()).unwrap_or_default()
    }

    /// Total calls of either kind
    pub fn call_count(&self) -> usize {
        self.uploads().len() + self.destroyed().len()
    }

    /// Make subsequent `destroy` calls fail
    pub fn fail_destroy(&self, fail: bool) {
        self.fail_destroy.store(fail, Ordering::SeqCst);
    }

    fn record(list: &Mutex<Vec<String>>, value: &str) -> Result<usize> {
        let mut guard = list
            .lock()
            .map_err(|_| PersistenceError::ImageHost("recorder poisoned".to_string()))?;
        guard.push(value.to_string());
        Ok(guard.len())
    }
}

#[async_trait]
impl ImageHost for InMemoryImageHost {
    async fn upload(&self, data: &str, folder: &str) -> Result<String> {
        let n = Self::record(&self.uploads, data)?;
        Ok(format!(
            "https://images.test/image/upload/v1/{folder}/img{n}.jpg"
        ))
    }

    async fn destroy(&self, public_id: &str) -> Result<()> {
        Self::record(&self.destroyed, public_id)?;
        if self.fail_destroy.load(Ordering::SeqCst) {
            return Err(PersistenceError::ImageHost(format!(
                "destroy {public_id}: not found"
            )));
        }
        Ok(())
    }
}
