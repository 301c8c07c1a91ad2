use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use jd_core::{Digest, DigestStorage, Result};
use tokio::sync::RwLock;

/// Keeps digests in memory; handy for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    digests: Arc<RwLock<Vec<Digest>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn digests(&self) -> Vec<Digest> {
        self.digests.read().await.clone()
    }
}

#[async_trait]
impl DigestStorage for MemoryStorage {
    fn name(&self) -> &str {
        "memory"
    }

    async fn save(&self, digest: &Digest) -> Result<PathBuf> {
        let mut digests = self.digests.write().await;
        digests.push(digest.clone());
        Ok(PathBuf::from(format!("memory://{}", digests.len() - 1)))
    }
}
