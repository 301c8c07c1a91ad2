use std::path::PathBuf;

use async_trait::async_trait;

use crate::types::Digest;
use crate::Result;

#[async_trait]
pub trait DigestStorage: Send + Sync {
    /// Name of the backend, e.g. "csv"
    fn name(&self) -> &str;

    /// Persist a digest and return where it went
    async fn save(&self, digest: &Digest) -> Result<PathBuf>;
}
