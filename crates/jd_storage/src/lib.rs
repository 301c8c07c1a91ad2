use std::path::{Path, PathBuf};

use jd_core::{Digest, DigestStorage, Error, Result};

pub mod backends;

pub use backends::*;

/// Where digests are written and how files are named.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub prefix: String,
}

impl ReportConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: "journal_digest".to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// `<dir>/<prefix>_<YYYY-MM-DD>.<extension>`, dated by the digest.
    pub fn path_for(&self, digest: &Digest, extension: &str) -> PathBuf {
        let date = digest.generated_at.format("%Y-%m-%d");
        self.output_dir
            .join(format!("{}_{}.{}", self.prefix, date, extension))
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

pub(crate) async fn write_file(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, contents).await?;
    Ok(())
}

/// Picks a backend by name: `csv`, `html` or `memory`.
pub fn create_storage(kind: &str, config: ReportConfig) -> Result<Box<dyn DigestStorage>> {
    match kind.to_lowercase().as_str() {
        "csv" => Ok(Box::new(CsvStorage::new(config))),
        "html" => Ok(Box::new(HtmlStorage::new(config))),
        "memory" => Ok(Box::new(MemoryStorage::new())),
        other => Err(Error::Storage(format!(
            "Unknown report format '{}'. Available formats: csv, html, memory",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::backends::*;
    pub use super::{create_storage, ReportConfig};
}
