use std::path::PathBuf;

use async_trait::async_trait;
use jd_core::{Digest, DigestStorage, Error, Result};

use crate::{write_file, ReportConfig};

pub const CSV_COLUMNS: [&str; 5] = ["title", "url", "abstract", "source", "summary"];

/// One row per summarized article; the header is written even for empty digests.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    config: ReportConfig,
}

impl CsvStorage {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn render(digest: &Digest) -> Result<Vec<u8>> {
        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(CSV_COLUMNS)?;
        for row in &digest.rows {
            writer.serialize(row)?;
        }
        writer.into_inner().map_err(|e| Error::Io(e.into_error()))
    }
}

#[async_trait]
impl DigestStorage for CsvStorage {
    fn name(&self) -> &str {
        "csv"
    }

    async fn save(&self, digest: &Digest) -> Result<PathBuf> {
        let path = self.config.path_for(digest, "csv");
        write_file(&path, &Self::render(digest)?).await?;
        tracing::info!("💾 Saved {} rows to {}", digest.rows.len(), path.display());
        Ok(path)
    }
}
