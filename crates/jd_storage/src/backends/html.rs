use std::fmt::Write as _;
use std::path::PathBuf;

use async_trait::async_trait;
use html_escape::{encode_double_quoted_attribute, encode_text};
use jd_core::{Digest, DigestStorage, Result};

use crate::{write_file, ReportConfig};

/// Standalone HTML page with one table row per summarized article.
#[derive(Debug, Clone)]
pub struct HtmlStorage {
    config: ReportConfig,
}

fn text_cell(text: &str) -> String {
    encode_text(text).replace('\n', "<br>")
}

impl HtmlStorage {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn render(digest: &Digest) -> String {
        let label = encode_text(&digest.label);
        let date = digest.generated_at.format("%Y-%m-%d");

        let mut page = String::new();
        let _ = writeln!(page, "<!DOCTYPE html>");
        let _ = writeln!(page, "<html lang=\"en\">");
        let _ = writeln!(page, "<head>");
        let _ = writeln!(page, "<meta charset=\"utf-8\">");
        let _ = writeln!(page, "<title>Journal digest: {}</title>", label);
        let _ = writeln!(page, "</head>");
        let _ = writeln!(page, "<body>");
        let _ = writeln!(page, "<h1>Journal digest: {}</h1>", label);
        let _ = writeln!(page, "<p>Generated {} &middot; {} articles</p>", date, digest.rows.len());
        let _ = writeln!(page, "<table>");
        let _ = writeln!(page, "<thead><tr><th>Title</th><th>Journal</th><th>Summary</th></tr></thead>");
        let _ = writeln!(page, "<tbody>");
        for row in &digest.rows {
            let _ = writeln!(
                page,
                "<tr><td><a href=\"{}\">{}</a></td><td>{}</td><td>{}</td></tr>",
                encode_double_quoted_attribute(&row.url),
                text_cell(&row.title),
                text_cell(&row.source),
                text_cell(&row.summary),
            );
        }
        let _ = writeln!(page, "</tbody>");
        let _ = writeln!(page, "</table>");
        let _ = writeln!(page, "</body>");
        let _ = writeln!(page, "</html>");
        page
    }
}

#[async_trait]
impl DigestStorage for HtmlStorage {
    fn name(&self) -> &str {
        "html"
    }

    async fn save(&self, digest: &Digest) -> Result<PathBuf> {
        let path = self.config.path_for(digest, "html");
        write_file(&path, Self::render(digest).as_bytes()).await?;
        tracing::info!("💾 Saved report '{}' to {}", digest.label, path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jd_core::SummaryRecord;

    fn digest() -> Digest {
        Digest::new(vec![SummaryRecord {
            title: "T cells <in> \"vivo\"".to_string(),
            url: "https://www.nature.com/articles/x?a=1&b=\"2\"".to_string(),
            abstract_text: "unused".to_string(),
            source: "Nature Ecology & Evolution".to_string(),
            summary: "First line\nSecond line".to_string(),
        }])
    }

    #[test]
    fn test_render_escapes_text() {
        let page = HtmlStorage::render(&digest());
        assert!(page.contains("<h1>Journal digest: Nature Ecology &amp; Evolution</h1>"));
        assert!(page.contains("T cells &lt;in&gt; \"vivo\""));
        assert!(page.contains("href=\"https://www.nature.com/articles/x?a=1&amp;b=&quot;2&quot;\""));
        assert!(page.contains("First line<br>Second line"));
        assert!(!page.contains("unused"));
    }

    #[test]
    fn test_render_empty() {
        let page = HtmlStorage::render(&Digest::new(vec![]));
        assert!(page.contains("No journals"));
        assert!(page.contains("0 articles"));
    }

    #[tokio::test]
    async fn test_save_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = HtmlStorage::new(ReportConfig::new(dir.path()).with_prefix("nature"));
        let path = storage.save(&digest()).await.unwrap();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("html"));
        let contents = std::fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("<!DOCTYPE html>"));
    }
}
