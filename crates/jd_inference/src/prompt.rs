use jd_core::{ArticleRecord, Error, Result};

pub const DEFAULT_TEMPLATE: &str = "You are helping a researcher keep up with new papers published in {source}.\n\
Summarize the following article in two or three plain-language sentences. \
Say what was found and why it matters; do not repeat the title.\n\n\
Title: {title}\n\n\
Abstract: {abstract}\n\n\
Summary:";

const PLACEHOLDERS: [&str; 4] = ["{title}", "{abstract}", "{source}", "{url}"];

/// Prompt text with `{title}`, `{abstract}`, `{source}` and `{url}` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains("{title}") && !template.contains("{abstract}") {
            return Err(Error::Inference(
                "prompt template must reference {title} or {abstract}".to_string(),
            ));
        }
        Ok(Self { template })
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Single left-to-right pass, so braces inside article text are never expanded.
    pub fn render(&self, article: &ArticleRecord) -> String {
        let mut out = String::with_capacity(self.template.len() + article.abstract_text.len());
        let mut rest = self.template.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];
            match PLACEHOLDERS.iter().find(|p| tail.starts_with(*p)) {
                Some(placeholder) => {
                    out.push_str(match *placeholder {
                        "{title}" => &article.title,
                        "{abstract}" => &article.abstract_text,
                        "{source}" => &article.source,
                        _ => &article.url,
                    });
                    rest = &tail[placeholder.len()..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }
        out.push_str(rest);
        out
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
        }
    }
}
