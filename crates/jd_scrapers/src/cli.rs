use clap::{Args, Subcommand};
use jd_core::Result;

use crate::catalog::JournalCatalog;
use crate::config::Selectors;
use crate::fetch::PageSource;
use crate::scrapers::JournalScraper;

/// Overrides for the default article-card selectors.
#[derive(Args, Debug, Clone, Default)]
pub struct SelectorArgs {
    /// Selector matching one article card
    #[arg(long)]
    pub article_selector: Option<String>,
    /// Selector for the title, relative to a card
    #[arg(long)]
    pub title_selector: Option<String>,
    /// Selector for the link element carrying `href`, relative to a card
    #[arg(long)]
    pub url_selector: Option<String>,
    /// Selector for the abstract, relative to a card
    #[arg(long)]
    pub abstract_selector: Option<String>,
}

impl SelectorArgs {
    pub fn to_selectors(&self) -> Selectors {
        let defaults = Selectors::default();
        Selectors {
            article: self.article_selector.clone().unwrap_or(defaults.article),
            title: self.title_selector.clone().unwrap_or(defaults.title),
            url: self.url_selector.clone().unwrap_or(defaults.url),
            abstract_text: self.abstract_selector.clone().unwrap_or(defaults.abstract_text),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ScraperArgs {
    #[command(subcommand)]
    pub command: ScraperCommands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ScraperCommands {
    /// List supported journals
    List,
    /// Print the current issue's articles for one or more journals
    Fetch {
        /// Full journal names, e.g. "Nature Medicine"
        #[arg(required = true)]
        journals: Vec<String>,
        #[command(flatten)]
        selectors: SelectorArgs,
    },
}

/// One `  name -> slug` line per catalog entry, in catalog order.
pub fn catalog_lines(catalog: &JournalCatalog) -> Vec<String> {
    catalog
        .list_all()
        .iter()
        .map(|entry| format!("  {} -> {}", entry.name, entry.slug))
        .collect()
}

pub async fn handle_command<S: PageSource>(args: ScraperArgs, scraper: JournalScraper<S>) -> Result<()> {
    match args.command {
        ScraperCommands::List => {
            println!("Available journals:");
            for line in catalog_lines(scraper.catalog()) {
                println!("{}", line);
            }
        }
        ScraperCommands::Fetch { journals, selectors } => {
            let scraper = scraper.with_selectors(selectors.to_selectors());
            let result = scraper.get_articles_for(&journals).await?;
            println!("Found {} articles", result.len());
            for article in &result {
                println!("📰 [{}] {} - {}", article.source, article.title, article.url);
            }
        }
    }
    Ok(())
}
