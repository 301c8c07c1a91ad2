use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use jd_core::{Digest, DigestStorage, InferenceModel, Result};
use jd_inference::{Config, InferenceConfig, PromptTemplate, Summarizer};
use jd_scrapers::cli::{handle_command, ScraperArgs, ScraperCommands, SelectorArgs};
use jd_scrapers::{logging, ArticleFilter, FetchConfig, JournalScraper, PageSource, SiteConfig};
use jd_storage::{create_storage, ReportConfig};
use tracing::{error, info};

#[derive(Debug, Clone)]
struct HumanDuration(Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_seconds = 0u64;
        let mut current_number = String::new();
        let mut has_number = false;

        for c in s.chars() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if !current_number.is_empty() {
                let num = current_number
                    .parse::<u64>()
                    .map_err(|_| "Duration too large".to_string())?;
                let unit = match c {
                    's' => 1,
                    'm' => 60,
                    'h' => 3600,
                    'd' => 86400,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_seconds = num
                    .checked_mul(unit)
                    .and_then(|secs| total_seconds.checked_add(secs))
                    .ok_or_else(|| "Duration too large".to_string())?;
                current_number.clear();
                has_number = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // A trailing bare number counts as seconds
        if !current_number.is_empty() {
            total_seconds = current_number
                .parse::<u64>()
                .ok()
                .and_then(|num| total_seconds.checked_add(num))
                .ok_or_else(|| "Duration too large".to_string())?;
            has_number = true;
        }

        if !has_number {
            return Err("Duration must include a number".to_string());
        }
        if total_seconds == 0 {
            return Err("Duration must be greater than zero".to_string());
        }

        Ok(HumanDuration(Duration::from_secs(total_seconds)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarize new journal issues with a local language model", long_about = None)]
pub struct Cli {
    /// Log every retrieval stage
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Publisher base URL, e.g. a local mirror
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List supported journals
    List,
    /// Print the current issue's articles
    Fetch {
        #[arg(required = true)]
        journals: Vec<String>,
        #[command(flatten)]
        selectors: SelectorArgs,
    },
    /// Retrieve, summarize and save a digest
    Digest(DigestArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct DigestArgs {
    /// Full journal names, e.g. "Nature Medicine"
    #[arg(required = true)]
    journals: Vec<String>,
    #[command(flatten)]
    selectors: SelectorArgs,
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,
    #[arg(long, default_value = "journal_digest")]
    prefix: String,
    /// Report formats to write
    #[arg(long, value_delimiter = ',', default_value = "csv,html")]
    format: Vec<String>,
    #[arg(long, default_value = "ollama", help = "Model to use for summaries. Available models: ollama (default), echo")]
    model: String,
    /// Ollama URL, optionally with the model in the path (http://localhost:11434/llama3.2)
    #[arg(long)]
    model_url: Option<String>,
    #[arg(long)]
    model_name: Option<String>,
    /// Keep only articles mentioning one of these words
    #[arg(short, long)]
    keyword: Vec<String>,
    #[arg(long)]
    limit: Option<usize>,
    /// Summaries requested at once
    #[arg(long, default_value_t = 1)]
    concurrency: usize,
    /// File holding a prompt template with {title}, {abstract}, {source}, {url}
    #[arg(long)]
    template: Option<PathBuf>,
    /// Repeat every interval (e.g. 1h, 30m, 7d, 1h15m30s)
    #[arg(long)]
    interval: Option<HumanDuration>,
}

/// Everything after retrieval: filter, prompt, summarize, save.
struct Pipeline {
    filter: ArticleFilter,
    summarizer: Summarizer,
    storages: Vec<Box<dyn DigestStorage>>,
}

impl Pipeline {
    async fn from_args(args: &DigestArgs) -> Result<Self> {
        let report_config = ReportConfig::new(&args.output_dir).with_prefix(args.prefix.as_str());
        let storages = args
            .format
            .iter()
            .map(|format| create_storage(format, report_config.clone()))
            .collect::<Result<Vec<_>>>()?;

        let template = match &args.template {
            Some(path) => PromptTemplate::new(tokio::fs::read_to_string(path).await?)?,
            None => PromptTemplate::default(),
        };

        let model: Arc<dyn InferenceModel> = jd_inference::create_model(Some(Config {
            backend: args.model.clone(),
            inference_config: InferenceConfig {
                model_url: args.model_url.clone(),
                model_name: args.model_name.clone(),
            },
        }))
        .await?;
        info!("🧠 Inference model initialized successfully (using {})", model.name());

        Ok(Self {
            filter: ArticleFilter::new(args.keyword.clone(), args.limit),
            summarizer: Summarizer::new(model, template).with_concurrency(args.concurrency),
            storages,
        })
    }

    async fn run<S: PageSource>(&self, scraper: &JournalScraper<S>, journals: &[String]) -> Result<Vec<PathBuf>> {
        let retrieved = scraper.get_articles_for(journals).await?;
        let selected = self.filter.apply(retrieved);
        info!("📰 {} articles selected for summarization", selected.len());

        let rows = self
            .summarizer
            .summarize(&selected, &|p| info!("📝 [{}/{}] {}", p.done, p.total, p.title))
            .await;
        let digest = Digest::new(rows);

        let mut paths = Vec::with_capacity(self.storages.len());
        for storage in &self.storages {
            paths.push(storage.save(&digest).await?);
        }
        Ok(paths)
    }
}

fn site_config(base_url: Option<&str>) -> Result<SiteConfig> {
    base_url.map(SiteConfig::new).unwrap_or_else(|| Ok(SiteConfig::default()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let scraper = JournalScraper::http(&FetchConfig::default())?
        .with_site(site_config(cli.base_url.as_deref())?)
        .verbose(cli.verbose);

    match cli.command {
        Commands::List => {
            let args = ScraperArgs {
                command: ScraperCommands::List,
            };
            handle_command(args, scraper).await?;
        }
        Commands::Fetch { journals, selectors } => {
            let args = ScraperArgs {
                command: ScraperCommands::Fetch { journals, selectors },
            };
            handle_command(args, scraper).await?;
        }
        Commands::Digest(args) => {
            let scraper = scraper.with_selectors(args.selectors.to_selectors());
            let pipeline = Pipeline::from_args(&args).await?;
            info!("🦗 Building digest for {}", args.journals.join(", "));

            if let Some(interval) = &args.interval {
                info!("Running in periodic mode with {}s interval", interval.0.as_secs());
                loop {
                    info!("Starting digest cycle");
                    match pipeline.run(&scraper, &args.journals).await {
                        Ok(paths) => info!("✅ Wrote {} reports", paths.len()),
                        Err(e) => error!("Error during digest: {}", e),
                    }
                    info!("Waiting {}s before next digest", interval.0.as_secs());
                    tokio::time::sleep(interval.0).await;
                }
            } else {
                let paths = pipeline.run(&scraper, &args.journals).await?;
                for path in paths {
                    println!("{}", path.display());
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jd_inference::models::EchoModel;
    use jd_scrapers::StaticSource;
    use jd_storage::CsvStorage;

    #[test]
    fn test_human_duration() {
        assert_eq!(HumanDuration::from_str("1h30m").unwrap().0, Duration::from_secs(5400));
        assert_eq!(HumanDuration::from_str("7d").unwrap().0, Duration::from_secs(604800));
        assert_eq!(HumanDuration::from_str("90").unwrap().0, Duration::from_secs(90));
        assert_eq!(HumanDuration::from_str("1h 15m 30s").unwrap().0, Duration::from_secs(4530));
        assert!(HumanDuration::from_str("").is_err());
        assert!(HumanDuration::from_str("5w").is_err());
        assert!(HumanDuration::from_str("h").is_err());
        assert!(HumanDuration::from_str("0s").is_err());
    }

    #[test]
    fn test_human_duration_overflow() {
        let too_large = Err("Duration too large".to_string());
        assert_eq!(HumanDuration::from_str("999999999999999999d").map(|d| d.0), too_large);
        assert_eq!(HumanDuration::from_str("99999999999999999999").map(|d| d.0), too_large);
        assert_eq!(HumanDuration::from_str("99999999999999999999s").map(|d| d.0), too_large);
        assert_eq!(
            HumanDuration::from_str("18446744073709551615s 1s").map(|d| d.0),
            too_large
        );
        assert_eq!(
            HumanDuration::from_str("213503982334601d").map(|d| d.0),
            Ok(Duration::from_secs(213503982334601 * 86400))
        );
    }

    #[test]
    fn test_cli_parses_digest() {
        let cli = Cli::try_parse_from([
            "jd", "digest", "Nature Medicine", "Nature Genetics",
            "--format", "csv", "--model", "echo", "-k", "crispr", "--interval", "1d",
        ])
        .unwrap();
        match cli.command {
            Commands::Digest(args) => {
                assert_eq!(args.journals.len(), 2);
                assert_eq!(args.format, vec!["csv"]);
                assert_eq!(args.keyword, vec!["crispr"]);
                assert_eq!(args.interval.map(|i| i.0), Some(Duration::from_secs(86400)));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_site_config() {
        assert!(site_config(None).is_ok());
        assert!(site_config(Some("http://localhost:8080")).is_ok());
        assert!(site_config(Some("nope")).is_err());
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end() {
        let page = r#"<html><body>
            <article><h3 class="c-card__title"><a href="/articles/1">CRISPR screen</a></h3>
              <div class="c-card__summary"><p>We   screen genes.</p></div></article>
            <article><h3 class="c-card__title"><a href="/articles/2">Dark matter</a></h3>
              <div class="c-card__summary"><p>Halos.</p></div></article>
        </body></html>"#;
        let scraper = JournalScraper::new(
            StaticSource::new().with_page("https://www.nature.com/nm/current-issue", page),
        );

        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline {
            filter: ArticleFilter::new(vec!["crispr".to_string()], None),
            summarizer: Summarizer::new(Arc::new(EchoModel::new(5)), PromptTemplate::default()),
            storages: vec![Box::new(CsvStorage::new(ReportConfig::new(dir.path())))],
        };

        let paths = pipeline
            .run(&scraper, &["Nature Medicine".to_string()])
            .await
            .unwrap();
        assert_eq!(paths.len(), 1);

        let contents = std::fs::read_to_string(&paths[0]).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines[0], "title,url,abstract,source,summary");
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("CRISPR screen,https://www.nature.com/articles/1,We screen genes.,Nature Medicine,"));
    }
}
