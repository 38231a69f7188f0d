use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use yna_search::config::Config;
use yna_search::feed::{Category, FeedFetcher, Period, SourceCatalog};
use yna_search::render::{render_json, render_report};
use yna_search::search::{SearchError, SearchPipeline, SearchRequest};

/// Get the default config file path (~/.config/yna-search/config.toml)
fn default_config_path() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home)
        .join(".config")
        .join("yna-search")
        .join("config.toml"))
}

#[derive(Parser, Debug)]
#[command(
    name = "yna-search",
    about = "Search recent Yonhap News articles by keyword"
)]
struct Args {
    /// Keyword to look for in titles and summaries (case-insensitive)
    keyword: String,

    /// Feed category to search
    #[arg(short, long, value_enum, default_value_t = Category::All)]
    category: Category,

    /// How far back to look [default: from config, else 24h]
    #[arg(short, long, value_enum)]
    period: Option<Period>,

    /// Print the result as JSON instead of a report
    #[arg(long)]
    json: bool,

    /// Config file (defaults to ~/.config/yna-search/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so --json output stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<SearchError>() {
            Some(validation) => {
                eprintln!("Warning: {validation}");
                ExitCode::from(2)
            }
            None => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(args: Args) -> Result<()> {
    let config_path = match args.config {
        Some(path) => path,
        None => default_config_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let zone = config.reference_zone()?;
    let period = match args.period {
        Some(p) => p,
        None => config.period()?,
    };

    let fetcher = FeedFetcher::new(&config.user_agent, config.timeout())
        .context("Failed to create HTTP client")?;
    let pipeline = SearchPipeline::new(fetcher, SourceCatalog::yonhap(), zone)
        .with_description_limit(config.description_limit);

    let request = SearchRequest {
        keyword: args.keyword,
        category: args.category,
        period_hours: period.hours(),
    };
    let now = Utc::now().with_timezone(&zone);

    let result = pipeline.search(&request, now).await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if args.json {
        render_json(&mut out, &result)?;
    } else {
        render_report(&mut out, &result, zone)?;
    }
    out.flush()?;

    Ok(())
}
