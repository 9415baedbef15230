mod collect;
mod config;
mod crawler;
mod error;
mod export;
mod model;
mod parser;
mod render;

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use tracing::warn;

use config::CrawlerConfig;
use crawler::Crawler;
use error::CrawlError;
use export::CrawlReport;
use render::ChromiumRenderer;

#[derive(Parser)]
#[command(name = "mercury_scraper", about = "Mercury investor database scraper")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl the full directory and write a JSON report
    Run {
        /// Seconds to pause between detail pages
        #[arg(short, long, default_value = "1.5")]
        delay: f64,
        /// Output file (default: mercury_investors_<timestamp>.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Run the browser with a visible window
        #[arg(long)]
        headed: bool,
    },
    /// Collect and print detail-page addresses without scraping them
    Collect {
        #[arg(long)]
        headed: bool,
    },
    /// Scrape a single investor page and print the record as JSON
    Single {
        url: String,
        #[arg(long)]
        headed: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            delay,
            output,
            headed,
        } => run_crawl(delay, output, headed).await,
        Commands::Collect { headed } => run_collect(headed).await,
        Commands::Single { url, headed } => run_single(&url, headed).await,
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {:.1}s", elapsed.as_secs_f64());
    }
    result
}

fn build_config(headed: bool) -> CrawlerConfig {
    CrawlerConfig {
        headless: !headed,
        ..CrawlerConfig::default()
    }
}

async fn run_crawl(delay: f64, output: Option<PathBuf>, headed: bool) -> anyhow::Result<()> {
    let mut config = build_config(headed);
    config.delay = Duration::from_secs_f64(delay);
    let renderer = ChromiumRenderer::launch(config.headless).await?;
    let mut crawler = Crawler::new(renderer, config);

    let outcome = tokio::select! {
        summary = crawler.run() => summary,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, shutting down");
            Err(CrawlError::Interrupted)
        }
    };
    // The rendering session is released on every exit path, interrupt included.
    crawler.shutdown().await;
    let summary = outcome?;

    if summary.total == 0 {
        println!("No investor URLs found.");
        return Ok(());
    }
    println!(
        "Scraped {} investors ({} ok, {} errors, {})",
        summary.total,
        summary.successes,
        summary.failures,
        summary.success_rate()
    );
    let report = CrawlReport::from(summary);
    let path = export::save_report(&report, output.as_deref())?;
    println!("Results saved to {}", path.display());
    Ok(())
}

async fn run_collect(headed: bool) -> anyhow::Result<()> {
    let config = build_config(headed);
    let renderer = ChromiumRenderer::launch(config.headless).await?;
    let mut crawler = Crawler::new(renderer, config);

    let outcome = tokio::select! {
        addresses = crawler.collect_addresses() => addresses,
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, shutting down");
            Err(CrawlError::Interrupted)
        }
    };
    crawler.shutdown().await;
    let addresses = outcome?;

    if addresses.is_empty() {
        println!("No investor URLs found.");
        return Ok(());
    }
    for address in &addresses {
        println!("{address}");
    }
    println!("\n{} addresses", addresses.len());
    Ok(())
}

async fn run_single(url: &str, headed: bool) -> anyhow::Result<()> {
    let config = build_config(headed);
    let renderer = ChromiumRenderer::launch(config.headless).await?;
    let mut crawler = Crawler::new(renderer, config);

    let outcome = tokio::select! {
        record = crawler.extract_one(url) => Some(record),
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, shutting down");
            None
        }
    };
    crawler.shutdown().await;

    match outcome {
        Some(record) => {
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        None => Err(CrawlError::Interrupted.into()),
    }
}
