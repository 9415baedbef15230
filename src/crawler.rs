use std::time::Duration;

use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::collect;
use crate::config::CrawlerConfig;
use crate::error::CrawlError;
use crate::model::{CrawlSummary, InvestorRecord, ScrapeStatus};
use crate::parser;
use crate::render::PageRenderer;

const DIRECTORY_WAIT: Duration = Duration::from_secs(15);
const DIRECTORY_SETTLE: Duration = Duration::from_secs(5);
const DETAIL_WAIT: Duration = Duration::from_secs(10);
const DETAIL_SETTLE: Duration = Duration::from_secs(3);
const FALLBACK_SETTLE: Duration = Duration::from_secs(5);

/// Sequential crawl driver: one rendering session, one page at a time, a
/// fixed pause between detail pages.
pub struct Crawler<R> {
    renderer: R,
    config: CrawlerConfig,
}

impl<R: PageRenderer> Crawler<R> {
    pub fn new(renderer: R, config: CrawlerConfig) -> Self {
        Self { renderer, config }
    }

    /// Full batch: collect addresses once, then extract each in turn.
    /// Per-page faults become data on that record; only renderer-lifecycle
    /// faults abort the run. Always returns a summary otherwise, degraded
    /// as needed.
    pub async fn run(&mut self) -> Result<CrawlSummary, CrawlError> {
        let started_at = Utc::now();
        let addresses = self.collect_addresses().await?;
        if addresses.is_empty() {
            warn!("no investor addresses found on directory page");
            return Ok(CrawlSummary::empty(started_at));
        }
        info!("found {} investor addresses", addresses.len());

        let total = addresses.len();
        let pb = ProgressBar::new(total as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );

        let mut records = Vec::with_capacity(total);
        let mut successes = 0usize;
        let mut failures = 0usize;

        for (index, address) in addresses.iter().enumerate() {
            let record = self.extract_one(address).await;
            match record.status {
                ScrapeStatus::Success => successes += 1,
                _ => failures += 1,
            }
            records.push(record);
            pb.inc(1);
            // Rate limiting; no pause after the final item.
            if index + 1 < total {
                tokio::time::sleep(self.config.delay).await;
            }
        }
        pb.finish_and_clear();

        let summary = CrawlSummary {
            started_at,
            completed_at: Utc::now(),
            total,
            successes,
            failures,
            records,
        };
        info!(
            "crawl finished: {}/{} succeeded ({})",
            summary.successes,
            summary.total,
            summary.success_rate()
        );
        Ok(summary)
    }

    /// Load the directory page and collect detail-page addresses. Renderer
    /// faults here are fatal: nothing has been extracted yet.
    pub async fn collect_addresses(&mut self) -> Result<Vec<String>, CrawlError> {
        info!("loading directory page {}", self.config.directory_url);
        self.renderer
            .load(&self.config.directory_url)
            .await
            .map_err(CrawlError::Resource)?;
        self.renderer
            .wait_for("body", DIRECTORY_WAIT)
            .await
            .map_err(CrawlError::Resource)?;
        tokio::time::sleep(DIRECTORY_SETTLE).await;
        let html = self
            .renderer
            .markup()
            .await
            .map_err(CrawlError::Resource)?;
        Ok(collect::collect_urls(&html, &self.config))
    }

    /// Extract a single detail page; any fault is recorded on the record
    /// and never aborts the batch.
    pub async fn extract_one(&mut self, address: &str) -> InvestorRecord {
        info!("scraping {address}");
        match self.render_detail(address).await {
            Ok(html) => parser::extract_investor(address, &html, &self.config),
            Err(e) => {
                warn!("failed to scrape {address}: {e:#}");
                InvestorRecord::failed(address, format!("{e:#}"))
            }
        }
    }

    async fn render_detail(&mut self, address: &str) -> anyhow::Result<String> {
        self.renderer.load(address).await?;
        if self.renderer.wait_for("main", DETAIL_WAIT).await? {
            tokio::time::sleep(DETAIL_SETTLE).await;
        } else {
            tokio::time::sleep(FALLBACK_SETTLE).await;
        }
        self.renderer.markup().await
    }

    /// Release the rendering resource. Called on every exit path,
    /// interruption included.
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.renderer.close().await {
            warn!("failed to release rendering session: {e:#}");
        }
    }
}

// ── Tests ──
