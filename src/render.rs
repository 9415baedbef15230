use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chromiumoxide::browser::{Browser, BrowserConfigBuilder, HeadlessMode};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::CrawlError;

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// The rendering collaborator: navigate, wait until a selector is present
/// or the timeout elapses, read the final markup, release. The crawl core
/// only ever talks to this trait; one page is loaded at a time.
pub trait PageRenderer {
    async fn load(&mut self, url: &str) -> Result<()>;
    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool>;
    async fn markup(&mut self) -> Result<String>;
    async fn close(&mut self) -> Result<()>;
}

/// Chrome-over-CDP renderer. A single page is reused serially across the
/// whole run.
pub struct ChromiumRenderer {
    browser: Browser,
    handler_task: JoinHandle<()>,
    page: Option<Page>,
}

impl ChromiumRenderer {
    /// Launch a browser session. Failure here is fatal to the run.
    pub async fn launch(headless: bool) -> Result<Self, CrawlError> {
        Self::launch_inner(headless).await.map_err(CrawlError::Resource)
    }

    async fn launch_inner(headless: bool) -> Result<Self> {
        let mut builder = BrowserConfigBuilder::default()
            .request_timeout(Duration::from_secs(30))
            .arg(format!("--user-agent={USER_AGENT}"))
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage");
        builder = if headless {
            builder.headless_mode(HeadlessMode::default())
        } else {
            builder.with_head()
        };
        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        info!("launching browser (headless: {headless})");
        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch browser")?;

        // The handler stream must be polled for the CDP connection to make
        // progress; event errors are not fatal to the session.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("browser handler event error: {e}");
                }
            }
        });

        Ok(Self {
            browser,
            handler_task,
            page: None,
        })
    }

    async fn page(&mut self) -> Result<&Page> {
        if self.page.is_none() {
            let page = self
                .browser
                .new_page("about:blank")
                .await
                .context("failed to open browser page")?;
            self.page = Some(page);
        }
        self.page.as_ref().context("browser page unavailable")
    }
}

impl PageRenderer for ChromiumRenderer {
    async fn load(&mut self, url: &str) -> Result<()> {
        let page = self.page().await?;
        page.goto(url)
            .await
            .with_context(|| format!("navigation to {url} failed"))?;
        // Navigation resolves when the response arrives; dynamic content is
        // gated separately via wait_for.
        page.wait_for_navigation().await.ok();
        Ok(())
    }

    async fn wait_for(&mut self, selector: &str, timeout: Duration) -> Result<bool> {
        let page = self.page().await?;
        let start = Instant::now();
        loop {
            if page.find_element(selector).await.is_ok() {
                return Ok(true);
            }
            if start.elapsed() >= timeout {
                debug!("timed out waiting for selector {selector:?}");
                return Ok(false);
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn markup(&mut self) -> Result<String> {
        let page = self.page().await?;
        page.content().await.context("failed to read page content")
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(page) = self.page.take() {
            let _ = page.close().await;
        }
        self.browser.close().await.ok();
        self.browser.wait().await.ok();
        self.handler_task.abort();
        info!("browser session released");
        Ok(())
    }
}
