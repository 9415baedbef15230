use thiserror::Error;

/// Faults that terminate a whole run. Anything scoped to a single detail
/// page is downgraded to data on that record instead.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The rendering session could not be acquired or died outside a
    /// per-record extraction call.
    #[error("rendering resource failure: {0:#}")]
    Resource(anyhow::Error),
    #[error("crawl interrupted")]
    Interrupted,
}
