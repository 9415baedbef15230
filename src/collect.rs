use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{Html, Selector};
use url::Url;

use crate::config::CrawlerConfig;

static ANCHORS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Scan the rendered directory page for detail-page links. Keeps anchors
/// whose target contains the detail path segment (but is not the bare
/// directory path), resolves relative targets against the base address, and
/// deduplicates in first-seen order. Never fails: no matching anchors
/// yields an empty list and the caller decides whether that is terminal.
pub fn collect_urls(html: &str, config: &CrawlerConfig) -> Vec<String> {
    let doc = Html::parse_document(html);
    let bare_path = config.detail_segment.trim_end_matches('/');
    let base = Url::parse(&config.base_url).ok();

    let mut seen = HashSet::new();
    let mut addresses = Vec::new();
    for anchor in doc.select(&ANCHORS) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.contains(config.detail_segment.as_str()) || href == bare_path {
            continue;
        }
        let full = if href.starts_with('/') {
            match base.as_ref().and_then(|b| b.join(href).ok()) {
                Some(url) => url.to_string(),
                None => continue,
            }
        } else {
            href.to_string()
        };
        if seen.insert(full.clone()) {
            addresses.push(full);
        }
    }
    addresses
}

// ── Tests ──
