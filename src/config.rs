use std::time::Duration;

/// Site profile plus run knobs. One fixed site structure per deployment;
/// the defaults target the Mercury investor database.
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Base address relative hrefs resolve against.
    pub base_url: String,
    /// Directory page listing every detail page.
    pub directory_url: String,
    /// Path segment that marks a detail-page link.
    pub detail_segment: String,
    /// Href markers for the platform's own links, skipped during
    /// contact classification.
    pub self_hosts: Vec<String>,
    /// Pause between successive detail pages.
    pub delay: Duration,
    pub headless: bool,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mercury.com".to_string(),
            directory_url: "https://mercury.com/investor-database?perPage=All".to_string(),
            detail_segment: "/investor-database/".to_string(),
            self_hosts: vec![
                "mercuryhq".to_string(),
                "mercury.com".to_string(),
                "app.mercury".to_string(),
            ],
            delay: Duration::from_secs_f64(1.5),
            headless: true,
        }
    }
}
