pub mod contacts;
pub mod fields;
pub mod lists;
pub mod name;

use scraper::Html;

use crate::config::CrawlerConfig;
use crate::model::{InvestorRecord, ScrapeStatus};

/// Shorter candidate texts are noise, not a real bio.
const MIN_BIO_LEN: usize = 50;

/// Build one record from a rendered detail page. Fields are independent: a
/// miss locating one never blocks the others, and whatever was populated
/// stays even if a later field fails to resolve.
pub fn extract_investor(address: &str, html: &str, config: &CrawlerConfig) -> InvestorRecord {
    let mut record = InvestorRecord::new(address);
    let doc = Html::parse_document(html);

    record.name = name::investor_name(&doc, address);
    record.industries = fields::filter_links(&doc, "Industries", "industries=");

    if let Some(raw) = fields::labeled_section(&doc, "Stages") {
        record.stages = lists::parse_list(&raw);
    }
    if let Some(raw) = fields::labeled_section(&doc, "Check Range") {
        record.check_range = raw.trim().to_string();
    }

    record.geography = fields::filter_links(&doc, "Geography", "geography=");
    if record.geography.is_empty() {
        if let Some(raw) = fields::labeled_section(&doc, "Geography") {
            record.geography = lists::parse_list(&raw);
        }
    }

    let bio = fields::labeled_section(&doc, "Bio")
        .filter(|text| !text.is_empty())
        .or_else(|| fields::bio_fallback(&doc));
    if let Some(bio) = bio {
        if bio.chars().count() > MIN_BIO_LEN {
            record.bio = bio;
        }
    }

    record.contacts = contacts::personal_contacts(&doc, &config.base_url, &config.self_hosts);
    record.contact_info = fields::contact_links(&doc);

    record.status = ScrapeStatus::Success;
    record
}

// ── Tests ──
