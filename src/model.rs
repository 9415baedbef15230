use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Lifecycle of one record: `pending` only while extraction is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    Pending,
    Success,
    Error,
}

/// Fixed personal-contact slots; empty string when unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Contacts {
    pub email: String,
    pub linkedin: String,
    pub twitter: String,
    pub website: String,
}

/// One investor detail page. Created with defaults at the start of an
/// extraction call, mutated only within it, append-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct InvestorRecord {
    pub address: String,
    pub name: String,
    pub industries: Vec<String>,
    pub stages: Vec<String>,
    pub check_range: String,
    pub bio: String,
    pub geography: Vec<String>,
    pub contacts: Contacts,
    /// Schema-less mapping from link display text to target, insertion order.
    #[serde(serialize_with = "serialize_pairs")]
    pub contact_info: Vec<(String, String)>,
    pub scraped_at: DateTime<Utc>,
    pub status: ScrapeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InvestorRecord {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            name: String::new(),
            industries: Vec::new(),
            stages: Vec::new(),
            check_range: String::new(),
            bio: String::new(),
            geography: Vec::new(),
            contacts: Contacts::default(),
            contact_info: Vec::new(),
            scraped_at: Utc::now(),
            status: ScrapeStatus::Pending,
            error: None,
        }
    }

    pub fn failed(address: &str, message: String) -> Self {
        let mut record = Self::new(address);
        record.status = ScrapeStatus::Error;
        record.error = Some(message);
        record
    }
}

/// Serialize the ordered pair list as a JSON object, keys in list order.
fn serialize_pairs<S: Serializer>(
    pairs: &[(String, String)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (key, value) in pairs {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

/// Outcome of one full crawl run.
#[derive(Debug, Clone, Serialize)]
pub struct CrawlSummary {
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
    pub total: usize,
    pub successes: usize,
    pub failures: usize,
    pub records: Vec<InvestorRecord>,
}

impl CrawlSummary {
    pub fn empty(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            completed_at: Utc::now(),
            total: 0,
            successes: 0,
            failures: 0,
            records: Vec::new(),
        }
    }

    /// Percentage to one decimal place; an empty run is "0.0%".
    pub fn success_rate(&self) -> String {
        if self.total == 0 {
            return "0.0%".to_string();
        }
        format!(
            "{:.1}%",
            self.successes as f64 / self.total as f64 * 100.0
        )
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_rate_one_decimal() {
        let mut summary = CrawlSummary::empty(Utc::now());
        summary.total = 9;
        summary.successes = 7;
        summary.failures = 2;
        assert_eq!(summary.success_rate(), "77.8%");
    }

    #[test]
    fn success_rate_empty_run() {
        let summary = CrawlSummary::empty(Utc::now());
        assert_eq!(summary.success_rate(), "0.0%");
    }

    #[test]
    fn new_record_is_pending_with_defaults() {
        let record = InvestorRecord::new("https://mercury.com/investor-database/jane-doe");
        assert_eq!(record.address, "https://mercury.com/investor-database/jane-doe");
        assert_eq!(record.status, ScrapeStatus::Pending);
        assert!(record.name.is_empty());
        assert!(record.industries.is_empty());
        assert!(record.error.is_none());
    }

    #[test]
    fn contact_info_serializes_in_insertion_order() {
        let mut record = InvestorRecord::new("https://mercury.com/investor-database/jane-doe");
        record.contact_info = vec![
            ("Zeta Fund".to_string(), "https://zeta.example".to_string()),
            ("Email".to_string(), "jane@x.com".to_string()),
            ("AngelList".to_string(), "https://angel.co/jane".to_string()),
        ];
        let json = serde_json::to_string(&record).unwrap();
        let zeta = json.find("Zeta Fund").unwrap();
        let email = json.find("\"Email\"").unwrap();
        let angel = json.find("AngelList").unwrap();
        assert!(zeta < email && email < angel);
    }

    #[test]
    fn error_key_only_present_on_failure() {
        let ok = InvestorRecord::new("https://mercury.com/investor-database/a");
        let failed = InvestorRecord::failed(
            "https://mercury.com/investor-database/b",
            "timeout".to_string(),
        );
        assert!(!serde_json::to_string(&ok).unwrap().contains("\"error\""));
        let json = serde_json::to_string(&failed).unwrap();
        assert!(json.contains("\"error\":\"timeout\""));
        assert!(json.contains("\"status\":\"error\""));
    }
}
