use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::model::{CrawlSummary, InvestorRecord};

/// Output contract for downstream consumers: `{ metadata, investors }`.
#[derive(Debug, Serialize)]
pub struct CrawlReport {
    pub metadata: RunMetadata,
    pub investors: Vec<InvestorRecord>,
}

#[derive(Debug, Serialize)]
pub struct RunMetadata {
    pub scraped_at: DateTime<Utc>,
    pub completion_at: DateTime<Utc>,
    pub total: usize,
    pub successes: usize,
    pub failures: usize,
    pub success_rate: String,
}

impl From<CrawlSummary> for CrawlReport {
    fn from(summary: CrawlSummary) -> Self {
        let success_rate = summary.success_rate();
        Self {
            metadata: RunMetadata {
                scraped_at: summary.started_at,
                completion_at: summary.completed_at,
                total: summary.total,
                successes: summary.successes,
                failures: summary.failures,
                success_rate,
            },
            investors: summary.records,
        }
    }
}

/// Write the report as pretty-printed JSON. Without an explicit path the
/// filename is timestamped, e.g. `mercury_investors_20250101_120000.json`.
pub fn save_report(report: &CrawlReport, path: Option<&Path>) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(format!(
            "mercury_investors_{}.json",
            Utc::now().format("%Y%m%d_%H%M%S")
        )),
    };
    let json = serde_json::to_string_pretty(report)?;
    fs::write(&path, json).with_context(|| format!("failed to write {}", path.display()))?;
    info!("report saved to {}", path.display());
    Ok(path)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ScrapeStatus;

    fn summary() -> CrawlSummary {
        let mut summary = CrawlSummary::empty(Utc::now());
        summary.total = 2;
        summary.successes = 1;
        summary.failures = 1;
        let mut ok = InvestorRecord::new("https://mercury.com/investor-database/a");
        ok.status = ScrapeStatus::Success;
        summary.records = vec![
            ok,
            InvestorRecord::failed("https://mercury.com/investor-database/b", "boom".into()),
        ];
        summary
    }

    #[test]
    fn report_shape_matches_contract() {
        let report = CrawlReport::from(summary());
        let value = serde_json::to_value(&report).unwrap();

        let metadata = &value["metadata"];
        assert_eq!(metadata["total"], 2);
        assert_eq!(metadata["successes"], 1);
        assert_eq!(metadata["failures"], 1);
        assert_eq!(metadata["success_rate"], "50.0%");
        assert!(metadata["scraped_at"].is_string());
        assert!(metadata["completion_at"].is_string());

        let investors = value["investors"].as_array().unwrap();
        assert_eq!(investors.len(), 2);
        assert_eq!(investors[0]["status"], "success");
        assert_eq!(investors[1]["status"], "error");
        assert_eq!(investors[1]["error"], "boom");
    }

    #[test]
    fn save_report_writes_valid_json() {
        let dir = std::env::temp_dir().join("mercury_scraper_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("report.json");

        let report = CrawlReport::from(summary());
        let written = save_report(&report, Some(&path)).unwrap();
        assert_eq!(written, path);

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["metadata"]["total"], 2);
        std::fs::remove_file(&path).ok();
    }
}
