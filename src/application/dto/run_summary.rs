use crate::dependency_graph::domain::Identifier;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Download totals and timing of one resolve run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows in the seed table, including rejected ones
    pub seed_count: usize,
    pub successful_downloads: usize,
    pub failed_downloads: usize,
    /// Dependency locators declared across every parsed manifest
    pub dependencies_found: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub elapsed: Duration,
    /// Repositories whose manifest was fetched, sorted
    pub processed: Vec<Identifier>,
}

impl RunSummary {
    /// Percentage of attempted repositories that were downloaded
    ///
    /// Zero when nothing was attempted.
    pub fn success_rate(&self) -> f64 {
        let attempted = self.successful_downloads + self.failed_downloads;
        if attempted == 0 {
            return 0.0;
        }
        self.successful_downloads as f64 / attempted as f64 * 100.0
    }

    pub fn elapsed_minutes(&self) -> f64 {
        self.elapsed.as_secs_f64() / 60.0
    }
}
