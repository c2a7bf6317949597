use std::path::PathBuf;
use std::time::Duration;

/// Request for resolving the dependency closure of a seed list
#[derive(Debug, Clone)]
pub struct ResolveRequest {
    /// Path to the CSV seed table
    pub seeds_path: PathBuf,
    /// Validate the seed list without fetching anything
    pub dry_run: bool,
    /// Pause between consecutive manifest fetches
    pub fetch_delay: Duration,
    /// Pause between consecutive seeds
    pub seed_delay: Duration,
}

impl ResolveRequest {
    pub fn new(seeds_path: PathBuf) -> Self {
        Self {
            seeds_path,
            dry_run: false,
            fetch_delay: Duration::ZERO,
            seed_delay: Duration::ZERO,
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn with_seed_delay(mut self, delay: Duration) -> Self {
        self.seed_delay = delay;
        self
    }
}
