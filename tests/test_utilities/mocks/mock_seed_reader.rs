use spm_depgraph::prelude::*;
use std::path::Path;

/// Mock SeedReader returning a fixed seed list
pub struct MockSeedReader {
    pub seeds: Vec<Seed>,
}

impl MockSeedReader {
    pub fn new(locators: &[&str]) -> Self {
        Self {
            seeds: locators.iter().map(|l| Seed::new(*l)).collect(),
        }
    }
}

impl SeedReader for MockSeedReader {
    fn read_seeds(&self, _path: &Path) -> Result<Vec<Seed>> {
        Ok(self.seeds.clone())
    }
}
