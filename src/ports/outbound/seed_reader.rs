use crate::shared::Result;
use std::path::Path;

/// One entry of the seed list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// Locator of the repository, normally a GitHub URL
    pub locator: String,
    /// Optional display label from the seed table
    pub label: Option<String>,
}

impl Seed {
    pub fn new(locator: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Label to show in progress output
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.locator)
    }
}

/// SeedReader port for loading the ordered list of seed repositories
pub trait SeedReader {
    /// Reads every seed from the given source, preserving order
    ///
    /// # Errors
    /// Returns an error if the source does not exist or cannot be parsed.
    /// This is the only fatal input failure of a resolution run.
    fn read_seeds(&self, path: &Path) -> Result<Vec<Seed>>;
}
