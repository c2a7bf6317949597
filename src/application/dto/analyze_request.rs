use std::path::PathBuf;

/// Request for rebuilding a graph from a manifest archive
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    /// Archive root, reported in the output metadata
    pub archive_dir: PathBuf,
}

impl AnalyzeRequest {
    pub fn new(archive_dir: PathBuf) -> Self {
        Self { archive_dir }
    }
}
