use crate::ports::outbound::{Seed, SeedReader};
use crate::shared::error::DepGraphError;
use crate::shared::security::read_regular_file;
use crate::shared::Result;
use std::path::Path;

const LOCATOR_COLUMN: &str = "url";
const LABEL_COLUMN: &str = "repo";

/// CsvSeedReader adapter reading the seed table from a CSV file
///
/// The file must have a header row with a `url` column. A `repo` column, when
/// present, supplies display labels. Other columns are ignored and rows with
/// an empty `url` are skipped.
pub struct CsvSeedReader;

impl CsvSeedReader {
    pub fn new() -> Self {
        Self
    }

    fn parse(&self, path: &Path, content: &[u8]) -> Result<Vec<Seed>> {
        let parse_error = |details: String| DepGraphError::SeedListParseError {
            path: path.to_path_buf(),
            details,
        };

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(content);

        let headers = reader
            .headers()
            .map_err(|e| parse_error(e.to_string()))?
            .clone();
        let locator_idx = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(LOCATOR_COLUMN))
            .ok_or_else(|| parse_error(format!("missing '{}' column", LOCATOR_COLUMN)))?;
        let label_idx = headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(LABEL_COLUMN));

        let mut seeds = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|e| parse_error(e.to_string()))?;

            let locator = record.get(locator_idx).unwrap_or_default();
            if locator.is_empty() {
                tracing::debug!(row = row + 1, "skipping seed row without url");
                continue;
            }

            let mut seed = Seed::new(locator);
            if let Some(label) = label_idx.and_then(|i| record.get(i)).filter(|l| !l.is_empty()) {
                seed = seed.with_label(label);
            }
            seeds.push(seed);
        }

        Ok(seeds)
    }
}

impl Default for CsvSeedReader {
    fn default() -> Self {
        Self::new()
    }
}

impl SeedReader for CsvSeedReader {
    fn read_seeds(&self, path: &Path) -> Result<Vec<Seed>> {
        if !path.exists() {
            return Err(DepGraphError::SeedListNotFound {
                path: path.to_path_buf(),
                suggestion: "Pass the seed table with --seeds <FILE>".to_string(),
            }
            .into());
        }

        let content = read_regular_file(path, "seed list").map_err(|e| {
            DepGraphError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
        })?;

        let seeds = self.parse(path, &content)?;
        tracing::debug!(path = %path.display(), count = seeds.len(), "seed list loaded");
        Ok(seeds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_seeds(content: &str) -> (TempDir, std::path::PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("seeds.csv");
        fs::write(&path, content).unwrap();
        (temp_dir, path)
    }

    #[test]
    fn test_read_seeds_with_labels() {
        let (_dir, path) = write_seeds(
            "repo,url\nNIO,https://github.com/apple/swift-nio.git\nAlamofire,https://github.com/Alamofire/Alamofire\n",
        );

        let seeds = CsvSeedReader::new().read_seeds(&path).unwrap();

        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].locator, "https://github.com/apple/swift-nio.git");
        assert_eq!(seeds[0].display_name(), "NIO");
        assert_eq!(seeds[1].label.as_deref(), Some("Alamofire"));
    }

    #[test]
    fn test_label_column_is_optional() {
        let (_dir, path) = write_seeds("url\nhttps://github.com/a/b\n");

        let seeds = CsvSeedReader::new().read_seeds(&path).unwrap();
        assert_eq!(seeds, vec![Seed::new("https://github.com/a/b")]);
        assert_eq!(seeds[0].display_name(), "https://github.com/a/b");
    }

    #[test]
    fn test_blank_rows_are_skipped_and_order_kept() {
        let (_dir, path) = write_seeds("url,repo\n  https://github.com/z/z  ,\n,empty\nhttps://github.com/a/a,\n");

        let seeds = CsvSeedReader::new().read_seeds(&path).unwrap();
        let locators: Vec<&str> = seeds.iter().map(|s| s.locator.as_str()).collect();
        assert_eq!(locators, vec!["https://github.com/z/z", "https://github.com/a/a"]);
        assert!(seeds[0].label.is_none());
    }

    #[test]
    fn test_missing_url_column() {
        let (_dir, path) = write_seeds("name,link\nx,y\n");

        let err = CsvSeedReader::new().read_seeds(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Failed to parse seed list"));
        assert!(message.contains("missing 'url' column"));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.csv");

        let err = CsvSeedReader::new().read_seeds(&path).unwrap_err();
        assert!(err.to_string().contains("Seed list not found"));
    }

    #[test]
    fn test_directory_is_rejected() {
        let temp_dir = TempDir::new().unwrap();

        let err = CsvSeedReader::new().read_seeds(temp_dir.path()).unwrap_err();
        assert!(err.to_string().contains("not a regular file"));
    }
}
