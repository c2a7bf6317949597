use crate::adapters::outbound::filesystem::{FileSystemWriter, StdoutPresenter};
use crate::ports::outbound::OutputPresenter;
use std::path::PathBuf;

/// Presenter type enumeration for factory pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterType {
    /// Write to standard output
    Stdout,
    /// Write to the given file, replacing it
    File(PathBuf),
}

impl From<Option<PathBuf>> for PresenterType {
    fn from(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => PresenterType::File(path),
            None => PresenterType::Stdout,
        }
    }
}

/// Factory choosing where the formatted report goes
pub struct PresenterFactory;

impl PresenterFactory {
    /// Stdout when no path is given, otherwise the file writer
    pub fn create(presenter_type: PresenterType) -> Box<dyn OutputPresenter> {
        match presenter_type {
            PresenterType::Stdout => Box::new(StdoutPresenter::new()),
            PresenterType::File(path) => Box::new(FileSystemWriter::new(path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_presenter_type_from_option() {
        assert_eq!(PresenterType::from(None), PresenterType::Stdout);
        assert_eq!(
            PresenterType::from(Some(PathBuf::from("graph.json"))),
            PresenterType::File(PathBuf::from("graph.json"))
        );
    }

    #[test]
    fn test_file_presenter_writes_content() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("graph_analysis_report.md");

        let presenter = PresenterFactory::create(PresenterType::File(path.clone()));
        presenter.present("# Report\n").unwrap();

        assert_eq!(std::fs::read_to_string(path).unwrap(), "# Report\n");
    }

    #[test]
    fn test_stdout_presenter() {
        let presenter = PresenterFactory::create(PresenterType::Stdout);
        assert!(presenter.present("").is_ok());
    }
}
