/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (network, file system, console).
pub mod formatter;
pub mod manifest_archive;
pub mod manifest_repository;
pub mod output_presenter;
pub mod progress_reporter;
pub mod seed_reader;

pub use formatter::ReportFormatter;
pub use manifest_archive::{ManifestArchive, StoredManifest};
pub use manifest_repository::{FetchedManifest, ManifestRepository};
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use seed_reader::{Seed, SeedReader};
