/// Mock implementations for testing
mod mock_manifest_archive;
mod mock_manifest_repository;
mod mock_progress_reporter;
mod mock_seed_reader;

pub use mock_manifest_archive::MockManifestArchive;
pub use mock_manifest_repository::MockManifestRepository;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_seed_reader::MockSeedReader;
