/// Filesystem adapters for seed lists, the manifest archive and report output
mod csv_seed_reader;
mod file_writer;
mod manifest_archive;

pub use csv_seed_reader::CsvSeedReader;
pub use file_writer::{FileSystemWriter, StdoutPresenter};
pub use manifest_archive::{FileSystemManifestArchive, MANIFEST_FILENAME};
