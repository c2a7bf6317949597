/// Use cases orchestrating resolution, archiving and analysis
mod analyze_archive;
mod resolve_dependencies;

pub use analyze_archive::AnalyzeArchiveUseCase;
pub use resolve_dependencies::ResolveDependenciesUseCase;
