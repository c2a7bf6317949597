mod graph_analyzer;
mod manifest_parser;
mod resolver;

pub use graph_analyzer::GraphAnalyzer;
pub use manifest_parser::ManifestParser;
pub use resolver::{ResolutionContext, ResolutionOutcome, Resolver};
