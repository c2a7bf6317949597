/// Network adapters for the GitHub REST API
mod github_client;

pub use github_client::{GitHubManifestRepository, DEFAULT_API_BASE_URL, DEFAULT_FALLBACK_BRANCHES};
