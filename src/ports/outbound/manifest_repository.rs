use crate::dependency_graph::domain::Identifier;
use crate::shared::Result;
use async_trait::async_trait;

/// Outcome of looking up the manifest of one repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchedManifest {
    /// Raw manifest bytes, plus the branch they were read from when known
    Found {
        content: Vec<u8>,
        branch: Option<String>,
    },
    /// The repository or its `Package.swift` does not exist
    NotFound,
}

/// ManifestRepository port for fetching `Package.swift` contents
///
/// This port abstracts the hosting service (e.g., the GitHub API) used to
/// download manifests. Branch selection, authentication and retries are the
/// adapter's concern; callers never retry.
///
/// # Async Support
/// Implementations must be `Send + Sync` so a resolver can be driven from
/// any tokio worker.
#[async_trait]
pub trait ManifestRepository: Send + Sync {
    /// Fetches the manifest for a repository identifier
    ///
    /// # Returns
    /// `FetchedManifest::Found` with the raw bytes, or
    /// `FetchedManifest::NotFound` when there is nothing to fetch
    ///
    /// # Errors
    /// Returns an error for transient failures (network, rate limiting,
    /// unexpected status codes)
    async fn fetch_manifest(&self, identifier: &Identifier) -> Result<FetchedManifest>;
}
