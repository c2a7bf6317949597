use crate::dependency_graph::domain::Identifier;
use crate::shared::Result;

/// A manifest stored in the archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredManifest {
    /// Seed whose traversal first fetched this manifest
    pub seed: Identifier,
    pub identifier: Identifier,
    pub content: Vec<u8>,
}

/// ManifestArchive port for persisting fetched manifests and reading them back
///
/// The archive enables offline re-analysis: a graph can be rebuilt from
/// stored manifests without touching the network.
pub trait ManifestArchive {
    /// Persists one fetched manifest under its seed
    ///
    /// # Errors
    /// Returns an error if the manifest cannot be written
    fn store(&self, seed: &Identifier, identifier: &Identifier, content: &[u8]) -> Result<()>;

    /// Lists every stored manifest
    ///
    /// # Errors
    /// Returns an error if the archive root does not exist or cannot be read
    fn load_all(&self) -> Result<Vec<StoredManifest>>;
}
