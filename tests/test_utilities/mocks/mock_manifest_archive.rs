use spm_depgraph::prelude::*;
use std::sync::{Arc, Mutex};

/// In-memory ManifestArchive; clones share the same storage
#[derive(Default, Clone)]
pub struct MockManifestArchive {
    pub entries: Arc<Mutex<Vec<StoredManifest>>>,
}

impl MockManifestArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(&self) -> Vec<StoredManifest> {
        self.entries.lock().unwrap().clone()
    }
}

impl ManifestArchive for MockManifestArchive {
    fn store(&self, seed: &Identifier, identifier: &Identifier, content: &[u8]) -> Result<()> {
        self.entries.lock().unwrap().push(StoredManifest {
            seed: seed.clone(),
            identifier: identifier.clone(),
            content: content.to_vec(),
        });
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<StoredManifest>> {
        Ok(self.stored())
    }
}
