use async_trait::async_trait;
use spm_depgraph::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// In-memory ManifestRepository keyed by `owner/name`, counting fetches
#[derive(Default)]
pub struct MockManifestRepository {
    pub manifests: HashMap<String, Vec<u8>>,
    pub failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl MockManifestRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a manifest whose dependencies are GitHub `owner/name` keys
    pub fn with_package(self, key: &str, name: &str, deps: &[&str]) -> Self {
        let declarations: Vec<String> = deps
            .iter()
            .map(|d| {
                format!(
                    "        .package(url: \"https://github.com/{}.git\", from: \"1.0.0\")",
                    d
                )
            })
            .collect();
        let manifest = format!(
            "// swift-tools-version:5.9\nimport PackageDescription\n\nlet package = Package(\n    name: \"{}\",\n    dependencies: [\n{}\n    ],\n    targets: []\n)\n",
            name,
            declarations.join(",\n")
        );
        self.with_raw(key, manifest.as_bytes())
    }

    pub fn with_raw(mut self, key: &str, content: &[u8]) -> Self {
        self.manifests.insert(key.to_string(), content.to_vec());
        self
    }

    pub fn with_failure(mut self, key: &str) -> Self {
        self.failing.insert(key.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fetch_count(&self, key: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == key).count()
    }
}

#[async_trait]
impl ManifestRepository for MockManifestRepository {
    async fn fetch_manifest(&self, identifier: &Identifier) -> Result<FetchedManifest> {
        let key = identifier.to_string();
        self.calls.lock().unwrap().push(key.clone());

        if self.failing.contains(&key) {
            anyhow::bail!("Mock repository failure for {}", key);
        }

        Ok(match self.manifests.get(&key) {
            Some(content) => FetchedManifest::Found {
                content: content.clone(),
                branch: Some("main".to_string()),
            },
            None => FetchedManifest::NotFound,
        })
    }
}
