use crate::dependency_graph::domain::Identifier;
use crate::ports::outbound::{ManifestArchive, StoredManifest};
use crate::shared::error::DepGraphError;
use crate::shared::security::{read_regular_file, validate_not_symlink};
use crate::shared::Result;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const MANIFEST_FILENAME: &str = "Package.swift";

/// FileSystemManifestArchive adapter storing manifests in a directory tree
///
/// Layout: `<root>/<seed_safe_name>/<identifier_safe_name>/Package.swift`,
/// where a safe name is `owner_name`. Hidden entries (leading `.`) are
/// ignored when scanning.
pub struct FileSystemManifestArchive {
    root: PathBuf,
}

impl FileSystemManifestArchive {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn manifest_path(&self, seed: &Identifier, identifier: &Identifier) -> PathBuf {
        self.root
            .join(seed.safe_name())
            .join(identifier.safe_name())
            .join(MANIFEST_FILENAME)
    }

    /// Visible subdirectories of `dir`, sorted by name
    fn list_dirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
        let entries = fs::read_dir(dir).map_err(|e| DepGraphError::FileReadError {
            path: dir.to_path_buf(),
            details: e.to_string(),
        })?;

        let mut dirs = Vec::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') {
                continue;
            }
            // file_type() does not follow symlinks
            if entry.file_type()?.is_dir() {
                dirs.push((name, entry.path()));
            }
        }
        dirs.sort();
        Ok(dirs)
    }
}

impl ManifestArchive for FileSystemManifestArchive {
    fn store(&self, seed: &Identifier, identifier: &Identifier, content: &[u8]) -> Result<()> {
        if self.root.exists() && !self.root.is_dir() {
            return Err(DepGraphError::InvalidPath {
                path: self.root.clone(),
                reason: "archive root exists and is not a directory".to_string(),
            }
            .into());
        }

        let path = self.manifest_path(seed, identifier);
        let write_error = |details: String| DepGraphError::FileWriteError {
            path: path.clone(),
            details,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        if path.exists() {
            validate_not_symlink(&path, "write").map_err(|e| write_error(e.to_string()))?;
        }

        fs::write(&path, content).map_err(|e| write_error(e.to_string()))?;
        tracing::debug!(path = %path.display(), "manifest archived");
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<StoredManifest>> {
        if !self.root.is_dir() {
            return Err(DepGraphError::ArchiveNotFound {
                path: self.root.clone(),
            }
            .into());
        }
        validate_not_symlink(&self.root, "scan")?;

        let mut manifests = Vec::new();
        let mut seen = HashSet::new();

        for (seed_dir, seed_path) in Self::list_dirs(&self.root)? {
            let Some(seed) = Identifier::from_safe_name(&seed_dir) else {
                tracing::warn!(directory = %seed_dir, "skipping seed directory with unrecognized name");
                continue;
            };

            for (package_dir, package_path) in Self::list_dirs(&seed_path)? {
                let Some(identifier) = Identifier::from_safe_name(&package_dir) else {
                    tracing::warn!(directory = %package_dir, "skipping package directory with unrecognized name");
                    continue;
                };

                let manifest_path = package_path.join(MANIFEST_FILENAME);
                if !manifest_path.exists() {
                    tracing::warn!(identifier = %identifier, "no Package.swift in archive entry");
                    continue;
                }
                if !seen.insert(identifier.clone()) {
                    tracing::debug!(identifier = %identifier, seed = %seed, "manifest already loaded from another seed");
                    continue;
                }

                let content = read_regular_file(&manifest_path, MANIFEST_FILENAME)?;
                manifests.push(StoredManifest {
                    seed: seed.clone(),
                    identifier,
                    content,
                });
            }
        }

        Ok(manifests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn id(key: &str) -> Identifier {
        Identifier::parse(key).unwrap()
    }

    #[test]
    fn test_store_uses_seed_and_identifier_layout() {
        let temp_dir = TempDir::new().unwrap();
        let archive = FileSystemManifestArchive::new(temp_dir.path());

        archive
            .store(&id("apple/swift-nio"), &id("apple/swift-atomics"), b"manifest")
            .unwrap();

        let expected = temp_dir
            .path()
            .join("apple_swift-nio")
            .join("apple_swift-atomics")
            .join("Package.swift");
        assert_eq!(fs::read(expected).unwrap(), b"manifest");
    }

    #[test]
    fn test_store_rejects_file_as_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("archive");
        fs::write(&root, "not a directory").unwrap();
        let archive = FileSystemManifestArchive::new(&root);

        let err = archive.store(&id("a/app"), &id("a/app"), b"manifest").unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DepGraphError>(),
            Some(DepGraphError::InvalidPath { .. })
        ));
        assert!(err.to_string().contains("not a directory"));
        assert_eq!(fs::read_to_string(&root).unwrap(), "not a directory");
    }

    #[test]
    fn test_load_all_round_trips_identifiers() {
        let temp_dir = TempDir::new().unwrap();
        let archive = FileSystemManifestArchive::new(temp_dir.path());
        archive.store(&id("a/root"), &id("a/root"), b"root").unwrap();
        archive.store(&id("a/root"), &id("my_org/lib"), b"lib").unwrap();

        let loaded = archive.load_all().unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].identifier, id("a/root"));
        // Only the first underscore separates owner from name
        assert_eq!(loaded[1].identifier, Identifier::new("my", "org_lib").unwrap());
        assert_eq!(loaded[1].seed, id("a/root"));
        assert_eq!(loaded[1].content, b"lib");
    }

    #[test]
    fn test_load_all_skips_hidden_and_empty_entries() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(".git/objects")).unwrap();
        fs::create_dir_all(temp_dir.path().join("a_root/.cache")).unwrap();
        fs::create_dir_all(temp_dir.path().join("a_root/b_empty")).unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let archive = FileSystemManifestArchive::new(temp_dir.path());
        assert!(archive.load_all().unwrap().is_empty());
    }

    #[test]
    fn test_load_all_keeps_first_copy_across_seeds() {
        let temp_dir = TempDir::new().unwrap();
        let archive = FileSystemManifestArchive::new(temp_dir.path());
        archive.store(&id("a/first"), &id("shared/lib"), b"one").unwrap();
        archive.store(&id("b/second"), &id("shared/lib"), b"two").unwrap();

        let loaded = archive.load_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].seed, id("a/first"));
        assert_eq!(loaded[0].content, b"one");
    }

    #[test]
    fn test_missing_root_is_archive_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let archive = FileSystemManifestArchive::new(temp_dir.path().join("absent"));

        let err = archive.load_all().unwrap_err();
        assert!(err.to_string().contains("Manifest archive not found"));
    }
}
