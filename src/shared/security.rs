use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Upper bound for any file we read: seed lists, archived manifests, config (100 MB)
pub const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Fails when `path` is a symbolic link
///
/// Uses `symlink_metadata()` so the link itself is inspected, not its target.
/// `operation` names what the caller is about to do ("write", "scan") and
/// only appears in error messages.
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to read metadata for {} operation on {}: {}",
            operation,
            path.display(),
            e
        )
    })?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. {} operations on symbolic links are not allowed.",
            path.display(),
            operation
        );
    }

    Ok(())
}

/// Fails unless `path` exists and is a regular file (not a directory or symlink)
pub fn validate_regular_file(path: &Path, file_description: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {} metadata: {}", file_description, e))?;

    if metadata.is_symlink() {
        anyhow::bail!(
            "Security: {} is a symbolic link. Symbolic links are not allowed.",
            path.display()
        );
    }
    if !metadata.is_file() {
        anyhow::bail!("{} is not a regular file", path.display());
    }

    Ok(())
}

pub fn validate_file_size(file_size: u64, path: &Path, max_size: u64) -> Result<()> {
    if file_size > max_size {
        anyhow::bail!(
            "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
            path.display(),
            file_size,
            max_size
        );
    }
    Ok(())
}

/// Reads a file after the symlink, file-type and size checks
///
/// # Errors
/// Returns an error if any check fails or the file cannot be read
pub fn read_regular_file(path: &Path, file_description: &str) -> Result<Vec<u8>> {
    validate_regular_file(path, file_description)?;

    let file_size = fs::symlink_metadata(path)?.len();
    validate_file_size(file_size, path, MAX_FILE_SIZE)?;

    fs::read(path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", file_description, e))
}
