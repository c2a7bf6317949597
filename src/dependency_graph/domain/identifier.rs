use crate::shared::Result;
use serde::{Serialize, Serializer};
use url::Url;

/// Hosting-service marker a locator must contain to be considered at all
pub const HOSTING_DOMAIN: &str = "github.com";

/// Maximum length for a single identifier segment (security limit)
const MAX_SEGMENT_LENGTH: usize = 255;

/// Canonical `owner/name` key for a package repository
///
/// Case is preserved exactly as it appeared in the locator, so
/// `Apple/Swift-NIO` and `apple/swift-nio` are different nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    owner: String,
    name: String,
}

impl Identifier {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let owner = owner.into();
        let name = name.into();

        for (segment, label) in [(&owner, "owner"), (&name, "name")] {
            if segment.is_empty() {
                anyhow::bail!("Identifier {} cannot be empty", label);
            }
            if segment.len() > MAX_SEGMENT_LENGTH {
                anyhow::bail!(
                    "Identifier {} is too long ({} bytes). Maximum allowed: {} bytes",
                    label,
                    segment.len(),
                    MAX_SEGMENT_LENGTH
                );
            }
            if segment.contains('/') {
                anyhow::bail!("Identifier {} must not contain '/'", label);
            }
        }

        Ok(Self { owner, name })
    }

    /// Parses an already canonical `owner/name` string
    pub fn parse(key: &str) -> Result<Self> {
        match key.split_once('/') {
            Some((owner, name)) => Self::new(owner, name),
            None => anyhow::bail!("Identifier '{}' is not of the form owner/name", key),
        }
    }

    /// Normalizes a manifest locator into an identifier
    ///
    /// Strips a trailing `.git`, takes the path component of the URL and
    /// keeps its first two segments. Locators that do not yield two
    /// non-empty segments return `None`; they are unusable input, not errors.
    pub fn from_locator(locator: &str) -> Option<Self> {
        let trimmed = locator.trim();
        let stripped = trimmed.strip_suffix(".git").unwrap_or(trimmed);

        let path = match Url::parse(stripped) {
            Ok(url) if url.has_host() => url.path().to_string(),
            Ok(_) => return None,
            // Scheme-less locators like `github.com/owner/name`
            Err(_) => {
                let mut rest = stripped;
                if let Some((host, tail)) = stripped.split_once('/') {
                    if host.contains('.') {
                        rest = tail;
                    }
                }
                rest.to_string()
            }
        };

        let segments: Vec<&str> = path.trim_matches('/').split('/').collect();
        if segments.len() < 2 || segments[0].is_empty() || segments[1].is_empty() {
            return None;
        }

        Self::new(segments[0], segments[1]).ok()
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path-safe form (`owner_name`) used as a directory name in the archive
    pub fn safe_name(&self) -> String {
        format!("{}_{}", self.owner, self.name)
    }

    /// Inverse of [`Identifier::safe_name`]
    ///
    /// Only the first `_` is treated as the separator, since GitHub owners
    /// cannot contain underscores but repository names can.
    pub fn from_safe_name(safe: &str) -> Option<Self> {
        let (owner, name) = safe.split_once('_')?;
        Self::new(owner, name).ok()
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
