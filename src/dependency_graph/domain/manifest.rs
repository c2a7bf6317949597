use serde::Serialize;

/// Advisory classification of a declaration's version requirement
///
/// Purely informational: it is rendered in reports but never influences
/// which identifiers get resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VersionConstraint {
    From { version: String },
    UpToNextMajor { version: String },
    UpToNextMinor { version: String },
    Exact { version: String },
    Range { lower: String, upper: String },
    Branch { name: String },
    Revision { hash: String },
    Unknown,
}

impl VersionConstraint {
    fn next_major(version: &str) -> Option<String> {
        let major: u64 = version.split('.').next()?.parse().ok()?;
        Some(format!("{}.0.0", major + 1))
    }

    fn next_minor(version: &str) -> Option<String> {
        let mut parts = version.split('.');
        let major = parts.next()?;
        let minor: u64 = parts.next()?.parse().ok()?;
        Some(format!("{}.{}.0", major, minor + 1))
    }
}

impl std::fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VersionConstraint::From { version } => write!(f, "from {}", version),
            VersionConstraint::UpToNextMajor { version } => match Self::next_major(version) {
                Some(bound) => write!(f, "from {} up to next major (< {})", version, bound),
                None => write!(f, "from {} up to next major", version),
            },
            VersionConstraint::UpToNextMinor { version } => match Self::next_minor(version) {
                Some(bound) => write!(f, "from {} up to next minor (< {})", version, bound),
                None => write!(f, "from {} up to next minor", version),
            },
            VersionConstraint::Exact { version } => write!(f, "exact {}", version),
            VersionConstraint::Range { lower, upper } => write!(f, "range {} ... {}", lower, upper),
            VersionConstraint::Branch { name } => write!(f, "branch: {}", name),
            VersionConstraint::Revision { hash } => {
                let short: String = hash.chars().take(8).collect();
                write!(f, "revision: {}...", short)
            }
            VersionConstraint::Unknown => write!(f, "unknown"),
        }
    }
}

/// One `.package(...)` declaration that points at the hosting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyDeclaration {
    pub locator: String,
    pub constraint: VersionConstraint,
}

/// Result of parsing a single manifest
///
/// `parsed == false` means the text could not be decoded. An empty
/// `dependency_locators` with `parsed == true` is the ordinary
/// "declares no dependencies" case.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestRecord {
    pub declared_name: Option<String>,
    pub dependency_locators: Vec<String>,
    pub declarations: Vec<DependencyDeclaration>,
    pub parsed: bool,
}

impl ManifestRecord {
    pub fn unreadable() -> Self {
        Self::default()
    }

    pub fn has_dependencies(&self) -> bool {
        !self.dependency_locators.is_empty()
    }
}
