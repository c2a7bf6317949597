use crate::dependency_graph::domain::{
    DependencyDeclaration, ManifestRecord, VersionConstraint, HOSTING_DOMAIN,
};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Start of the package-level dependency list
static SECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"dependencies:\s*\[").expect("valid section regex"));

/// `.package(url: "...", ...)`
static URL_PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\.package\s*\(\s*url:\s*["']([^"']+)["'][^)]*\)"#).expect("valid url regex")
});

/// `.package("...", ...)`, the first quoted argument is the locator
static POSITIONAL_PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\.package\s*\(\s*["']([^"']+)["'][^)]*\)"#).expect("valid positional regex")
});

static DECLARATION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.package\s*\(").expect("valid declaration regex"));

static DECLARATION_LOCATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"url:\s*["']([^"']+)["']|["']([^"']+)["']"#).expect("valid locator regex")
});

static PACKAGE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"name:\s*["']([^"']+)["']"#).expect("valid name regex"));

static EXACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:\.exact\s*\(\s*|exact:\s*)["']([^"']+)["']"#).expect("valid exact regex")
});

static UP_TO_NEXT_MAJOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\.upToNextMajor\s*\(\s*from:\s*["']([^"']+)["']\s*\)"#)
        .expect("valid upToNextMajor regex")
});

static UP_TO_NEXT_MINOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\.upToNextMinor\s*\(\s*from:\s*["']([^"']+)["']\s*\)"#)
        .expect("valid upToNextMinor regex")
});

static FROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"from:\s*["']([^"']+)["']"#).expect("valid from regex"));

/// `"1.0.0"..<"2.0.0"` and `"1.0.0"..."2.0.0"`
static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["']([^"']+)["']\s*\.\.[.<]\s*["']([^"']+)["']"#).expect("valid range regex")
});

static BRANCH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:branch:\s*|\.branch\s*\(\s*)["']([^"']+)["']"#).expect("valid branch regex")
});

static REVISION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:revision:\s*|\.revision\s*\(\s*)["']([^"']+)["']"#)
        .expect("valid revision regex")
});

static BARE_VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"["'](\d+\.\d+\.\d+[^"']*)["']"#).expect("valid version regex")
});

/// ManifestParser extracts dependency declarations from `Package.swift` text
///
/// This is a pattern-based scanner, not a Swift parser. It never fails:
/// undecodable input yields a record with `parsed == false`, and a manifest
/// without a dependency section yields an empty dependency list.
pub struct ManifestParser;

impl ManifestParser {
    /// Parses raw manifest bytes, treating invalid UTF-8 as unreadable
    pub fn parse_bytes(content: &[u8]) -> ManifestRecord {
        match std::str::from_utf8(content) {
            Ok(text) => Self::parse(text),
            Err(e) => {
                tracing::debug!(error = %e, "manifest is not valid UTF-8");
                ManifestRecord::unreadable()
            }
        }
    }

    pub fn parse(content: &str) -> ManifestRecord {
        let (dependency_locators, declarations) = match Self::dependency_section(content) {
            Some(section) => (
                Self::extract_locators(section),
                Self::extract_declarations(section),
            ),
            None => (Vec::new(), Vec::new()),
        };

        ManifestRecord {
            declared_name: Self::extract_package_name(content),
            dependency_locators,
            declarations,
            parsed: true,
        }
    }

    /// Returns the text between the `[` following the first `dependencies:`
    /// marker and its matching `]`
    fn dependency_section(content: &str) -> Option<&str> {
        let marker = SECTION_MARKER.find(content)?;
        let open = marker.end() - 1;
        let close = Self::matching_close(content, open, b'[', b']');
        Some(&content[open + 1..close])
    }

    /// Index of the delimiter closing the one at `open`, skipping string
    /// literals. Unterminated regions run to the end of the input.
    fn matching_close(content: &str, open: usize, opening: u8, closing: u8) -> usize {
        let bytes = content.as_bytes();
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        for (idx, &byte) in bytes.iter().enumerate().skip(open) {
            if in_string {
                if escaped {
                    escaped = false;
                } else if byte == b'\\' {
                    escaped = true;
                } else if byte == b'"' {
                    in_string = false;
                }
                continue;
            }

            if byte == b'"' {
                in_string = true;
            } else if byte == opening {
                depth += 1;
            } else if byte == closing {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return idx;
                }
            }
        }

        bytes.len()
    }

    /// Hosting-service locators in textual order, deduplicated verbatim
    fn extract_locators(section: &str) -> Vec<String> {
        let mut matches: Vec<(usize, &str)> = Vec::new();
        for pattern in [&*URL_PACKAGE, &*POSITIONAL_PACKAGE] {
            for caps in pattern.captures_iter(section) {
                if let (Some(whole), Some(locator)) = (caps.get(0), caps.get(1)) {
                    if locator.as_str().contains(HOSTING_DOMAIN) {
                        matches.push((whole.start(), locator.as_str()));
                    }
                }
            }
        }
        matches.sort_by_key(|(position, _)| *position);

        let mut seen = HashSet::new();
        matches
            .into_iter()
            .filter(|(_, locator)| seen.insert(*locator))
            .map(|(_, locator)| locator.to_string())
            .collect()
    }

    /// Every `.package(...)` expression pointing at the hosting service,
    /// with its classified version constraint
    fn extract_declarations(section: &str) -> Vec<DependencyDeclaration> {
        let mut declarations = Vec::new();

        for start in DECLARATION_START.find_iter(section) {
            let open = start.end() - 1;
            let close = Self::matching_close(section, open, b'(', b')');
            let body = &section[open + 1..close.min(section.len())];

            let Some(caps) = DECLARATION_LOCATOR.captures(body) else {
                continue;
            };
            let Some(locator) = caps.get(1).or_else(|| caps.get(2)) else {
                continue;
            };
            if !locator.as_str().contains(HOSTING_DOMAIN) {
                continue;
            }

            declarations.push(DependencyDeclaration {
                locator: locator.as_str().to_string(),
                constraint: Self::classify_constraint(body),
            });
        }

        declarations
    }

    /// Classifies the version requirement of one declaration; first match wins
    pub fn classify_constraint(declaration: &str) -> VersionConstraint {
        if let Some(version) = first_capture(declaration, &EXACT) {
            return VersionConstraint::Exact { version };
        }
        if let Some(version) = first_capture(declaration, &UP_TO_NEXT_MAJOR) {
            return VersionConstraint::UpToNextMajor { version };
        }
        if let Some(version) = first_capture(declaration, &UP_TO_NEXT_MINOR) {
            return VersionConstraint::UpToNextMinor { version };
        }
        if let Some(version) = first_capture(declaration, &FROM) {
            return VersionConstraint::From { version };
        }
        if let Some(caps) = RANGE.captures(declaration) {
            if let (Some(lower), Some(upper)) = (caps.get(1), caps.get(2)) {
                return VersionConstraint::Range {
                    lower: lower.as_str().to_string(),
                    upper: upper.as_str().to_string(),
                };
            }
        }
        if let Some(name) = first_capture(declaration, &BRANCH) {
            return VersionConstraint::Branch { name };
        }
        if let Some(hash) = first_capture(declaration, &REVISION) {
            return VersionConstraint::Revision { hash };
        }
        if let Some(version) = first_capture(declaration, &BARE_VERSION) {
            return VersionConstraint::Exact { version };
        }

        VersionConstraint::Unknown
    }

    fn extract_package_name(content: &str) -> Option<String> {
        first_capture(content, &PACKAGE_NAME)
    }
}

fn first_capture(text: &str, pattern: &Regex) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
