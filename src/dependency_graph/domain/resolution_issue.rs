use super::Identifier;
use serde::Serialize;
use thiserror::Error;

/// Per-identifier problems met while resolving
///
/// None of these abort a run. They are collected so the final report can
/// explain why an identifier ended up in the failed set or was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionIssue {
    #[error("Locator '{locator}' does not name a hosted repository")]
    UnresolvableLocator { locator: String },

    #[error("Manifest for {identifier} could not be decoded as UTF-8")]
    ManifestUnreadable { identifier: Identifier },

    #[error("No Package.swift found for {identifier}")]
    ManifestNotFound { identifier: Identifier },

    #[error("Failed to fetch manifest for {identifier}: {reason}")]
    FetchFailed { identifier: Identifier, reason: String },
}

impl ResolutionIssue {
    /// The identifier this issue marks as failed, if any
    pub fn identifier(&self) -> Option<&Identifier> {
        match self {
            ResolutionIssue::UnresolvableLocator { .. } => None,
            ResolutionIssue::ManifestUnreadable { identifier }
            | ResolutionIssue::ManifestNotFound { identifier }
            | ResolutionIssue::FetchFailed { identifier, .. } => Some(identifier),
        }
    }
}
