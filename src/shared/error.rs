use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Resolution issues (unreachable manifests, unparseable locators) are
/// reported but never change the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success, including runs that recorded resolution issues
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (seed list, archive, file I/O, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-level failures that abort a run.
///
/// Per-identifier problems during a walk are not errors; they are recorded
/// as [`ResolutionIssue`](crate::dependency_graph::domain::ResolutionIssue)s.
#[derive(Debug, Error)]
pub enum DepGraphError {
    #[error("Seed list not found: {path}\n\n💡 Hint: {suggestion}")]
    SeedListNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse seed list: {path}\nDetails: {details}\n\n💡 Hint: The seed list must be a CSV file with a 'url' column (and an optional 'repo' column)")]
    SeedListParseError { path: PathBuf, details: String },

    #[error("Manifest archive not found: {path}\n\n💡 Hint: Run 'spm-depgraph resolve' first, or pass --dir pointing at an existing archive")]
    ArchiveNotFound { path: PathBuf },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Invalid path: {path}\nReason: {reason}\n\n💡 Hint: Choose an output directory that is not an existing file")]
    InvalidPath { path: PathBuf, reason: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    /// Validation error for identifiers and builders
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("No GitHub token found in {variables}\n\n💡 Hint: Export a personal access token in one of these variables, or pass --anonymous to use the unauthenticated rate limit")]
    MissingCredentials { variables: String },
}
