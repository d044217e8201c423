//! Error types for scanning, moving, organizing and reporting.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while validating or listing the target folder.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The folder does not exist.
    #[error("Folder not found: {path}")]
    NotFound { path: PathBuf },

    /// The path exists but is not a directory.
    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The OS refused to enumerate the folder.
    #[error("Permission denied accessing folder: {path}")]
    AccessDenied { path: PathBuf },

    /// Any other I/O failure while listing.
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Create a scan error from an I/O error, keeping the dedicated kinds.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::PermissionDenied => Self::AccessDenied { path },
            std::io::ErrorKind::NotADirectory => Self::NotADirectory { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Failure to relocate a single file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("Failed to move {filename}: {reason}")]
    MoveFailed { filename: String, reason: String },
}

impl MoveError {
    /// The name of the file that could not be moved.
    pub fn filename(&self) -> &str {
        match self {
            Self::MoveFailed { filename, .. } => filename,
        }
    }

    /// The underlying OS reason text.
    pub fn reason(&self) -> &str {
        match self {
            Self::MoveFailed { reason, .. } => reason,
        }
    }
}

/// Errors that abort an organize run.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The folder could not be validated or listed.
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The first move failure of a fail-fast run.
    #[error("Failed to organize {filename}: {reason}")]
    OrganizeFailed { filename: String, reason: String },

    /// The run was cancelled between two moves.
    #[error("Organization cancelled after moving {moved} file(s)")]
    Cancelled { moved: usize },

    /// A background worker stopped without producing an outcome.
    #[error("Organizer worker panicked: {0}")]
    WorkerPanicked(String),
}

impl From<MoveError> for OrganizeError {
    fn from(err: MoveError) -> Self {
        match err {
            MoveError::MoveFailed { filename, reason } => {
                Self::OrganizeFailed { filename, reason }
            }
        }
    }
}

/// One report artifact that could not be written.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Failed to write report {target}: {reason}")]
pub struct ReportWriteFailure {
    pub target: PathBuf,
    pub reason: String,
}

/// Returned when at least one report artifact failed to write.
///
/// Every other artifact was still attempted; `written` lists those that
/// succeeded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{} report(s) could not be written", .failures.len())]
pub struct ReportError {
    pub written: Vec<PathBuf>,
    pub failures: Vec<ReportWriteFailure>,
}
