//! Error taxonomy shared by every orderdesk crate.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`OrderDeskError`].
pub type Result<T> = std::result::Result<T, OrderDeskError>;

/// Which reference table a loader error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    Broker,
    Scheme,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Broker => f.write_str("broker master"),
            ReferenceKind::Scheme => f.write_str("scheme master"),
        }
    }
}

/// Fatal errors. Each one aborts the current request; nothing is retried.
///
/// Unrecognized schemes are not errors: they are reported per row through
/// [`crate::RejectReason`] and one aggregate warning.
#[derive(Error, Debug)]
pub enum OrderDeskError {
    /// A reference file is absent.
    #[error("{kind} not found at {}", path.display())]
    ReferenceNotFound { kind: ReferenceKind, path: PathBuf },

    /// A reference file exists but lacks columns the loader projects onto.
    #[error("{} is missing reference columns: {}", path.display(), missing.join(", "))]
    ReferenceColumns { path: PathBuf, missing: Vec<String> },

    /// The uploaded order table lacks one or more required columns.
    #[error("the uploaded file is missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// A spreadsheet could not be opened or parsed.
    #[error("error loading {}: {reason}", path.display())]
    FileLoad { path: PathBuf, reason: String },

    /// Writing an output workbook failed.
    #[error("error writing {}: {reason}", path.display())]
    Export { path: PathBuf, reason: String },
}

impl OrderDeskError {
    pub fn file_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        OrderDeskError::FileLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn export(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        OrderDeskError::Export {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
