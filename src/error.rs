use serde::Serialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Core error type
// ---------------------------------------------------------------------------

/// Every recoverable failure the calculators can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// An input violates a numeric precondition (k > n, zero weight sum...).
    #[error("{0}")]
    Domain(String),

    #[error("need at least {required} {what}, got {given}")]
    InsufficientData {
        what: &'static str,
        required: usize,
        given: usize,
    },

    /// Mathematically undefined configuration.
    #[error("{0}")]
    Degenerate(String),

    /// Project lines naming beads that are not in the catalog.
    #[error("unknown bead(s) in project: {}", .missing.join(", "))]
    Reference { missing: Vec<String> },

    /// A catalog edit naming a bead the catalog does not hold.
    #[error("bead '{name}' is not in the catalog")]
    NotInCatalog { name: String },

    #[error("{0}")]
    Format(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    pub fn domain(msg: impl Into<String>) -> Self {
        CoreError::Domain(msg.into())
    }

    pub fn format(msg: impl Into<String>) -> Self {
        CoreError::Format(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Domain(_) => ErrorKind::Domain,
            CoreError::InsufficientData { .. } => ErrorKind::InsufficientData,
            CoreError::Degenerate(_) => ErrorKind::Degenerate,
            CoreError::Reference { .. } | CoreError::NotInCatalog { .. } => ErrorKind::Reference,
            CoreError::Format(_) => ErrorKind::Format,
        }
    }
}

// ---------------------------------------------------------------------------
// Structured report handed to the presentation layer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Domain,
    InsufficientData,
    Degenerate,
    Reference,
    Format,
}

/// Error kind plus a human-readable detail, ready to be serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub kind: ErrorKind,
    pub detail: String,
    /// Unresolved bead names, only filled for [`ErrorKind::Reference`].
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing: Vec<String>,
}

impl From<&CoreError> for ErrorReport {
    fn from(err: &CoreError) -> Self {
        let missing = match err {
            CoreError::Reference { missing } => missing.clone(),
            CoreError::NotInCatalog { name } => vec![name.clone()],
            _ => Vec::new(),
        };
        ErrorReport {
            kind: err.kind(),
            detail: err.to_string(),
            missing,
        }
    }
}
