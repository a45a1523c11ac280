use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AltoError {
    #[error("XML syntax error: {detail}")]
    Syntax { detail: String },

    #[error("Not an ALTO file: namespace {} is not registered", .0.as_deref().unwrap_or("<none>"))]
    UnknownNamespace(Option<String>),

    #[error("No String elements found, confidence is undefined")]
    NoTokens,

    #[error("Invalid word confidence value: {}", .0.as_deref().unwrap_or("<missing WC>"))]
    BadConfidenceValue(Option<String>),

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Cannot read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification used when reporting batch failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Parse,
    Score,
    Io,
}

impl AltoError {
    pub(crate) fn syntax(detail: impl Into<String>) -> Self {
        AltoError::Syntax {
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AltoError::Syntax { .. } | AltoError::UnknownNamespace(_) => ErrorKind::Parse,
            AltoError::NoTokens | AltoError::BadConfidenceValue(_) => ErrorKind::Score,
            AltoError::NotFound(_) | AltoError::Unreadable { .. } | AltoError::Io(_) => {
                ErrorKind::Io
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, AltoError>;
