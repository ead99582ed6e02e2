use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnumError {
    // Traversal
    #[error("path not found: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("access denied: {}", .0.display())]
    AccessDenied(PathBuf),

    #[error("enumeration failed: {}", .path.display())]
    EnumerationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Config
    #[error("invalid search pattern: {0:?}")]
    InvalidPattern(String),

    #[error("invalid path: {}", .0.display())]
    InvalidPath(PathBuf),
}

impl EnumError {
    /// The path this error occurred at, if applicable.
    /// Callers use this to present "Failed: <path>" without pattern matching on variants.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::PathNotFound(p)
            | Self::FileNotFound(p)
            | Self::NotADirectory(p)
            | Self::AccessDenied(p)
            | Self::InvalidPath(p)
            | Self::EnumerationFailed { path: p, .. } => Some(p),
            Self::InvalidPattern(_) => None,
        }
    }

    /// Whether this error was raised while validating the configuration.
    ///
    /// Configuration errors are reported by
    /// [`EnumerationBuilder::build`](crate::EnumerationBuilder::build) before any
    /// native call is made, and `continue_on_exception` never hides them.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidPattern(_) | Self::InvalidPath(_))
    }
}
