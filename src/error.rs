//! Error types for a cleaning run.

use std::path::PathBuf;

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = std::result::Result<T, CleanError>;

/// Broad classification of a [`CleanError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any traversal started.
    InvalidConfig,
    /// A regular expression failed to compile during matching.
    InvalidPattern,
    /// A file could not be deleted, or the root could not be opened.
    Io,
}

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("unknown directory: {} does not exist or is not a directory", path.display())]
    MissingRoot { path: PathBuf },

    #[error("cannot read name list {}: {source}", path.display())]
    NameList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("I/O failure at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CleanError {
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidConfig { .. } | Self::MissingRoot { .. } | Self::NameList { .. } => {
                ErrorKind::InvalidConfig
            }
            Self::InvalidPattern { .. } => ErrorKind::InvalidPattern,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// True for errors raised while resolving configuration, before any I/O on the tree.
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidConfig)
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = CleanError::InvalidConfig {
            details: "no criteria".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);
        assert!(err.is_config_error());

        let err = CleanError::MissingRoot {
            path: PathBuf::from("/nope"),
        };
        assert_eq!(err.kind(), ErrorKind::InvalidConfig);

        let err = CleanError::io(
            "/tmp/x",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_invalid_pattern_message_names_pattern() {
        let pattern = String::from("(");
        let source = regex::Regex::new(&pattern).unwrap_err();
        let err = CleanError::InvalidPattern {
            pattern,
            source,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidPattern);
        assert!(err.to_string().contains("invalid pattern `(`"));
    }
}
