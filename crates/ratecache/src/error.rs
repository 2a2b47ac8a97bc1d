//! Error types for ratecache

use std::fmt;

/// Result type alias for ratecache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a caller-supplied loader
pub type LoaderError = Box<dyn std::error::Error + Send + Sync>;

/// Error types for cache operations
#[derive(Debug)]
pub enum Error {
    /// Key not present in the cache
    NotFound,

    /// The miss handler failed to produce a value
    Loader(LoaderError),

    /// Write rejected by the backing store (unreachable with the in-memory
    /// store; kept for pluggable backends)
    Insert(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "Key not found"),
            Error::Loader(e) => write!(f, "Loader failed: {}", e),
            Error::Insert(msg) => write!(f, "Insert failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Loader(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_loader_error_keeps_source() {
        let source: LoaderError = "upstream unreachable".into();
        let err = Error::Loader(source);

        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "Loader failed: upstream unreachable");
    }

    #[test]
    fn test_not_found_display() {
        assert_eq!(Error::NotFound.to_string(), "Key not found");
        assert!(Error::NotFound.source().is_none());
    }
}
