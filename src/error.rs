//! Error types for preference loading and lookup
//!
//! This module defines the error types used throughout the userjs library.
//! All public functions return [`Result<T, Error>`] for consistent error handling.

/// Errors that can occur while loading, querying or reading preferences
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed assignment line, ambiguous literal or unterminated string
    #[error("Parse error at line {line}, column {column}: {message} (in `{content}`)")]
    Parse {
        line: usize,
        column: usize,
        /// Raw text of the offending line
        content: String,
        message: String,
    },

    /// A preference holds a value of a different type than the caller asked for
    #[error("Preference '{key}' is {found}, expected {expected}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid glob pattern in query
    #[error("Invalid glob pattern: {0}")]
    InvalidGlobPattern(String),
}

impl Error {
    /// Line number of a parse error, if this is one
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type alias for convenience
///
/// # Example
///
/// ```rust
/// use userjs::{Result, load};
///
/// fn count_prefs(content: &str) -> Result<usize> {
///     let set = load(content)?;
///     Ok(set.len())
/// }
/// # assert_eq!(count_prefs("user_pref(\"a\", 1);").unwrap(), 1);
/// ```
pub type Result<T> = std::result::Result<T, Error>;
