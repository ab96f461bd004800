//! Error types for regexlit
//!
//! This module provides error handling using the `thiserror` crate.
//! Errors are categorized by their source: literal flag parsing, engine
//! compilation, or engine failures while matching.

use thiserror::Error;

/// Error produced by a regex engine backend
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for regexlit
#[derive(Error, Debug)]
pub enum RegexError {
    /// One or more flag characters in a `/pattern/flags` literal were not
    /// recognized. Carries the offending characters in encounter order.
    #[error("invalid option flags '{0}'")]
    InvalidOptionFlags(String),

    /// The engine rejected the pattern body
    #[error(transparent)]
    Compile(EngineError),

    /// The engine failed while searching (e.g. a backtracking limit was hit)
    #[error("runtime error: {0}")]
    Runtime(EngineError),
}

impl RegexError {
    /// The invalid flag characters, if this is a flag error
    pub fn invalid_flags(&self) -> Option<&str> {
        match self {
            RegexError::InvalidOptionFlags(flags) => Some(flags),
            _ => None,
        }
    }

    /// Wrap an engine compile error
    pub fn compile<E>(err: E) -> Self
    where
        E: Into<EngineError>,
    {
        RegexError::Compile(err.into())
    }

    /// Wrap an engine matching error
    pub fn runtime<E>(err: E) -> Self
    where
        E: Into<EngineError>,
    {
        RegexError::Runtime(err.into())
    }
}

/// Result type alias for regexlit operations
pub type Result<T> = std::result::Result<T, RegexError>;
