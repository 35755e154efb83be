//! Error types for the fallible edges of the crate
//!
//! Form transitions never fail. Errors only come from loading declarations
//! or options from JSON and from the filesystem.

use thiserror::Error;

/// Errors raised while building a form from external configuration
#[derive(Debug, Error)]
pub enum FormError {
    /// A `pattern` rule did not compile
    #[error("invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// Declarations or options were not valid JSON for their shape
    #[error("invalid form configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading a configuration file failed
    #[error("failed to read form configuration: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FormError>;
