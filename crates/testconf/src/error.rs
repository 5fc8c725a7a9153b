//! Error types for test configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that make a present `testconf.json` unusable.
///
/// An absent file is not an error; see [`crate::TestConfig::load`].
#[derive(Error, Debug)]
pub enum TestConfError {
    /// The file exists but could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON or has fields of the wrong type
    #[error("Failed to parse testconf: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required field is absent or empty
    #[error("Missing {0} in testconf.json")]
    MissingField(&'static str),

    /// An entry in `Config` is not of the form `key=value`
    #[error("Invalid client property '{0}' in testconf.json (expected key=value)")]
    InvalidProperty(String),
}
