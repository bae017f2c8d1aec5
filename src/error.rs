//! Error types for saledoc library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for saledoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while generating or saving a contract.
///
/// Missing data fields, unknown style names and unparseable dates are not
/// errors: they degrade to placeholders or defaults where they occur.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading templates or input files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The template JSON could not be parsed.
    #[error("Template parsing error: {0}")]
    TemplateParse(#[from] serde_json::Error),

    /// The template parsed but violates a structural rule.
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    /// The assembled document could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Writing the generated document failed. The generated bytes are
    /// still valid and may be saved again.
    #[error("Failed to save {}: {source}", path.display())]
    Persistence {
        /// Target path of the failed write
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: io::Error,
    },

    /// Domain input could not be interpreted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Whether the operation can be retried without regenerating the
    /// document.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Persistence { .. })
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::Serialization(format!("ZIP packaging error: {}", err))
    }
}
