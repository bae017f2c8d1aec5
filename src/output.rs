//! Generated contract files: naming and persistence.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Longest client-name fragment kept in a filename.
const MAX_NAME_CHARS: usize = 50;

/// Length of the sale-id fragment in a filename.
const SHORT_ID_CHARS: usize = 8;

/// Serialized form of a contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Word-processor document
    #[default]
    Docx,

    /// JSON dump of the assembled document
    Json,

    /// Plain text preview
    Text,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }

    /// MIME type of the serialized bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            OutputFormat::Json => "application/json",
            OutputFormat::Text => "text/plain; charset=utf-8",
        }
    }
}

/// Deterministic filename for a contract:
/// `Contract_<Client>[-<saleid>]_<YYYY-MM-DD>.<ext>`.
///
/// The first 50 characters of the client name are kept, each character
/// other than an ASCII letter or digit replaced by an underscore; a blank
/// name becomes `Client`.
/// The sale id contributes its first eight letters and digits.
pub fn contract_filename(
    client_name: &str,
    sale_id: Option<&str>,
    date: NaiveDate,
    format: OutputFormat,
) -> String {
    let name = if client_name.trim().is_empty() {
        "Client".to_string()
    } else {
        sanitize_name(client_name)
    };

    let short_id: String = sale_id
        .unwrap_or("")
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(SHORT_ID_CHARS)
        .collect();

    let mut filename = format!("Contract_{}", name);
    if !short_id.is_empty() {
        filename.push('-');
        filename.push_str(&short_id);
    }
    filename.push_str(&format!(
        "_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    ));
    filename
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .take(MAX_NAME_CHARS)
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// A serialized contract and the name it should be saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedContract {
    /// Suggested filename
    pub filename: String,

    /// Serialized document
    pub bytes: Vec<u8>,

    /// Format of `bytes`
    pub format: OutputFormat,
}

impl GeneratedContract {
    /// MIME type of the bytes.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if there are no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Destination for generated contracts.
///
/// A failed save leaves the contract untouched, so it can be offered to
/// the same or another sink again.
pub trait ContractSink {
    /// Persist the contract, returning where it was stored.
    fn save(&self, contract: &GeneratedContract) -> Result<PathBuf>;
}

/// Saves contracts into a directory.
///
/// Each file is written to a temporary file in the same directory and then
/// renamed into place, so a reader never sees a partial document.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    create_dirs: bool,
}

impl DirectorySink {
    /// Create a sink for `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            create_dirs: true,
        }
    }

    /// Whether to create the directory when it is missing (default: true).
    pub fn with_create_dirs(mut self, create: bool) -> Self {
        self.create_dirs = create;
        self
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn target(&self, contract: &GeneratedContract) -> PathBuf {
        self.dir.join(&contract.filename)
    }

    /// Save on a blocking thread of the tokio runtime.
    #[cfg(feature = "async")]
    pub async fn save_async(&self, contract: &GeneratedContract) -> Result<PathBuf> {
        let path = self.target(contract);
        let persistence = |source: std::io::Error| Error::Persistence {
            path: path.clone(),
            source,
        };
        if self.create_dirs {
            tokio::fs::create_dir_all(&self.dir)
                .await
                .map_err(persistence)?;
        }

        let sink = self.clone();
        let contract = contract.clone();
        tokio::task::spawn_blocking(move || sink.save(&contract))
            .await
            .map_err(|e| Error::Persistence {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::Other, e),
            })?
    }
}

impl ContractSink for DirectorySink {
    fn save(&self, contract: &GeneratedContract) -> Result<PathBuf> {
        let path = self.target(contract);
        let persistence = |source: std::io::Error| Error::Persistence {
            path: path.clone(),
            source,
        };

        if self.create_dirs {
            fs::create_dir_all(&self.dir).map_err(persistence)?;
        }

        let mut file = NamedTempFile::new_in(&self.dir).map_err(persistence)?;
        file.write_all(&contract.bytes).map_err(persistence)?;
        file.as_file().sync_all().map_err(persistence)?;
        file.persist(&path).map_err(|e| persistence(e.error))?;

        log::debug!("Saved {} ({} bytes)", path.display(), contract.len());
        Ok(path)
    }
}
