//! Input text loading.
//!
//! Reads the text to synthesize from a local UTF-8 file. Leading and trailing
//! whitespace is stripped, and a file with nothing left after stripping is
//! rejected before any remote service is contacted.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Result type for text loading
pub type TextResult<T> = Result<T, TextError>;

/// Errors raised while loading the input text.
#[derive(Error, Debug)]
pub enum TextError {
    /// Input file does not exist
    #[error("File {} not found", .path.display())]
    NotFound { path: PathBuf },

    /// Input file contains only whitespace
    #[error("File {} is empty", .path.display())]
    Empty { path: PathBuf },

    /// Any other I/O or decoding failure
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and trim the text content of `path`.
pub async fn read_text_file(path: &Path) -> TextResult<String> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            ErrorKind::NotFound => TextError::NotFound {
                path: path.to_path_buf(),
            },
            _ => TextError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

    let text = raw.trim();
    if text.is_empty() {
        return Err(TextError::Empty {
            path: path.to_path_buf(),
        });
    }

    info!(
        characters = char_count(text),
        path = %path.display(),
        "Read input text"
    );

    Ok(text.to_string())
}

/// Number of characters (Unicode scalar values) in `text`.
#[inline]
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}
