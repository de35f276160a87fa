use std::fs;
use std::io;
use std::path::Path;

use thiserror::Error;

use crate::LocalDocument;

/// File extensions the document picker accepts, lowercase and without the dot.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["pdf", "txt", "md"];

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported file type (expected .pdf, .txt or .md)")]
    Unsupported,
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("file is empty")]
    Empty,
}

/// Returns true if `name` ends with one of [`SUPPORTED_EXTENSIONS`], ignoring case.
pub fn is_supported_document(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(stem, ext)| {
            !stem.is_empty()
                && SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Read a document from disk, applying the extension filter and guessing its media type.
///
/// A path without a usable file name fails the extension filter.
pub fn read_document(path: &Path) -> Result<LocalDocument, DocumentError> {
    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| is_supported_document(name))
        .ok_or(DocumentError::Unsupported)?
        .to_string();

    let bytes = fs::read(path)?;
    if bytes.is_empty() {
        return Err(DocumentError::Empty);
    }

    let media_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(LocalDocument {
        filename,
        bytes,
        media_type,
    })
}
