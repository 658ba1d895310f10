//! Source document format detection.

use std::fmt;
use std::path::Path;

/// Document formats known to the ingestion layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Plain text
    Text,
    /// PDF document
    Pdf,
    /// Word document
    Docx,
}

impl SourceFormat {
    /// Map a file extension (without dot, any case) to a format.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Some(SourceFormat::Text),
            "pdf" => Some(SourceFormat::Pdf),
            "docx" | "doc" => Some(SourceFormat::Docx),
            _ => None,
        }
    }

    /// Whether the format is a binary container.
    pub fn is_binary(&self) -> bool {
        !matches!(self, SourceFormat::Text)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SourceFormat::Text => "text",
            SourceFormat::Pdf => "PDF",
            SourceFormat::Docx => "DOCX",
        })
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// ZIP local file header, the container of DOCX files
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect a format from a file path's extension.
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Option<SourceFormat> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(SourceFormat::from_extension)
}

/// Detect a format from leading content bytes. Anything without a known
/// binary signature is treated as text.
pub fn detect_format_from_bytes(data: &[u8]) -> SourceFormat {
    if data.starts_with(PDF_MAGIC) {
        SourceFormat::Pdf
    } else if data.starts_with(ZIP_MAGIC) {
        SourceFormat::Docx
    } else {
        SourceFormat::Text
    }
}
