//! Plain text loader.

use crate::error::{Error, Result};

use super::detect::detect_format_from_bytes;
use super::TextSource;

/// Loads `.txt` files as UTF-8, falling back to Latin-1.
#[derive(Debug, Clone, Default)]
pub struct PlainTextLoader {
    _private: (),
}

impl PlainTextLoader {
    /// Create a new plain text loader.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl TextSource for PlainTextLoader {
    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn name(&self) -> &str {
        "text"
    }

    fn load_bytes(&self, bytes: &[u8]) -> Result<String> {
        let format = detect_format_from_bytes(bytes);
        if format.is_binary() {
            return Err(Error::UnsupportedFormat(format!(
                "{} content in a text file",
                format
            )));
        }

        if bytes.starts_with(b"\xFF\xFE") || bytes.starts_with(b"\xFE\xFF") {
            return Err(Error::Encoding("UTF-16 text is not supported".to_string()));
        }

        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(e) => {
                log::warn!("Input is not valid UTF-8 ({}), decoding as Latin-1", e);
                Ok(bytes.iter().map(|&b| b as char).collect())
            }
        }
    }
}
