//! Document ingestion: turning source files into plain text.
//!
//! Loaders are registered per file extension. Only plain text ships with the
//! crate; PDF and Word documents are recognised but need an external loader
//! implementing [`TextSource`].
//!
//! # Example
//!
//! ```no_run
//! use reqmodel::ingest::LoaderRegistry;
//! use std::path::Path;
//!
//! fn main() -> reqmodel::Result<()> {
//!     let registry = LoaderRegistry::with_defaults();
//!     let loaded = registry.load(Path::new("requirements.txt"))?;
//!     println!("{}: {} bytes", loaded.doc_id, loaded.text.len());
//!     Ok(())
//! }
//! ```

mod detect;
mod text;

pub use detect::{detect_format_from_bytes, detect_format_from_path, SourceFormat};
pub use text::PlainTextLoader;

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Trait for document-to-text loaders.
///
/// Implement this trait to add support for a new document format.
pub trait TextSource: Send + Sync {
    /// Get the supported file extensions for this loader.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["txt"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this loader.
    fn name(&self) -> &str;

    /// Extract plain text from raw file content.
    fn load_bytes(&self, bytes: &[u8]) -> Result<String>;

    /// Extract plain text from a file.
    fn load(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        self.load_bytes(&bytes)
    }

    /// Check if this loader supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Plain text of a loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    /// Document identifier (the file stem)
    pub doc_id: String,

    /// Extracted text
    pub text: String,
}

/// Registry mapping file extensions to loaders.
pub struct LoaderRegistry {
    loaders: HashMap<String, Arc<dyn TextSource>>,
    by_name: HashMap<String, Arc<dyn TextSource>>,
}

impl LoaderRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
            by_name: HashMap::new(),
        }
    }

    /// Create a registry with the bundled loaders (plain text).
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PlainTextLoader::new()));
        registry
    }

    /// Register a loader for all its supported extensions.
    pub fn register(&mut self, loader: Arc<dyn TextSource>) {
        for ext in loader.supported_extensions() {
            self.loaders.insert(ext.to_lowercase(), loader.clone());
        }
        self.by_name.insert(loader.name().to_lowercase(), loader);
    }

    /// Get a loader by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn TextSource>> {
        self.loaders.get(&ext.to_lowercase()).cloned()
    }

    /// Get a loader by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn TextSource>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.loaders.contains_key(&ext.to_lowercase())
    }

    /// All supported extensions, sorted.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.loaders.keys().map(String::as_str).collect();
        exts.sort_unstable();
        exts
    }

    /// Load a file with the loader registered for its extension.
    ///
    /// The document id is the file stem.
    pub fn load(&self, path: &Path) -> Result<LoadedText> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| Error::UnsupportedFormat("file has no extension".into()))?;

        let loader = self
            .get_by_extension(ext)
            .ok_or_else(|| self.unsupported(ext))?;

        log::debug!("Loading {} with {} loader", path.display(), loader.name());
        let text = loader.load(path)?;

        let doc_id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "doc".to_string());

        Ok(LoadedText { doc_id, text })
    }

    fn unsupported(&self, ext: &str) -> Error {
        match SourceFormat::from_extension(ext) {
            Some(format) => {
                Error::UnsupportedFormat(format!("no loader registered for {} files", format))
            }
            None => Error::UnsupportedFormat(format!(
                ".{} (supported: {})",
                ext,
                self.supported_extensions().join(", ")
            )),
        }
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = LoaderRegistry::with_defaults();
        assert!(registry.supports("txt"));
        assert!(registry.supports("TXT"));
        assert!(!registry.supports("pdf"));
        assert_eq!(registry.supported_extensions(), vec!["txt"]);
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = LoaderRegistry::with_defaults();
        assert!(registry.get_by_name("Text").is_some());
        assert!(registry.get_by_name("pdf").is_none());
    }

    #[test]
    fn test_unsupported_messages() {
        let registry = LoaderRegistry::with_defaults();

        let err = registry.load(Path::new("spec.pdf")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported document format: no loader registered for PDF files"
        );

        let err = registry.load(Path::new("spec.xlsx")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unsupported document format: .xlsx (supported: txt)"
        );

        let err = registry.load(Path::new("spec")).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }
}
