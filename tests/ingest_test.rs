//! Integration tests for document ingestion.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use reqmodel::error::Result;
use reqmodel::ingest::{detect_format_from_path, LoaderRegistry, PlainTextLoader, TextSource};
use reqmodel::{analyze_file, Analyzer, Error, SourceFormat};

/// Mock loader for testing.
struct MockLoader {
    extensions: Vec<&'static str>,
    name: &'static str,
}

impl MockLoader {
    fn new(extensions: Vec<&'static str>, name: &'static str) -> Self {
        Self { extensions, name }
    }
}

impl TextSource for MockLoader {
    fn supported_extensions(&self) -> &[&str] {
        &self.extensions
    }

    fn name(&self) -> &str {
        self.name
    }

    fn load_bytes(&self, _bytes: &[u8]) -> Result<String> {
        Ok("DEF A Ticket has ticketId and openedDate.".to_string())
    }
}

#[test]
fn test_registry_new() {
    let registry = LoaderRegistry::new();

    // Empty registry should support nothing
    assert!(!registry.supports("txt"));
    assert!(registry.supported_extensions().is_empty());
}

#[test]
fn test_registry_with_defaults() {
    let registry = LoaderRegistry::with_defaults();

    assert!(registry.supports("txt"));
    assert!(registry.supports("TXT")); // Case insensitive
    assert!(!registry.supports("pdf"));
    assert!(!registry.supports("docx"));
}

#[test]
fn test_registry_multiple_loaders() {
    let mut registry = LoaderRegistry::new();

    registry.register(Arc::new(PlainTextLoader::new()));
    registry.register(Arc::new(MockLoader::new(vec!["doc", "docx"], "word")));

    assert_eq!(registry.supported_extensions(), vec!["doc", "docx", "txt"]);
    assert_eq!(registry.get_by_extension("DOCX").unwrap().name(), "word");
    assert!(registry.get_by_name("Text").is_some());
}

#[test]
fn test_load_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.txt");
    fs::write(&path, "\u{feff}DEF A Book has isbn and title.\nREQ-1 Each member must reference a book.\n").unwrap();

    let loaded = LoaderRegistry::with_defaults().load(&path).unwrap();
    assert_eq!(loaded.doc_id, "library");
    assert!(loaded.text.starts_with("DEF A Book"));

    let model = analyze_file(&path).unwrap();
    assert_eq!(model.metadata.doc_id, "library");
    assert_eq!(model.segments.len(), 2);
    assert!(model.class("Book").is_some());
}

#[test]
fn test_load_latin1_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.txt");
    fs::write(&path, b"DEF A Caf\xe9 has menuName.\n").unwrap();

    let loaded = LoaderRegistry::with_defaults().load(&path).unwrap();
    assert_eq!(loaded.text, "DEF A Caf\u{e9} has menuName.\n");
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = analyze_file(dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_unsupported_formats() {
    let err = analyze_file("requirements.pdf").unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));

    let err = analyze_file("requirements.xlsx").unwrap_err();
    match err {
        Error::UnsupportedFormat(msg) => assert!(msg.contains("txt")),
        other => panic!("unexpected error: {:?}", other),
    }

    let err = analyze_file(Path::new("README")).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn test_binary_content_in_text_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disguised.txt");
    fs::write(&path, b"%PDF-1.7\n...").unwrap();

    let err = analyze_file(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
}

#[test]
fn test_analyzer_with_custom_loader() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tickets.docx");
    fs::write(&path, b"PK\x03\x04").unwrap();

    assert_eq!(detect_format_from_path(&path), Some(SourceFormat::Docx));

    let analyzer = Analyzer::new().with_loader(Arc::new(MockLoader::new(vec!["docx"], "word")));
    let model = analyzer.analyze_file(&path).unwrap();

    assert_eq!(model.metadata.doc_id, "tickets");
    let ticket = model.class("Ticket").unwrap();
    assert_eq!(ticket.attributes.len(), 2);
}
