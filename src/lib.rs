//! # reqmodel
//!
//! Requirements-to-domain-model extraction for Rust.
//!
//! This library reads natural-language software requirements and derives a
//! UML-style domain model from them: classes, typed attributes and
//! associations with cardinalities, each traced back to the sentences that
//! produced it.
//!
//! ## Quick Start
//!
//! ```
//! use reqmodel::{analyze, render};
//!
//! let text = "DEF A Customer has customerId and email.\n\
//!             REQ-1 Each customer must place an order.";
//! let model = analyze("shop", text);
//!
//! assert!(model.class("Customer").is_some());
//! let json = render::to_json(&model, render::JsonFormat::Pretty).unwrap();
//! println!("{}", json);
//! ```
//!
//! ## Pipeline
//!
//! - **Segmentation**: one candidate sentence per non-empty line
//! - **Classification**: REQ / DEF / CON / INFO labels from surface patterns
//! - **Filtering**: INFO segments are dropped, with a kept ratio for quality
//! - **Extraction**: classes, attributes and verb-mediated relations
//! - **Assembly**: a deterministic, traceable [`DomainModel`]
//!
//! Extraction is deterministic apart from the `created_at` timestamp, which
//! can be pinned with [`ExtractOptions::with_timestamp`].

pub mod error;
pub mod ingest;
pub mod model;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use ingest::{LoadedText, LoaderRegistry, PlainTextLoader, SourceFormat, TextSource};
pub use model::{
    Attribute, AttributeType, Cardinality, DomainClass, DomainModel, Label, Metadata, Quality,
    Relation, RelationType, Segment, SegmentId, SegmentSource,
};
pub use pipeline::{
    build_domain_model, build_domain_model_with_options, segment, ExtractOptions, RelationDedup,
};
pub use render::{JsonFormat, ReportOptions};

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Segment and analyze raw requirements text.
///
/// # Example
///
/// ```
/// use reqmodel::analyze;
///
/// let model = analyze("doc", "DEF An Order has orderId and orderDate.");
/// assert_eq!(model.classes.len(), 1);
/// ```
pub fn analyze(doc_id: impl Into<String>, text: &str) -> DomainModel {
    build_domain_model(doc_id, segment(text))
}

/// Segment and analyze raw requirements text with custom options.
///
/// # Example
///
/// ```
/// use reqmodel::{analyze_with_options, ExtractOptions};
///
/// let options = ExtractOptions::new().keep_all_relations().with_version("0.2");
/// let model = analyze_with_options("doc", "REQ-1 Each customer must place an order.", &options);
/// assert_eq!(model.metadata.version, "0.2");
/// ```
pub fn analyze_with_options(
    doc_id: impl Into<String>,
    text: &str,
    options: &ExtractOptions,
) -> DomainModel {
    build_domain_model_with_options(doc_id, segment(text), options)
}

/// Load a requirements file and analyze it.
///
/// The document id is the file stem.
///
/// # Example
///
/// ```no_run
/// use reqmodel::analyze_file;
///
/// let model = analyze_file("requirements.txt").unwrap();
/// println!("{} classes", model.classes.len());
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<DomainModel> {
    Analyzer::new().analyze_file(path)
}

/// Builder for analyzing requirements documents.
///
/// # Example
///
/// ```no_run
/// use reqmodel::Analyzer;
///
/// let model = Analyzer::new()
///     .keep_all_relations()
///     .with_version("0.2")
///     .analyze_file("requirements.txt")?;
/// # Ok::<(), reqmodel::Error>(())
/// ```
pub struct Analyzer {
    options: ExtractOptions,
    registry: LoaderRegistry,
}

impl Analyzer {
    /// Create a new analyzer with the bundled loaders.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
            registry: LoaderRegistry::with_defaults(),
        }
    }

    /// Replace the extraction options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Keep every distinct `(source, target, verb)` relation.
    pub fn keep_all_relations(mut self) -> Self {
        self.options = self.options.keep_all_relations();
        self
    }

    /// Set the metadata version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.options = self.options.with_version(version);
        self
    }

    /// Use a fixed creation timestamp.
    pub fn with_timestamp(mut self, created_at: DateTime<Utc>) -> Self {
        self.options = self.options.with_timestamp(created_at);
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Register an additional document loader.
    pub fn with_loader(mut self, loader: Arc<dyn TextSource>) -> Self {
        self.registry.register(loader);
        self
    }

    /// The extraction options in use.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// The loader registry in use.
    pub fn registry(&self) -> &LoaderRegistry {
        &self.registry
    }

    /// Analyze raw requirements text.
    pub fn analyze_text(&self, doc_id: impl Into<String>, text: &str) -> DomainModel {
        analyze_with_options(doc_id, text, &self.options)
    }

    /// Load a file through the registry and analyze it.
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<DomainModel> {
        let loaded = self.registry.load(path.as_ref())?;
        Ok(self.analyze_text(loaded.doc_id, &loaded.text))
    }

    /// Analyze several `(doc_id, text)` documents.
    ///
    /// Output order follows input order whether or not the batch runs in parallel.
    pub fn analyze_batch<D, T>(&self, inputs: &[(D, T)]) -> Vec<DomainModel>
    where
        D: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        log::debug!(
            "Analyzing batch of {} documents ({})",
            inputs.len(),
            if self.options.parallel { "parallel" } else { "sequential" }
        );

        let run = |(doc_id, text): &(D, T)| self.analyze_text(doc_id.as_ref(), text.as_ref());

        if self.options.parallel && inputs.len() > 1 {
            inputs.par_iter().map(run).collect()
        } else {
            inputs.iter().map(run).collect()
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}
