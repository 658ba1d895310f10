//! Extraction options and configuration.

use chrono::{DateTime, Utc};

/// Model format version written to metadata by default.
pub const DEFAULT_MODEL_VERSION: &str = "0.1";

/// Options for building a domain model.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// How relations between the same classes are reduced
    pub relation_dedup: RelationDedup,

    /// Version string written to metadata
    pub version: String,

    /// Fixed creation timestamp (current time when `None`)
    pub created_at: Option<DateTime<Utc>>,

    /// Whether batch analysis may process documents in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create new extract options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the relation dedup policy.
    pub fn with_relation_dedup(mut self, dedup: RelationDedup) -> Self {
        self.relation_dedup = dedup;
        self
    }

    /// Keep every distinct `(source, target, verb)` relation.
    pub fn keep_all_relations(mut self) -> Self {
        self.relation_dedup = RelationDedup::Triple;
        self
    }

    /// Set the metadata version string.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Use a fixed creation timestamp, making output reproducible.
    pub fn with_timestamp(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            relation_dedup: RelationDedup::default(),
            version: DEFAULT_MODEL_VERSION.to_string(),
            created_at: None,
            parallel: true,
        }
    }
}

/// Document-wide reduction applied to extracted relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RelationDedup {
    /// At most one relation per unordered class pair; the first one found wins
    #[default]
    UnorderedPair,
    /// One relation per distinct `(source, target, verb)`; repeated findings
    /// add their segment ids
    Triple,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_extract_options_builder() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let options = ExtractOptions::new()
            .keep_all_relations()
            .with_version("0.2")
            .with_timestamp(ts)
            .sequential();

        assert_eq!(options.relation_dedup, RelationDedup::Triple);
        assert_eq!(options.version, "0.2");
        assert_eq!(options.created_at, Some(ts));
        assert!(!options.parallel);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.relation_dedup, RelationDedup::UnorderedPair);
        assert_eq!(options.version, "0.1");
        assert!(options.created_at.is_none());
        assert!(options.parallel);
    }
}
