//! Classes, attributes, relations and the assembled domain model.

use super::{Segment, SegmentId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive type inferred for an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "decimal")]
    Decimal,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "Date")]
    Date,
    #[serde(rename = "String")]
    String,
}

impl AttributeType {
    /// UML-style type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::Int => "int",
            AttributeType::Decimal => "decimal",
            AttributeType::Boolean => "boolean",
            AttributeType::Date => "Date",
            AttributeType::String => "String",
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An attribute owned by exactly one class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    /// Attribute name as written in the source text
    pub name: String,

    /// Inferred primitive type
    #[serde(rename = "type")]
    pub attr_type: AttributeType,

    /// Segments the attribute was found in
    pub source_segments: Vec<SegmentId>,
}

impl Attribute {
    /// Create an attribute found in a single segment.
    pub fn new(name: impl Into<String>, attr_type: AttributeType, segment: SegmentId) -> Self {
        Self {
            name: name.into(),
            attr_type,
            source_segments: vec![segment],
        }
    }
}

/// Multiplicity pair of a relation, in UML notation (`"1"`, `"0..*"`, `"1..*"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cardinality {
    pub source: String,
    pub target: String,
}

impl Cardinality {
    /// Create a cardinality pair.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// `1 -> 1`
    pub fn exactly_one() -> Self {
        Self::new("1", "1")
    }

    /// `1 -> 1..*`
    pub fn one_or_more() -> Self {
        Self::new("1", "1..*")
    }

    /// `1 -> 0..*`
    pub fn zero_or_more() -> Self {
        Self::new("1", "0..*")
    }
}

impl Default for Cardinality {
    fn default() -> Self {
        Self::zero_or_more()
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Kind of a relation. Only associations are inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationType {
    #[default]
    Association,
}

/// A verb-mediated association between two distinct classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Source class name
    pub source: String,

    /// Target class name
    pub target: String,

    /// Verb that links the two classes
    pub label: String,

    /// Relation kind
    #[serde(rename = "type")]
    pub relation_type: RelationType,

    /// Inferred multiplicities
    pub cardinality: Cardinality,

    /// Segments the relation was found in
    pub source_segments: Vec<SegmentId>,
}

impl Relation {
    /// Create an association found in a single segment.
    pub fn association(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
        cardinality: Cardinality,
        segment: SegmentId,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
            relation_type: RelationType::Association,
            cardinality,
            source_segments: vec![segment],
        }
    }

    /// Whether this relation connects `a` and `b` in either direction.
    pub fn connects(&self, a: &str, b: &str) -> bool {
        (self.source == a && self.target == b) || (self.source == b && self.target == a)
    }
}

/// A class of the extracted domain model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainClass {
    /// Normalized class name
    pub name: String,

    /// Attributes in discovery order
    pub attributes: Vec<Attribute>,

    /// Segments that produced the class, ascending
    pub source_segments: Vec<SegmentId>,
}

impl DomainClass {
    /// Look up an attribute by name, ignoring case.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Identifier of the source document
    pub doc_id: String,

    /// Creation timestamp (UTC)
    pub created_at: DateTime<Utc>,

    /// Model format version
    pub version: String,
}

impl Metadata {
    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let lines = [
            "---".to_string(),
            format!("doc_id: \"{}\"", escape_yaml(&self.doc_id)),
            format!("created_at: {}", self.created_at.to_rfc3339()),
            format!("version: \"{}\"", escape_yaml(&self.version)),
            "---".to_string(),
            String::new(),
        ];
        lines.join("\n")
    }
}

fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// Quality metrics of one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quality {
    /// Total number of segments
    pub num_segments: usize,

    /// Number of REQ/DEF/CON segments
    pub kept_segments: usize,

    /// `kept_segments / num_segments`, rounded to 4 decimals (0.0 when empty)
    pub filter_ratio: f64,

    /// Number of classes in the model
    pub num_classes: usize,

    /// Number of relations in the model
    pub num_relations: usize,
}

/// The assembled, immutable result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainModel {
    pub metadata: Metadata,

    /// All segments in input order, INFO included
    pub segments: Vec<Segment>,

    /// Classes sorted by name
    pub classes: Vec<DomainClass>,

    pub relations: Vec<Relation>,

    pub quality: Quality,
}

impl DomainModel {
    /// Look up a class by exact name.
    pub fn class(&self, name: &str) -> Option<&DomainClass> {
        self.classes
            .binary_search_by(|c| c.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.classes[idx])
    }

    /// Names of all classes, in model order.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.name.as_str())
    }

    /// Relations connecting `a` and `b` in either direction.
    pub fn relations_between<'a>(
        &'a self,
        a: &'a str,
        b: &'a str,
    ) -> impl Iterator<Item = &'a Relation> + 'a {
        self.relations.iter().filter(move |r| r.connects(a, b))
    }

    /// Whether no classes and no relations were found.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.relations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_attribute_type_serialization() {
        let json = serde_json::to_string(&[
            AttributeType::Int,
            AttributeType::Decimal,
            AttributeType::Boolean,
            AttributeType::Date,
            AttributeType::String,
        ])
        .unwrap();
        assert_eq!(json, r#"["int","decimal","boolean","Date","String"]"#);
    }

    #[test]
    fn test_relation_serialization() {
        let rel = Relation::association(
            "Order",
            "Address",
            "delivered",
            Cardinality::exactly_one(),
            SegmentId::new(2),
        );
        let value = serde_json::to_value(&rel).unwrap();
        assert_eq!(value["type"], "association");
        assert_eq!(value["cardinality"]["source"], "1");
        assert_eq!(value["cardinality"]["target"], "1");
        assert_eq!(value["source_segments"][0], "S2");
    }

    #[test]
    fn test_relation_connects_either_direction() {
        let rel = Relation::association(
            "Customer",
            "Order",
            "places",
            Cardinality::default(),
            SegmentId::new(1),
        );
        assert!(rel.connects("Customer", "Order"));
        assert!(rel.connects("Order", "Customer"));
        assert!(!rel.connects("Order", "Address"));
    }

    #[test]
    fn test_metadata_frontmatter() {
        let metadata = Metadata {
            doc_id: "shop".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            version: "0.1".to_string(),
        };
        let yaml = metadata.to_yaml_frontmatter();
        assert!(yaml.starts_with("---\n"));
        assert!(yaml.contains("doc_id: \"shop\""));
        assert!(yaml.contains("created_at: 2024-05-01T12:00:00+00:00"));
        assert!(yaml.contains("version: \"0.1\""));
    }

    #[test]
    fn test_class_attribute_lookup_ignores_case() {
        let class = DomainClass {
            name: "Customer".to_string(),
            attributes: vec![Attribute::new(
                "customerId",
                AttributeType::Int,
                SegmentId::new(1),
            )],
            source_segments: vec![SegmentId::new(1)],
        };
        assert!(class.attribute("CUSTOMERID").is_some());
        assert!(class.attribute("email").is_none());
    }
}
