//! Segment-level types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Classification label assigned to a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Label {
    /// Requirement statement
    #[serde(rename = "REQ")]
    Req,
    /// Definition / glossary entry
    #[serde(rename = "DEF")]
    Def,
    /// Constraint statement
    #[serde(rename = "CON")]
    Con,
    /// Non-actionable information
    #[serde(rename = "INFO")]
    Info,
}

impl Label {
    /// Short uppercase tag used in documents and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Req => "REQ",
            Label::Def => "DEF",
            Label::Con => "CON",
            Label::Info => "INFO",
        }
    }

    /// Whether segments with this label take part in extraction.
    pub fn is_relevant(&self) -> bool {
        !matches!(self, Label::Info)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position-based segment identifier, rendered as `S<n>` (1-based).
///
/// Ordering is numeric, so `S2` sorts before `S10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(u32);

impl SegmentId {
    /// Create an id from a 1-based position.
    pub fn new(position: u32) -> Self {
        Self(position)
    }

    /// The 1-based position of the segment in its document.
    pub fn position(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// Error returned when a string is not of the form `S<n>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSegmentIdError(String);

impl fmt::Display for ParseSegmentIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid segment id: {:?}", self.0)
    }
}

impl std::error::Error for ParseSegmentIdError {}

impl FromStr for SegmentId {
    type Err = ParseSegmentIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.strip_prefix('S')
            .and_then(|n| n.parse::<u32>().ok())
            .filter(|n| *n > 0)
            .map(SegmentId)
            .ok_or_else(|| ParseSegmentIdError(s.to_string()))
    }
}

impl Serialize for SegmentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SegmentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Where a segment came from inside the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentSource {
    /// Page number (0 when unknown)
    pub page: u32,

    /// Section title (empty when unknown)
    pub section: String,
}

/// One trimmed, non-blank line of input annotated with a label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Stable identifier within one run
    #[serde(rename = "segment_id")]
    pub id: SegmentId,

    /// Classification label
    pub label: Label,

    /// Trimmed line text
    pub text: String,

    /// Source location
    pub source: SegmentSource,
}

impl Segment {
    /// Create a segment with an unknown source location.
    pub fn new(id: SegmentId, label: Label, text: impl Into<String>) -> Self {
        Self {
            id,
            label,
            text: text.into(),
            source: SegmentSource::default(),
        }
    }

    /// Whether the segment takes part in extraction.
    pub fn is_relevant(&self) -> bool {
        self.label.is_relevant()
    }
}
