//! Attribute discovery in definition segments and primitive type inference.

use crate::model::{Attribute, AttributeType, Label, Segment, SegmentId};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use super::classes::{is_valid_concept, normalize_class_name};
use super::lexicon::{self, NON_ATTRIBUTE_WORDS};

/// Class name -> attributes in discovery order.
pub type AttributeMap = BTreeMap<String, Vec<Attribute>>;

static DEF_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^\s*DEF\s+").unwrap());

/// `A Customer ... has|with|contains|includes <list>` up to the first period.
static ATTR_LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:A|An|The)\s+([A-Z][a-zA-Z]+)\s+.*?\b(?:with|has|contains?|includes?)\s+(?:a|an)?\s*(.*?)(?:\.|$)",
    )
    .unwrap()
});

/// Looser form: the verb may be glued to a preceding word and the list is
/// restricted to word characters, commas and whitespace.
static ATTR_LIST_LOOSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:A|An|The)\s+([A-Z][a-zA-Z]+)\s+.*?(?:with|has|includes?|contains?)\s+([\w,\s]+)")
        .unwrap()
});

static LIST_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r",|\band\b").unwrap());
static LEADING_FILLER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:a|an|the|with|for|of)\s+").unwrap());
static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-z][a-zA-Z0-9_]*)\b").unwrap());

/// Extract attributes per class from DEF segments.
pub fn extract_attributes<'a, I>(segments: I) -> AttributeMap
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut attrs = AttributeMap::new();

    for seg in segments {
        if seg.label != Label::Def {
            continue;
        }

        let text = DEF_PREFIX_RE.replace(seg.text.trim(), "");

        if let Some(caps) = ATTR_LIST_RE.captures(&text) {
            let class_name = normalize_class_name(&caps[1]);
            if is_valid_concept(&class_name) {
                let list = caps.get(2).map_or("", |m| m.as_str());
                let owned = attrs.entry(class_name).or_default();
                collect_attribute_names(list, seg.id, owned);
                continue;
            }
        }

        if let Some(caps) = ATTR_LIST_LOOSE_RE.captures(&text) {
            let class_name = normalize_class_name(&caps[1]);
            if is_valid_concept(&class_name) {
                let list = caps[2].split('.').next().unwrap_or_default();
                let owned = attrs.entry(class_name).or_default();
                collect_attribute_names(list, seg.id, owned);
            }
        }
    }

    log::debug!(
        "Extracted {} attributes across {} classes",
        attrs.values().map(Vec::len).sum::<usize>(),
        attrs.len()
    );
    attrs
}

/// Split an attribute list on commas and "and", appending new names to `owned`.
///
/// Names are unique per class ignoring case; the first spelling wins.
fn collect_attribute_names(list: &str, segment: SegmentId, owned: &mut Vec<Attribute>) {
    for part in LIST_SPLIT_RE.split(list) {
        let part = LEADING_FILLER_RE.replace(part.trim(), "");

        let Some(caps) = IDENTIFIER_RE.captures(&part) else {
            continue;
        };
        let name = &caps[1];
        let low = name.to_lowercase();

        if lexicon::is_stopword(&low) || NON_ATTRIBUTE_WORDS.contains(&low.as_str()) {
            continue;
        }
        if name.chars().count() < 3 {
            continue;
        }
        if owned.iter().any(|a| a.name.to_lowercase() == low) {
            continue;
        }

        let attr_type = infer_attribute_type(name);
        log::trace!("{}: attribute {}: {}", segment, name, attr_type);
        owned.push(Attribute::new(name, attr_type, segment));
    }
}

/// Infer a primitive type from an attribute name. First matching rule wins.
pub fn infer_attribute_type(name: &str) -> AttributeType {
    let low = name.to_lowercase();

    if low.ends_with("id") {
        AttributeType::Int
    } else if contains_any(&low, &["date", "time", "timestamp"]) {
        AttributeType::Date
    } else if contains_any(&low, &["amount", "price", "cost", "total", "subtotal"]) {
        AttributeType::Decimal
    } else if contains_count_keyword(&low) {
        AttributeType::Int
    } else if contains_any(&low, &["is", "has", "enabled", "active"]) {
        AttributeType::Boolean
    } else {
        // email, password, address/street/city, phone and everything else
        AttributeType::String
    }
}

fn contains_any(haystack: &str, keys: &[&str]) -> bool {
    keys.iter().any(|k| haystack.contains(k))
}

/// `quantity|count|number|rating` as a substring, except `count` followed by `ry`.
///
/// `country` stays textual while `counter` and `itemCount` are numeric.
fn contains_count_keyword(low: &str) -> bool {
    const COUNT: &str = "count";

    contains_any(low, &["quantity", "number", "rating"])
        || low
            .match_indices(COUNT)
            .any(|(start, _)| !low[start + COUNT.len()..].starts_with("ry"))
}
