//! Candidate class discovery and the class acceptance gate.

use crate::model::{Label, Segment, SegmentId};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use super::lexicon::{self, ATTRIBUTE_KEYWORDS, ATTRIBUTE_SUFFIXES, NON_CLASS_NOUNS};

/// Class name -> ids of the segments that produced it.
pub type ClassMap = BTreeMap<String, BTreeSet<SegmentId>>;

/// `DEF A Customer ...`; the class word is case-sensitive.
static DEF_CLASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"DEF\s+(?:A|An|The)\s+([A-Z][a-zA-Z]+)").unwrap());

/// Lowercase noun (optionally one camelCase hump) after a determiner.
static ENTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:a|an|the|each|every)\s+([a-z][a-z]+(?:[A-Z][a-z]+)?)\b").unwrap()
});

static CAMEL_CASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+[A-Z]").unwrap());
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static REQ_ID_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:req|fr|nfr|us)\s*[-:]?\s*\d+$").unwrap());
static DASHED_ID_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+-\d+$").unwrap());
static LOWER_CAMEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+[A-Z][a-zA-Z]*$").unwrap());

/// Normalize a candidate class token.
///
/// `OrderItem`-shaped tokens are kept as is; anything else gets an uppercase
/// first letter and lowercase rest (`orderItem` becomes `Orderitem`).
pub fn normalize_class_name(token: &str) -> String {
    if CAMEL_CASE_RE.is_match(token) {
        return token.to_string();
    }

    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Whether a token looks like a property name rather than an entity.
pub fn is_likely_attribute(token: &str) -> bool {
    let low = token.to_lowercase();

    ATTRIBUTE_KEYWORDS.contains(&low.as_str())
        || ATTRIBUTE_SUFFIXES.iter().any(|suffix| low.ends_with(suffix))
        || LOWER_CAMEL_RE.is_match(token)
}

/// Acceptance gate every class candidate must pass.
pub fn is_valid_concept(token: &str) -> bool {
    if token == "Address" {
        return true;
    }

    if token.chars().count() < 3 {
        return false;
    }

    let low = token.to_lowercase();
    if lexicon::is_stopword(&low) {
        return false;
    }

    if DIGITS_RE.is_match(token) || REQ_ID_TOKEN_RE.is_match(&low) || DASHED_ID_RE.is_match(&low) {
        return false;
    }

    if NON_CLASS_NOUNS.contains(&low.as_str()) {
        return false;
    }

    !is_likely_attribute(token)
}

/// Discover candidate classes in the kept segments.
///
/// DEF segments contribute the capitalized word after `DEF A|An|The`;
/// REQ and CON segments contribute lowercase nouns after a determiner.
pub fn extract_candidate_classes<'a, I>(segments: I) -> ClassMap
where
    I: IntoIterator<Item = &'a Segment>,
{
    let mut classes = ClassMap::new();

    for seg in segments {
        match seg.label {
            Label::Info => continue,
            Label::Def => {
                if let Some(caps) = DEF_CLASS_RE.captures(&seg.text) {
                    let name = normalize_class_name(&caps[1]);
                    if is_valid_concept(&name) {
                        log::trace!("{}: class {} (definition)", seg.id, name);
                        classes.entry(name).or_default().insert(seg.id);
                    }
                }
            }
            Label::Req | Label::Con => {
                for caps in ENTITY_RE.captures_iter(&seg.text) {
                    let entity = &caps[1];
                    let name = normalize_class_name(entity);
                    if is_valid_concept(&name) && entity.chars().count() > 3 {
                        log::trace!("{}: class {} (from {:?})", seg.id, name, entity);
                        classes.entry(name).or_default().insert(seg.id);
                    }
                }
            }
        }
    }

    log::debug!("Extracted {} candidate classes", classes.len());
    classes
}
