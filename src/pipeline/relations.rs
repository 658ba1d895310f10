//! Verb-mediated association discovery between known classes.
//!
//! Each kept segment is lowercased, stripped of its requirement-id prefix and
//! run through four independent matchers:
//!
//! 1. modal: `each <source> must|shall <verb> ... <target>`
//! 2. bridge: `<source> (≤8 words) <verb> (≤6 words) <target>` for every
//!    ordered pair of class variants and every relation verb
//! 3. ability: `a <source> shall be able to <verb> ...`
//! 4. passive obligation: `each <source> must be <verb> to ...`
//!
//! Findings are deduplicated per segment by `(source, target, verb)` and then
//! reduced across the document according to [`RelationDedup`].
//!
//! The bridge matcher costs O(variants² × verbs) per segment, which is fine for
//! tens of classes.

use crate::model::{Cardinality, Relation, Segment, SegmentId};
use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::sync::LazyLock;

use super::lexicon::RELATION_VERBS;
use super::options::RelationDedup;

static LABEL_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:req|fr|nfr|us|def)\s*[-:]?\s*\d+\s+").unwrap()
});

static CAMEL_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").unwrap());

static MODAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:each|every|a|an|the)\s+([\w\s]+?)\s+(?:must|shall)\s+(\w+)\s+.*?\b([\w\s]+?)(?:\s+(?:and|or|to|for|with)|\.|,|$)",
    )
    .unwrap()
});

static LEADING_QUANTIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:a|an|the|one|more|exactly|zero|multiple)\s+").unwrap()
});

static ABILITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:a|an|the)\s+(\w+)\s+shall be able to\s+(\w+)").unwrap());

static PASSIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:each|every|a|an|the)\s+(\w+)\s+must be\s+(\w+)\s+to").unwrap()
});

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Words allowed between the source and the verb in the bridge matcher.
const MAX_WORDS_BEFORE_VERB: usize = 8;
/// Words allowed between the verb and the target in the bridge matcher.
const MAX_WORDS_AFTER_VERB: usize = 6;

/// Lookup from textual variants to canonical class names.
///
/// For every class, in name order, registers the exact name, its lowercase
/// form, a spaced lowercase form (`OrderItem` -> `order item`) and simple
/// plurals. Iteration follows registration order; a later class that
/// produces an existing key takes it over without moving it.
#[derive(Debug, Clone, Default)]
pub struct ClassVariants {
    variants: IndexMap<String, String>,
}

impl ClassVariants {
    /// Build the lookup for a set of class names.
    pub fn new<N, S>(class_names: N) -> Self
    where
        N: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = class_names
            .into_iter()
            .map(|n| n.as_ref().to_string())
            .collect();

        let mut variants = IndexMap::new();
        for name in names {
            let lower = name.to_lowercase();
            let spaced = CAMEL_BOUNDARY_RE.replace_all(&name, "$1 $2").to_lowercase();

            let forms = [
                name.clone(),
                lower.clone(),
                spaced.clone(),
                format!("{lower}s"),
                format!("{spaced}s"),
                format!("{lower}es"),
            ];
            for form in forms {
                variants.insert(form, name.clone());
            }
        }

        Self { variants }
    }

    /// Resolve a phrase to its canonical class name.
    pub fn resolve(&self, phrase: &str) -> Option<&str> {
        self.variants.get(phrase).map(String::as_str)
    }

    /// `(variant, class name)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.variants.iter().map(|(v, n)| (v.as_str(), n.as_str()))
    }

    /// Number of registered variants.
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    /// Whether no class is known.
    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// First class (in variant order) other than `exclude` whose variant
    /// occurs anywhere in `text`, word boundaries not required.
    fn first_other_in(&self, text: &str, exclude: &str) -> Option<&str> {
        self.iter()
            .find(|(variant, name)| *name != exclude && text.contains(variant))
            .map(|(_, name)| name)
    }
}

/// One `(source, target, verb)` finding with its cardinality.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Finding<'v> {
    source: &'v str,
    target: &'v str,
    verb: String,
    cardinality: Cardinality,
}

/// Infer a cardinality pair from a phrase. First matching rule wins.
pub fn infer_cardinality(text: &str) -> Cardinality {
    let low = text.to_lowercase();

    if low.contains("exactly one") {
        Cardinality::exactly_one()
    } else if low.contains("one or more") {
        Cardinality::one_or_more()
    } else {
        // "zero or more", "multiple", "many" and the default all read as 0..*
        Cardinality::zero_or_more()
    }
}

/// Lowercase a segment and strip its requirement-id prefix.
fn clean_segment_text(text: &str) -> String {
    let lower = text.to_lowercase();
    LABEL_PREFIX_RE.replace(&lower, "").into_owned()
}

/// Extract associations between the given classes from the kept segments.
pub fn extract_relations<'a, I, N, S>(
    segments: I,
    class_names: N,
    dedup: RelationDedup,
) -> Vec<Relation>
where
    I: IntoIterator<Item = &'a Segment>,
    N: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let variants = ClassVariants::new(class_names);
    let mut relations = Vec::new();

    for seg in segments {
        if !seg.is_relevant() {
            continue;
        }

        let text = clean_segment_text(&seg.text);
        let mut seen: HashSet<(&str, &str, String)> = HashSet::new();

        let findings = modal_findings(&text, &variants)
            .into_iter()
            .chain(bridge_findings(&text, &variants))
            .chain(ability_findings(&text, &variants))
            .chain(passive_findings(&text, &variants));

        for finding in findings {
            let key = (finding.source, finding.target, finding.verb.clone());
            if !seen.insert(key) {
                continue;
            }

            log::trace!(
                "{}: {} --{}--> {} ({})",
                seg.id,
                finding.source,
                finding.verb,
                finding.target,
                finding.cardinality
            );
            relations.push(Relation::association(
                finding.source,
                finding.target,
                finding.verb,
                finding.cardinality,
                seg.id,
            ));
        }
    }

    let found = relations.len();
    let relations = dedup_relations(relations, dedup);
    log::debug!(
        "Extracted {} relations ({} before {:?} dedup)",
        relations.len(),
        found,
        dedup
    );
    relations
}

/// Strategy 1: `(each|every|a|an|the) <source> must|shall <verb> ... <target>`.
fn modal_findings<'v>(text: &str, variants: &'v ClassVariants) -> Vec<Finding<'v>> {
    let mut findings = Vec::new();

    for caps in MODAL_RE.captures_iter(text) {
        let source_raw = caps[1].trim();
        let verb = &caps[2];
        let target_raw = LEADING_QUANTIFIER_RE.replace(caps[3].trim(), "");

        let (Some(source), Some(target)) =
            (variants.resolve(source_raw), variants.resolve(target_raw.trim()))
        else {
            continue;
        };

        if source != target {
            findings.push(Finding {
                source,
                target,
                verb: verb.to_string(),
                cardinality: infer_cardinality(&caps[0]),
            });
        }
    }

    findings
}

/// Strategy 2: bounded word window `<source> ... <verb> ... <target>`.
///
/// For each ordered pair of variants of distinct classes the first verb that
/// bridges them wins.
fn bridge_findings<'v>(text: &str, variants: &'v ClassVariants) -> Vec<Finding<'v>> {
    let words = WordTokens::new(text);
    let occurrences: Vec<Vec<(usize, usize)>> =
        variants.iter().map(|(v, _)| words.occurrences(v)).collect();
    let verb_positions: Vec<Vec<usize>> = RELATION_VERBS
        .iter()
        .map(|verb| words.positions(verb))
        .collect();

    let mut findings = Vec::new();
    let mut cardinality = None;

    for (si, (_, source)) in variants.iter().enumerate() {
        if occurrences[si].is_empty() {
            continue;
        }

        for (ti, (_, target)) in variants.iter().enumerate() {
            if source == target || occurrences[ti].is_empty() {
                continue;
            }

            let bridging_verb = RELATION_VERBS
                .iter()
                .zip(&verb_positions)
                .find(|(_, positions)| {
                    is_bridged(&occurrences[si], positions, &occurrences[ti])
                })
                .map(|(verb, _)| *verb);

            if let Some(verb) = bridging_verb {
                let cardinality = cardinality
                    .get_or_insert_with(|| infer_cardinality(text))
                    .clone();
                findings.push(Finding {
                    source,
                    target,
                    verb: verb.to_string(),
                    cardinality,
                });
            }
        }
    }

    findings
}

/// Whether some source occurrence is followed by a verb within
/// [`MAX_WORDS_BEFORE_VERB`] words, which is followed by a target occurrence
/// within [`MAX_WORDS_AFTER_VERB`] words.
fn is_bridged(sources: &[(usize, usize)], verbs: &[usize], targets: &[(usize, usize)]) -> bool {
    sources.iter().any(|&(_, source_end)| {
        verbs
            .iter()
            .filter(|&&v| v > source_end && v - source_end - 1 <= MAX_WORDS_BEFORE_VERB)
            .any(|&v| {
                targets
                    .iter()
                    .any(|&(t, _)| t > v && t - v - 1 <= MAX_WORDS_AFTER_VERB)
            })
    })
}

/// Strategy 3: `(a|an|the) <source> shall be able to <verb>`, target is the
/// first other class mentioned after the verb.
fn ability_findings<'v>(text: &str, variants: &'v ClassVariants) -> Vec<Finding<'v>> {
    trailing_target_findings(&ABILITY_RE, text, variants)
}

/// Strategy 4: `(each|every|a|an|the) <source> must be <verb> to`, target is
/// the first other class mentioned after `to`.
fn passive_findings<'v>(text: &str, variants: &'v ClassVariants) -> Vec<Finding<'v>> {
    trailing_target_findings(&PASSIVE_RE, text, variants)
}

fn trailing_target_findings<'v>(
    pattern: &Regex,
    text: &str,
    variants: &'v ClassVariants,
) -> Vec<Finding<'v>> {
    let mut findings = Vec::new();

    for caps in pattern.captures_iter(text) {
        let Some(source) = variants.resolve(caps[1].trim()) else {
            continue;
        };
        let rest = &text[caps.get(0).map_or(text.len(), |m| m.end())..];

        if let Some(target) = variants.first_other_in(rest, source) {
            findings.push(Finding {
                source,
                target,
                verb: caps[2].trim().to_string(),
                cardinality: infer_cardinality(text),
            });
        }
    }

    findings
}

/// Apply the document-wide relation dedup policy, preserving first-seen order.
fn dedup_relations(relations: Vec<Relation>, dedup: RelationDedup) -> Vec<Relation> {
    match dedup {
        RelationDedup::UnorderedPair => {
            let mut seen_pairs = HashSet::new();
            relations
                .into_iter()
                .filter(|r| {
                    let pair = if r.source <= r.target {
                        (r.source.clone(), r.target.clone())
                    } else {
                        (r.target.clone(), r.source.clone())
                    };
                    seen_pairs.insert(pair)
                })
                .collect()
        }
        RelationDedup::Triple => {
            let mut merged: IndexMap<(String, String, String), Relation> = IndexMap::new();
            for rel in relations {
                let key = (rel.source.clone(), rel.target.clone(), rel.label.clone());
                match merged.entry(key) {
                    Entry::Occupied(mut entry) => {
                        merge_segments(&mut entry.get_mut().source_segments, &rel.source_segments)
                    }
                    Entry::Vacant(entry) => {
                        entry.insert(rel);
                    }
                }
            }
            merged.into_values().collect()
        }
    }
}

fn merge_segments(into: &mut Vec<SegmentId>, from: &[SegmentId]) {
    let mut ids: IndexSet<SegmentId> = into.drain(..).collect();
    ids.extend(from.iter().copied());
    into.extend(ids);
}

/// Maximal word-character runs of a text, in order.
struct WordTokens<'t> {
    text: &'t str,
    spans: Vec<(usize, usize)>,
}

impl<'t> WordTokens<'t> {
    fn new(text: &'t str) -> Self {
        let spans = WORD_RE
            .find_iter(text)
            .map(|m| (m.start(), m.end()))
            .collect();
        Self { text, spans }
    }

    fn word(&self, idx: usize) -> &'t str {
        let (start, end) = self.spans[idx];
        &self.text[start..end]
    }

    fn positions(&self, word: &str) -> Vec<usize> {
        (0..self.spans.len())
            .filter(|&i| self.word(i) == word)
            .collect()
    }

    /// `(first, last)` word indices of every occurrence of a phrase whose
    /// words are separated by single spaces in the text.
    fn occurrences(&self, phrase: &str) -> Vec<(usize, usize)> {
        let parts: Vec<&str> = phrase.split(' ').collect();
        let n = parts.len();
        if n > self.spans.len() || parts.iter().any(|p| p.is_empty()) {
            return Vec::new();
        }

        (0..=self.spans.len() - n)
            .filter(|&start| {
                parts.iter().enumerate().all(|(k, part)| {
                    let idx = start + k;
                    let glued = k == 0 || &self.text[self.spans[idx - 1].1..self.spans[idx].0] == " ";
                    glued && self.word(idx) == *part
                })
            })
            .map(|start| (start, start + n - 1))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::segment;

    fn triples(relations: &[Relation]) -> Vec<(&str, &str, &str)> {
        relations
            .iter()
            .map(|r| (r.source.as_str(), r.target.as_str(), r.label.as_str()))
            .collect()
    }

    #[test]
    fn test_class_variants() {
        let variants = ClassVariants::new(["OrderItem", "Address"]);
        assert_eq!(variants.resolve("OrderItem"), Some("OrderItem"));
        assert_eq!(variants.resolve("orderitem"), Some("OrderItem"));
        assert_eq!(variants.resolve("order item"), Some("OrderItem"));
        assert_eq!(variants.resolve("order items"), Some("OrderItem"));
        assert_eq!(variants.resolve("orderitemes"), Some("OrderItem"));
        assert_eq!(variants.resolve("addresses"), Some("Address"));
        assert_eq!(variants.resolve("item"), None);

        // classes are registered in name order
        let first = variants.iter().next().map(|(_, name)| name);
        assert_eq!(first, Some("Address"));
    }

    #[test]
    fn test_address_relations_with_supplied_classes() {
        let segments = segment(
            "REQ-13 A customer shall be able to save multiple shipping addresses.\n\
             REQ-14 Each order must be delivered to exactly one address.",
        );
        let relations = extract_relations(
            &segments,
            ["Customer", "Order", "Address"],
            RelationDedup::default(),
        );

        assert_eq!(
            triples(&relations),
            vec![
                ("Customer", "Address", "save"),
                ("Order", "Address", "delivered"),
            ]
        );
        assert_eq!(relations[0].cardinality, Cardinality::zero_or_more());
        assert_eq!(relations[1].cardinality, Cardinality::exactly_one());
        assert_eq!(relations[1].source_segments, vec![SegmentId::new(2)]);
    }

    #[test]
    fn test_modal_pattern() {
        let segments = segment("REQ-5 Each customer must place an order.");
        let relations = extract_relations(&segments, ["Customer", "Order"], RelationDedup::default());
        assert_eq!(triples(&relations), vec![("Customer", "Order", "place")]);
        assert_eq!(relations[0].cardinality, Cardinality::zero_or_more());
    }

    #[test]
    fn test_one_or_more_cardinality() {
        let segments = segment("REQ-6 An order must contain one or more products.");
        let relations = extract_relations(&segments, ["Order", "Product"], RelationDedup::default());
        assert_eq!(triples(&relations), vec![("Order", "Product", "contain")]);
        assert_eq!(relations[0].cardinality, Cardinality::one_or_more());
    }

    #[test]
    fn test_bridge_with_compound_names() {
        let segments = segment("REQ-9 The shopping cart contains many order items.");
        let relations = extract_relations(
            &segments,
            ["ShoppingCart", "OrderItem"],
            RelationDedup::default(),
        );
        assert_eq!(
            triples(&relations),
            vec![("ShoppingCart", "OrderItem", "contains")]
        );
    }

    #[test]
    fn test_bridge_window_limit() {
        let segments = segment(
            "REQ-10 A customer with a very long and winding list of many extra words here places an order.",
        );
        let relations = extract_relations(&segments, ["Customer", "Order"], RelationDedup::default());
        assert!(relations.is_empty());
    }

    fn bridged(before: usize, after: usize) -> Vec<Relation> {
        let filler = |n: usize| "x ".repeat(n);
        let text = format!(
            "REQ-10 customer {}places {}order.",
            filler(before),
            filler(after)
        );
        extract_relations(&segment(&text), ["Customer", "Order"], RelationDedup::default())
    }

    #[test]
    fn test_bridge_window_before_verb() {
        assert_eq!(triples(&bridged(0, 0)), vec![("Customer", "Order", "places")]);
        assert_eq!(bridged(MAX_WORDS_BEFORE_VERB, 0).len(), 1);
        assert!(bridged(MAX_WORDS_BEFORE_VERB + 1, 0).is_empty());
    }

    #[test]
    fn test_bridge_window_after_verb() {
        assert_eq!(bridged(0, MAX_WORDS_AFTER_VERB).len(), 1);
        assert!(bridged(0, MAX_WORDS_AFTER_VERB + 1).is_empty());
        assert_eq!(bridged(MAX_WORDS_BEFORE_VERB, MAX_WORDS_AFTER_VERB).len(), 1);
    }

    #[test]
    fn test_bridge_window_bounds() {
        assert_eq!(MAX_WORDS_BEFORE_VERB, 8);
        assert_eq!(MAX_WORDS_AFTER_VERB, 6);
    }

    #[test]
    fn test_no_self_relations() {
        let segments = segment("REQ-8 An order must reference an order.");
        let relations = extract_relations(&segments, ["Order"], RelationDedup::default());
        assert!(relations.is_empty());
    }

    #[test]
    fn test_unordered_pair_dedup_keeps_first() {
        let segments = segment(
            "REQ-1 A customer must place an order.\nREQ-2 An order must reference a customer.",
        );
        let relations = extract_relations(&segments, ["Customer", "Order"], RelationDedup::UnorderedPair);
        assert_eq!(triples(&relations), vec![("Customer", "Order", "place")]);

        let relations = extract_relations(&segments, ["Customer", "Order"], RelationDedup::Triple);
        assert_eq!(
            triples(&relations),
            vec![
                ("Customer", "Order", "place"),
                ("Order", "Customer", "reference"),
            ]
        );
    }

    #[test]
    fn test_triple_dedup_merges_segments() {
        let segments = segment(
            "REQ-1 A customer must place an order.\nREQ-2 The customer must place an order.",
        );
        let relations = extract_relations(&segments, ["Customer", "Order"], RelationDedup::Triple);
        assert_eq!(relations.len(), 1);
        assert_eq!(
            relations[0].source_segments,
            vec![SegmentId::new(1), SegmentId::new(2)]
        );

        let relations = extract_relations(&segments, ["Customer", "Order"], RelationDedup::UnorderedPair);
        assert_eq!(relations[0].source_segments, vec![SegmentId::new(1)]);
    }

    #[test]
    fn test_info_segments_are_skipped() {
        let segments = segment("The customer places an order.");
        let relations = extract_relations(&segments, ["Customer", "Order"], RelationDedup::default());
        assert!(relations.is_empty());
    }

    #[test]
    fn test_infer_cardinality() {
        assert_eq!(infer_cardinality("Exactly one address"), Cardinality::exactly_one());
        assert_eq!(infer_cardinality("one or more items"), Cardinality::one_or_more());
        assert_eq!(infer_cardinality("zero or more notes"), Cardinality::zero_or_more());
        assert_eq!(infer_cardinality("many reviews"), Cardinality::zero_or_more());
        assert_eq!(infer_cardinality("a review"), Cardinality::zero_or_more());
        // "exactly one" outranks "one or more"
        assert_eq!(
            infer_cardinality("exactly one or more"),
            Cardinality::exactly_one()
        );
    }

    #[test]
    fn test_clean_segment_text() {
        assert_eq!(clean_segment_text("REQ-14 Each Order"), "each order");
        assert_eq!(clean_segment_text("FR: 3 The cart"), "the cart");
        assert_eq!(clean_segment_text("DEF A Cart"), "def a cart");
    }

    #[test]
    fn test_word_token_occurrences() {
        let words = WordTokens::new("the order  item and the order item.");
        // the double space breaks the first compound occurrence
        assert_eq!(words.occurrences("order item"), vec![(5, 6)]);
        assert_eq!(words.occurrences("order"), vec![(1, 1), (5, 5)]);
        assert_eq!(words.positions("the"), vec![0, 4]);
    }
}
