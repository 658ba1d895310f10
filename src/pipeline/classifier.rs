//! Rule-based REQ/DEF/CON/INFO labeling.

use crate::model::Label;
use regex::Regex;
use std::sync::LazyLock;

/// Explicit requirement ids at line start: `REQ-12`, `FR:3`, `NFR 7`, `US12`.
static REQ_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(?:REQ|FR|NFR|US)\s*[-:]?\s*\d+").unwrap());

static DEF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^def\b|^definition\b|\bis defined as\b|\bmeans\b|^glossary\b").unwrap()
});

static CON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bunique\b|\bwithin\b.*\bseconds\b|\bnot exceed\b|\bmaximum\b|\bminimum\b|\bvalidation\b|\bconstraint\b|\bencrypted\b|\bgdpr\b",
    )
    .unwrap()
});

static REQ_VERB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bshall\b|\bmust\b|\bshould\b|\bis required to\b|\brequires\b|\bhas to\b")
        .unwrap()
});

/// Label a line of text.
///
/// Rules are checked in priority order and the first hit wins:
/// requirement id, definition marker, constraint marker, requirement verb.
/// Anything else is [`Label::Info`].
pub fn label_sentence(text: &str) -> Label {
    let t = text.trim();
    if t.is_empty() {
        return Label::Info;
    }

    if REQ_ID_RE.is_match(t) {
        Label::Req
    } else if DEF_RE.is_match(t) {
        Label::Def
    } else if CON_RE.is_match(t) {
        Label::Con
    } else if REQ_VERB_RE.is_match(t) {
        Label::Req
    } else {
        Label::Info
    }
}
