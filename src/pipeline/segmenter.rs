//! Line-granular segmentation of raw text.

use crate::model::{Segment, SegmentId};
use regex::Regex;
use std::sync::LazyLock;

use super::classifier::label_sentence;

/// Line boundaries: CRLF, LF, lone CR, vertical tab, form feed, the
/// file/group/record separators, NEL and the Unicode line/paragraph separators.
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\r\x0b\x0c\x1c-\x1e\x{85}\x{2028}\x{2029}]").unwrap()
});

/// Split raw text into candidate chunks: trimmed, non-blank lines in input order.
///
/// Multi-line sentences are not merged.
pub fn split_into_candidates(raw_text: &str) -> Vec<&str> {
    LINE_BREAK_RE
        .split(raw_text)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

/// Split raw text into labeled segments with ids `S1`, `S2`, ...
pub fn segment(raw_text: &str) -> Vec<Segment> {
    let segments: Vec<Segment> = split_into_candidates(raw_text)
        .into_iter()
        .enumerate()
        .map(|(idx, chunk)| Segment::new(SegmentId::new(idx as u32 + 1), label_sentence(chunk), chunk))
        .collect();

    log::debug!("Segmented input into {} segments", segments.len());
    segments
}
