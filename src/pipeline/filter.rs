//! Relevance filtering and filter-quality metrics.

use crate::model::Segment;

/// Quality metrics of the filtering step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterQuality {
    pub num_segments: usize,
    pub kept_segments: usize,
    /// `kept / total` rounded to 4 decimals, 0.0 for empty input
    pub filter_ratio: f64,
}

/// Keep REQ, DEF and CON segments, in input order.
pub fn filter_relevant(segments: &[Segment]) -> Vec<&Segment> {
    segments.iter().filter(|s| s.is_relevant()).collect()
}

/// Compute filter metrics from the full and kept segment counts.
pub fn quality_metrics(total: usize, kept: usize) -> FilterQuality {
    let ratio = if total == 0 {
        0.0
    } else {
        kept as f64 / total as f64
    };

    FilterQuality {
        num_segments: total,
        kept_segments: kept,
        filter_ratio: round4(ratio),
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
