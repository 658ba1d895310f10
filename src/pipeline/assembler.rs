//! Final assembly of the domain model.

use crate::model::{DomainClass, DomainModel, Metadata, Quality, Segment};
use chrono::Utc;

use super::{
    extract_attributes, extract_candidate_classes, extract_relations, filter_relevant,
    quality_metrics, ExtractOptions,
};

/// Build a domain model from labeled segments with default options.
pub fn build_domain_model(doc_id: impl Into<String>, segments: Vec<Segment>) -> DomainModel {
    build_domain_model_with_options(doc_id, segments, &ExtractOptions::default())
}

/// Build a domain model: filter, extract classes, attributes and relations, assemble.
///
/// Classes are sorted by name and carry their segment ids in ascending order.
/// Attributes found for names that are not discovered classes are dropped.
pub fn build_domain_model_with_options(
    doc_id: impl Into<String>,
    segments: Vec<Segment>,
    options: &ExtractOptions,
) -> DomainModel {
    let doc_id = doc_id.into();

    let kept = filter_relevant(&segments);
    let filter = quality_metrics(segments.len(), kept.len());

    let class_map = extract_candidate_classes(kept.iter().copied());
    let mut attr_map = extract_attributes(kept.iter().copied());
    let relations = extract_relations(
        kept.iter().copied(),
        class_map.keys(),
        options.relation_dedup,
    );

    let classes: Vec<DomainClass> = class_map
        .into_iter()
        .map(|(name, ids)| DomainClass {
            attributes: attr_map.remove(&name).unwrap_or_default(),
            source_segments: ids.into_iter().collect(),
            name,
        })
        .collect();

    if !attr_map.is_empty() {
        log::debug!(
            "Dropping attributes of {} names without a class: {:?}",
            attr_map.len(),
            attr_map.keys().collect::<Vec<_>>()
        );
    }

    let quality = Quality {
        num_segments: filter.num_segments,
        kept_segments: filter.kept_segments,
        filter_ratio: filter.filter_ratio,
        num_classes: classes.len(),
        num_relations: relations.len(),
    };

    log::debug!(
        "Built model for {:?}: {} classes, {} relations, {}/{} segments kept",
        doc_id,
        quality.num_classes,
        quality.num_relations,
        quality.kept_segments,
        quality.num_segments
    );

    DomainModel {
        metadata: Metadata {
            doc_id,
            created_at: options.created_at.unwrap_or_else(Utc::now),
            version: options.version.clone(),
        },
        segments,
        classes,
        relations,
        quality,
    }
}
