//! The segmentation, classification and extraction pipeline.
//!
//! Stages run strictly in order and never mutate a predecessor's output:
//! segmenter, classifier, filter, class / attribute / relation extractors,
//! assembler. Every stage is a pure function of its input.

mod assembler;
mod attributes;
mod classes;
mod classifier;
mod filter;
pub mod lexicon;
mod options;
mod relations;
mod segmenter;

pub use assembler::{build_domain_model, build_domain_model_with_options};
pub use attributes::{extract_attributes, infer_attribute_type, AttributeMap};
pub use classes::{
    extract_candidate_classes, is_likely_attribute, is_valid_concept, normalize_class_name,
    ClassMap,
};
pub use classifier::label_sentence;
pub use filter::{filter_relevant, quality_metrics, FilterQuality};
pub use options::{ExtractOptions, RelationDedup, DEFAULT_MODEL_VERSION};
pub use relations::{extract_relations, infer_cardinality, ClassVariants};
pub use segmenter::{segment, split_into_candidates};
