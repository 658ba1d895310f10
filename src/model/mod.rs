//! Domain model types produced by the extraction pipeline.
//!
//! These types are the observable contract of the crate: a [`DomainModel`]
//! serializes to the JSON structure handed to API and diagram collaborators.

mod domain;
mod segment;

pub use domain::{
    Attribute, AttributeType, Cardinality, DomainClass, DomainModel, Metadata, Quality, Relation,
    RelationType,
};
pub use segment::{Label, ParseSegmentIdError, Segment, SegmentId, SegmentSource};
