//! JSON rendering for domain models.
//!
//! Field names are snake_case and segment ids are `S<n>` strings, so the
//! output can be handed to API and diagram collaborators unchanged.

use crate::error::Result;
use crate::model::DomainModel;
use std::io::Write;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Indented, one field per line
    #[default]
    Pretty,
    /// Single line
    Compact,
}

/// Serialize a domain model to a JSON string.
pub fn to_json(model: &DomainModel, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(model)?,
        JsonFormat::Compact => serde_json::to_string(model)?,
    };
    Ok(json)
}

/// Stream a domain model as JSON into `writer`.
///
/// Writer failures surface as [`Error::Io`](crate::Error::Io).
pub fn write_json<W: Write>(model: &DomainModel, writer: W, format: JsonFormat) -> Result<()> {
    match format {
        JsonFormat::Pretty => serde_json::to_writer_pretty(writer, model)?,
        JsonFormat::Compact => serde_json::to_writer(writer, model)?,
    }
    Ok(())
}
