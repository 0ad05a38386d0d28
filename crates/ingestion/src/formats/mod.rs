//! Identifier grammars, one per [`SourceFormat`].

mod filename;
mod object_key;
mod wfs;
mod wms;

use std::collections::HashMap;

use radar_common::{ProductDescriptor, SourceFormat};

use crate::error::{ParseError, ParseFailure, Result};

pub use filename::{parse_filename, strip_extensions, DirectoryScanFormat};
pub use object_key::ObjectKeyFormat;
pub use wfs::WfsFeatureFormat;
pub use wms::WmsLayerFormat;

/// A naming grammar that turns raw identifiers into descriptors.
pub trait IdentifierFormat: Send + Sync {
    /// The source tag this grammar handles.
    fn source(&self) -> SourceFormat;

    fn parse(&self, raw: &str) -> std::result::Result<ProductDescriptor, ParseFailure>;
}

/// Grammar registered for a source tag.
pub fn format_for(source: SourceFormat) -> &'static dyn IdentifierFormat {
    match source {
        SourceFormat::DirectoryScan => &DirectoryScanFormat,
        SourceFormat::ObjectStoreKey => &ObjectKeyFormat,
        SourceFormat::WmsLayer => &WmsLayerFormat,
        SourceFormat::WfsFeature => &WfsFeatureFormat,
    }
}

/// Parse one raw identifier with the grammar selected by `source`.
pub fn parse_identifier(raw: &str, source: SourceFormat) -> Result<ProductDescriptor> {
    let format = format_for(source);
    let trimmed = raw.trim();
    let outcome = if trimmed.is_empty() {
        Err(ParseFailure::Empty)
    } else {
        format.parse(trimmed)
    };

    outcome.map_err(|reason| ParseError {
        raw: raw.to_string(),
        format: format.source(),
        reason,
    })
}

/// Decode a form-encoded record into lower-cased keys.
///
/// A leading `?` is ignored. Repeated keys keep the last value.
pub(crate) fn query_fields(raw: &str) -> HashMap<String, String> {
    let query = raw.strip_prefix('?').unwrap_or(raw);
    url::form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.to_ascii_lowercase(), value.trim().to_string()))
        .collect()
}

pub(crate) fn required<'a>(
    fields: &'a HashMap<String, String>,
    key: &str,
) -> std::result::Result<&'a str, ParseFailure> {
    fields
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ParseFailure::MissingField(key.to_string()))
}

pub(crate) fn optional<'a>(fields: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
}
