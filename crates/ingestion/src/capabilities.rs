//! WMS GetCapabilities parsing.
//!
//! Turns a capabilities document into `wms_layer` identifiers: one per
//! queryable named layer and advertised elevation (or height), at the
//! layer's latest time position.

use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use radar_common::{format_iso8601, parse_iso8601, SourceFormat};
use tracing::debug;
use url::form_urlencoded;

use crate::batch::RawIdentifier;
use crate::error::CapabilitiesError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DimensionKind {
    Time,
    Elevation,
    Height,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextTarget {
    Name,
    Dimension(DimensionKind),
}

/// Dimensions are inherited from the enclosing layer unless redeclared.
#[derive(Debug, Clone, Default)]
struct LayerState {
    name: Option<String>,
    queryable: bool,
    time: Option<String>,
    elevations: Vec<String>,
    heights: Vec<String>,
}

impl LayerState {
    fn child_of(parent: Option<&LayerState>, start: &BytesStart<'_>) -> Self {
        let mut state = parent
            .map(|p| LayerState {
                name: None,
                ..p.clone()
            })
            .unwrap_or_default();
        state.queryable = start
            .attributes()
            .flatten()
            .any(|attr| {
                attr.key.local_name().as_ref() == b"queryable"
                    && matches!(&*attr.value, b"1" | b"true")
            });
        state
    }
}

/// Extract one `wms_layer` identifier per queryable layer and level.
pub fn extract_wms_layers(xml: &str) -> Result<Vec<RawIdentifier>, CapabilitiesError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<LayerState> = Vec::new();
    let mut style_depth = 0usize;
    let mut target: Option<TextTarget> = None;
    let mut text = String::new();
    let mut identifiers = Vec::new();

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| CapabilitiesError::Xml {
                position: reader.buffer_position(),
                source,
            })?;

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"Layer" => {
                    let state = LayerState::child_of(stack.last(), &e);
                    stack.push(state);
                }
                b"Style" => style_depth += 1,
                b"Name" if style_depth == 0 && !stack.is_empty() => {
                    target = Some(TextTarget::Name);
                    text.clear();
                }
                b"Dimension" | b"Extent" if !stack.is_empty() => {
                    if let Some(kind) = dimension_kind(&e) {
                        target = Some(TextTarget::Dimension(kind));
                        text.clear();
                    }
                }
                _ => {}
            },
            Event::Text(t) if target.is_some() => {
                let unescaped = t.unescape().map_err(|source| CapabilitiesError::Xml {
                    position: reader.buffer_position(),
                    source,
                })?;
                text.push_str(&unescaped);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"Layer" => {
                    if let Some(layer) = stack.pop() {
                        emit_layer(&layer, &mut identifiers);
                    }
                }
                b"Style" => style_depth = style_depth.saturating_sub(1),
                b"Name" | b"Dimension" | b"Extent" => {
                    if let (Some(target), Some(layer)) = (target.take(), stack.last_mut()) {
                        assign(layer, target, text.trim());
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(identifiers)
}

fn dimension_kind(start: &BytesStart<'_>) -> Option<DimensionKind> {
    start
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == b"name")
        .and_then(|attr| match attr.value.to_ascii_lowercase().as_slice() {
            b"time" => Some(DimensionKind::Time),
            b"elevation" => Some(DimensionKind::Elevation),
            b"height" => Some(DimensionKind::Height),
            _ => None,
        })
}

fn assign(layer: &mut LayerState, target: TextTarget, text: &str) {
    match target {
        TextTarget::Name => {
            if layer.name.is_none() && !text.is_empty() {
                layer.name = Some(text.to_string());
            }
        }
        TextTarget::Dimension(DimensionKind::Time) => layer.time = Some(text.to_string()),
        TextTarget::Dimension(DimensionKind::Elevation) => layer.elevations = split_values(text),
        TextTarget::Dimension(DimensionKind::Height) => layer.heights = split_values(text),
    }
}

fn split_values(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn emit_layer(layer: &LayerState, out: &mut Vec<RawIdentifier>) {
    let Some(name) = layer.name.as_deref() else {
        return;
    };
    if !layer.queryable {
        return;
    }
    let Some(time) = layer.time.as_deref().and_then(latest_time_position) else {
        debug!(layer = %name, "Layer has no usable TIME dimension, skipping");
        return;
    };
    let time = format_iso8601(&time);

    let levels: Vec<(&str, &str)> = if !layer.elevations.is_empty() {
        layer.elevations.iter().map(|e| ("ELEVATION", e.as_str())).collect()
    } else {
        layer.heights.iter().map(|h| ("HEIGHT", h.as_str())).collect()
    };

    if levels.is_empty() {
        out.push(layer_identifier(name, &time, None));
    } else {
        for level in levels {
            out.push(layer_identifier(name, &time, Some(level)));
        }
    }
}

fn layer_identifier(name: &str, time: &str, level: Option<(&str, &str)>) -> RawIdentifier {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("LAYERS", name).append_pair("TIME", time);
    if let Some((key, value)) = level {
        query.append_pair(key, value);
    }
    RawIdentifier::new(query.finish(), SourceFormat::WmsLayer)
}

/// Latest instant of a TIME dimension value.
///
/// The value is a list of instants and/or `start/end/period` intervals; the
/// end of an interval is its latest position.
pub fn latest_time_position(value: &str) -> Option<DateTime<Utc>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .filter_map(|v| {
            let instant = match v.split('/').collect::<Vec<_>>().as_slice() {
                [single] => *single,
                [_, end, ..] => *end,
                [] => return None,
            };
            parse_iso8601(instant).ok()
        })
        .max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_latest_time_position_list() {
        let latest = latest_time_position(
            "2026-01-24T00:10:00Z,2026-01-24T00:00:00Z,2026-01-24T00:05:00Z",
        )
        .unwrap();
        assert_eq!(latest, Utc.with_ymd_and_hms(2026, 1, 24, 0, 10, 0).unwrap());
    }

    #[test]
    fn test_latest_time_position_interval() {
        let latest =
            latest_time_position("2026-01-23T00:00:00Z/2026-01-24T00:00:00Z/PT5M").unwrap();
        assert_eq!(latest, Utc.with_ymd_and_hms(2026, 1, 24, 0, 0, 0).unwrap());
        assert_eq!(latest_time_position("current"), None);
    }
}
