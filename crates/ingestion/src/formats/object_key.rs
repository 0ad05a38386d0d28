//! Object-store keys: `YYYY/MM/DD/{dir}/{filename}`.

use chrono::NaiveDate;
use radar_common::{ProductDescriptor, SourceFormat};

use super::filename::parse_filename;
use super::IdentifierFormat;
use crate::error::ParseFailure;

/// Keys listed from the radar object-store bucket.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectKeyFormat;

impl IdentifierFormat for ObjectKeyFormat {
    fn source(&self) -> SourceFormat {
        SourceFormat::ObjectStoreKey
    }

    fn parse(&self, raw: &str) -> Result<ProductDescriptor, ParseFailure> {
        let segments: Vec<&str> = raw.trim_start_matches('/').split('/').collect();
        let filename = segments.last().copied().unwrap_or(raw);

        let descriptor = parse_filename(filename, raw, SourceFormat::ObjectStoreKey)?;

        if let Some(prefix) = date_prefix(&segments)? {
            let date = descriptor.timestamp.date_naive();
            if prefix != date {
                return Err(ParseFailure::DateMismatch {
                    prefix: prefix.to_string(),
                    timestamp: date.to_string(),
                });
            }
        }

        Ok(descriptor)
    }
}

/// The `YYYY/MM/DD` prefix, when the key has one.
fn date_prefix(segments: &[&str]) -> Result<Option<NaiveDate>, ParseFailure> {
    if segments.len() < 4 {
        return Ok(None);
    }

    let head = &segments[..3];
    if !head
        .iter()
        .all(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
    {
        return Ok(None);
    }

    let invalid = || ParseFailure::InvalidDatePrefix(head.join("/"));
    let year: i32 = head[0].parse().map_err(|_| invalid())?;
    let month: u32 = head[1].parse().map_err(|_| invalid())?;
    let day: u32 = head[2].parse().map_err(|_| invalid())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .map(Some)
        .ok_or_else(invalid)
}
