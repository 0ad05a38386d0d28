//! Radar product identifier parsing.
//!
//! Radar products reach the catalog under several incompatible naming
//! conventions. Each one is an [`IdentifierFormat`] selected by the
//! [`SourceFormat`](radar_common::SourceFormat) tag of the input:
//!
//! - product file names found by a directory scan
//! - object-store keys (`YYYY/MM/DD/{dir}/{filename}`)
//! - WMS layers with TIME/ELEVATION dimensions
//! - WFS feature records
//!
//! All of them produce the same [`ProductDescriptor`](radar_common::ProductDescriptor).
//! A malformed identifier yields a [`ParseError`] and never aborts a batch.

pub mod batch;
pub mod capabilities;
mod descriptor;
pub mod error;
pub mod formats;
pub mod render;
pub mod tables;

// Re-exports
pub use batch::{parse_batch, partition_outcomes, BatchSummary, RawIdentifier};
pub use capabilities::{extract_wms_layers, latest_time_position};
pub use error::{CapabilitiesError, ParseError, ParseFailure, Result};
pub use formats::{format_for, parse_identifier, strip_extensions, IdentifierFormat};
pub use render::render_identifier;
