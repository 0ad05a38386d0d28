//! Common types shared across the radar catalog crates.

pub mod error;
pub mod product;
pub mod scale;
pub mod site;
pub mod source;
pub mod time;

pub use error::{SiteDirectoryError, SiteLookupError};
pub use product::{
    format_number, DataType, Level, ProductDescriptor, ProductKind, Quantity, DEFAULT_FLAVOR,
};
pub use scale::{
    resolve_data_scale, DataScale, HydrometeorClass, PhysicalValue, NOT_SCANNED_PIXEL, NO_ECHO_PIXEL,
};
pub use site::{SiteDirectory, SiteEntry, SiteInfo, StaticSiteDirectory};
pub use source::{SourceFormat, UnknownSourceFormat};
pub use time::{format_compact, format_iso8601, parse_compact, parse_iso8601, TimeParseError};
