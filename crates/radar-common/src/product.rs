//! Normalized radar product descriptors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::scale::DataScale;
use crate::source::SourceFormat;

/// Flavor key used when a product has neither an elevation nor a height.
pub const DEFAULT_FLAVOR: &str = "default";

/// Canonical data type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataType {
    /// Reflectivity
    #[serde(rename = "Z")]
    Z,
    /// Hydrometeor classification
    #[serde(rename = "hclass")]
    Hclass,
    /// Radial velocity
    #[serde(rename = "V")]
    V,
    /// Accumulated rainfall
    #[serde(rename = "rr")]
    Rr,
    /// Echo top height
    #[serde(rename = "height")]
    Height,
}

impl DataType {
    pub fn code(&self) -> &'static str {
        match self {
            DataType::Z => "Z",
            DataType::Hclass => "hclass",
            DataType::V => "V",
            DataType::Rr => "rr",
            DataType::Height => "height",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Measured quantity as named by the datatype token of an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    /// `dbzh`: horizontally polarized reflectivity
    Dbzh,
    /// `hclass`: hydrometeor classification
    Hclass,
    /// `vrad`: radial velocity
    Vrad,
    /// `acrr{duration}`: rainfall accumulated over `duration` (e.g. `1h`)
    Accumulation { duration: String },
}

impl Quantity {
    /// Token as it appears in file names.
    pub fn token(&self) -> String {
        match self {
            Quantity::Dbzh => "dbzh".to_string(),
            Quantity::Hclass => "hclass".to_string(),
            Quantity::Vrad => "vrad".to_string(),
            Quantity::Accumulation { duration } => format!("acrr{}", duration),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Quantity::Dbzh => DataType::Z,
            Quantity::Hclass => DataType::Hclass,
            Quantity::Vrad => DataType::V,
            Quantity::Accumulation { .. } => DataType::Rr,
        }
    }
}

/// Scan geometry of a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProductKind {
    /// Single elevation sweep
    Ppi,
    /// Constant altitude
    Cappi,
    /// Echo top above a reflectivity threshold (dBZ)
    EchoTop { threshold: f64 },
}

impl ProductKind {
    /// Token as it appears in file names.
    pub fn token(&self) -> &'static str {
        match self {
            ProductKind::Ppi => "ppi",
            ProductKind::Cappi => "cappi",
            ProductKind::EchoTop { .. } => "etop",
        }
    }
}

/// Vertical position of a product: an elevation angle or a height, never both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    /// Antenna elevation in degrees
    Elevation(f64),
    /// Height in meters
    Height(f64),
}

impl Level {
    pub fn value(&self) -> f64 {
        match self {
            Level::Elevation(v) | Level::Height(v) => *v,
        }
    }
}

/// A parsed radar product identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub timestamp: DateTime<Utc>,
    pub site: String,
    /// Product family shown to users, e.g. "PPI dbZh", "ETOP", "ACRR mm"
    pub product_type: String,
    /// Sub-selector shown to users, e.g. "EL 0.3°", "H 600 m", "1h"
    pub product_subtype: String,
    pub data_type: DataType,
    pub data_unit: String,
    pub level: Option<Level>,
    pub composite: bool,
    pub data_scale: Option<DataScale>,
    pub raw_identifier: String,
    pub source: SourceFormat,
    pub product: ProductKind,
    pub quantity: Quantity,
}

impl ProductDescriptor {
    pub fn elevation(&self) -> Option<f64> {
        match self.level {
            Some(Level::Elevation(e)) => Some(e),
            _ => None,
        }
    }

    pub fn height(&self) -> Option<f64> {
        match self.level {
            Some(Level::Height(h)) => Some(h),
            _ => None,
        }
    }

    /// Catalog flavor key: the elevation, else the height, else `"default"`.
    pub fn flavor_key(&self) -> String {
        match self.level {
            Some(level) => format_number(level.value()),
            None => DEFAULT_FLAVOR.to_string(),
        }
    }
}

/// Shortest decimal rendering of a level or threshold value (`0.3`, `600`, `-10`).
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn descriptor(level: Option<Level>) -> ProductDescriptor {
        ProductDescriptor {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 24, 0, 0, 0).unwrap(),
            site: "fikau".to_string(),
            product_type: "PPI dbZh".to_string(),
            product_subtype: "EL 0.3°".to_string(),
            data_type: DataType::Z,
            data_unit: "dbZ".to_string(),
            level,
            composite: false,
            data_scale: None,
            raw_identifier: "test".to_string(),
            source: SourceFormat::DirectoryScan,
            product: ProductKind::Ppi,
            quantity: Quantity::Dbzh,
        }
    }

    #[test]
    fn test_flavor_key() {
        assert_eq!(descriptor(Some(Level::Elevation(0.3))).flavor_key(), "0.3");
        assert_eq!(descriptor(Some(Level::Height(600.0))).flavor_key(), "600");
        assert_eq!(descriptor(None).flavor_key(), DEFAULT_FLAVOR);
    }

    #[test]
    fn test_level_accessors_are_exclusive() {
        let ppi = descriptor(Some(Level::Elevation(0.7)));
        assert_eq!(ppi.elevation(), Some(0.7));
        assert_eq!(ppi.height(), None);

        let cappi = descriptor(Some(Level::Height(500.0)));
        assert_eq!(cappi.elevation(), None);
        assert_eq!(cappi.height(), Some(500.0));
    }

    #[test]
    fn test_quantity_tokens() {
        assert_eq!(Quantity::Dbzh.token(), "dbzh");
        let acrr = Quantity::Accumulation { duration: "12h".to_string() };
        assert_eq!(acrr.token(), "acrr12h");
        assert_eq!(acrr.data_type(), DataType::Rr);
        assert_eq!(format_number(-10.0), "-10");
    }
}
