//! Conversion from raw pixel values to physical units.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::product::DataType;

/// Pixel value reserved for "not scanned" in every 8-bit radar product.
pub const NOT_SCANNED_PIXEL: u8 = 255;

/// Pixel value meaning "no echo" in reflectivity products.
pub const NO_ECHO_PIXEL: u8 = 0;

/// Network-wide reflectivity encoding: dBZ = 0.5 * pixel - 32.
pub const REFLECTIVITY_GAIN: f64 = 0.5;
pub const REFLECTIVITY_OFFSET: f64 = -32.0;

/// Hydrometeor classes published in `hclass` products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HydrometeorClass {
    NoSignal,
    NonMet,
    Rain,
    WetSnow,
    DrySnow,
    Graupel,
    Hail,
    NotScanned,
}

impl HydrometeorClass {
    pub fn label(&self) -> &'static str {
        match self {
            HydrometeorClass::NoSignal => "NO_SIGNAL",
            HydrometeorClass::NonMet => "NON_MET",
            HydrometeorClass::Rain => "RAIN",
            HydrometeorClass::WetSnow => "WET_SNOW",
            HydrometeorClass::DrySnow => "DRY_SNOW",
            HydrometeorClass::Graupel => "GRAUPEL",
            HydrometeorClass::Hail => "HAIL",
            HydrometeorClass::NotScanned => "NOT_SCANNED",
        }
    }
}

/// How pixel values of a product map to physical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataScale {
    /// physical = offset + gain * pixel
    Linear { gain: f64, offset: f64 },
    /// pixel value -> category
    Classification { mapping: BTreeMap<u8, HydrometeorClass> },
}

/// A pixel value converted through a [`DataScale`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicalValue {
    Value(f64),
    Category(HydrometeorClass),
}

impl DataScale {
    /// The reflectivity scale shared by every radar in the network.
    pub fn reflectivity() -> Self {
        DataScale::Linear {
            gain: REFLECTIVITY_GAIN,
            offset: REFLECTIVITY_OFFSET,
        }
    }

    /// Fixed hydrometeor classification table.
    pub fn hydrometeor_classes() -> Self {
        let mapping = BTreeMap::from([
            (0, HydrometeorClass::NoSignal),
            (1, HydrometeorClass::NonMet),
            (2, HydrometeorClass::Rain),
            (3, HydrometeorClass::WetSnow),
            (4, HydrometeorClass::DrySnow),
            (5, HydrometeorClass::Graupel),
            (6, HydrometeorClass::Hail),
            (NOT_SCANNED_PIXEL, HydrometeorClass::NotScanned),
        ]);
        DataScale::Classification { mapping }
    }

    /// Convert a raw pixel. Returns `None` for "not scanned" linear pixels and
    /// for pixels outside the classification table.
    pub fn to_physical(&self, pixel: u8) -> Option<PhysicalValue> {
        match self {
            DataScale::Linear { .. } if pixel == NOT_SCANNED_PIXEL => None,
            DataScale::Linear { gain, offset } => {
                Some(PhysicalValue::Value(offset + gain * f64::from(pixel)))
            }
            DataScale::Classification { mapping } => {
                mapping.get(&pixel).copied().map(PhysicalValue::Category)
            }
        }
    }
}

/// Resolve the scale for a canonical data type.
///
/// `None` is a resolved answer: velocity, accumulation and echo-top products
/// have no defined pixel conversion.
pub fn resolve_data_scale(data_type: DataType) -> Option<DataScale> {
    match data_type {
        DataType::Z => Some(DataScale::reflectivity()),
        DataType::Hclass => Some(DataScale::hydrometeor_classes()),
        DataType::V | DataType::Rr | DataType::Height => None,
    }
}
