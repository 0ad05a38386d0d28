//! Default `productInfo` payload for catalog entries.
//!
//! Field names are snake_case here; the serializer camelizes them.

use std::collections::BTreeMap;

use radar_common::{
    DataScale, DataType, HydrometeorClass, ProductDescriptor, ProductKind, Quantity,
    NOT_SCANNED_PIXEL, NO_ECHO_PIXEL,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

pub const HORIZONTAL_POLARIZATION: &str = "HORIZONTAL";

/// Display-oriented description of a data scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "tag")]
pub enum ScaleInfo {
    /// physical = offset + step * pixel
    #[serde(rename = "LinearInterpolationDataScale")]
    Linear {
        offset: f64,
        step: f64,
        not_scanned: u8,
        no_echo: u8,
    },
    #[serde(rename = "HclassDataScale")]
    Hclass {
        mapping: BTreeMap<u8, HydrometeorClass>,
        not_scanned: u8,
        no_echo: u8,
    },
}

impl From<&DataScale> for ScaleInfo {
    fn from(scale: &DataScale) -> Self {
        match scale {
            DataScale::Linear { gain, offset } => ScaleInfo::Linear {
                offset: *offset,
                step: *gain,
                not_scanned: NOT_SCANNED_PIXEL,
                no_echo: NO_ECHO_PIXEL,
            },
            DataScale::Classification { mapping } => ScaleInfo::Hclass {
                mapping: mapping.clone(),
                not_scanned: NOT_SCANNED_PIXEL,
                no_echo: NO_ECHO_PIXEL,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductInfo {
    pub data_type: &'static str,
    pub data_unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_scale: Option<ScaleInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polarization: Option<&'static str>,
    pub product_type: &'static str,
    pub product_subtype: String,
}

impl ProductInfo {
    pub fn from_descriptor(descriptor: &ProductDescriptor) -> Self {
        Self {
            data_type: data_type_label(descriptor.data_type),
            data_unit: display_unit(descriptor),
            data_scale: descriptor.data_scale.as_ref().map(ScaleInfo::from),
            polarization: is_horizontal_reflectivity(descriptor)
                .then_some(HORIZONTAL_POLARIZATION),
            product_type: product_type_label(&descriptor.product),
            product_subtype: descriptor.product_subtype.clone(),
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// `data_type` value of the payload. Web clients pick colour scales by it.
pub fn data_type_label(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Z => "REFLECTIVITY",
        DataType::Hclass => "hclass",
        DataType::V => "RADIAL_VELOCITY",
        DataType::Rr => "RAINFALL_ACCUMULATION",
        DataType::Height => "ECHO_TOP_HEIGHT",
    }
}

fn product_type_label(product: &ProductKind) -> &'static str {
    match product {
        ProductKind::Ppi => "PPI",
        ProductKind::Cappi => "CAPPI",
        ProductKind::EchoTop { .. } => "ETOP",
    }
}

fn is_horizontal_reflectivity(descriptor: &ProductDescriptor) -> bool {
    descriptor.quantity == Quantity::Dbzh && descriptor.data_type == DataType::Z
}

// Reflectivity is published as dBZ.
fn display_unit(descriptor: &ProductDescriptor) -> String {
    match descriptor.data_type {
        DataType::Z => "dBZ".to_string(),
        _ => descriptor.data_unit.clone(),
    }
}
