//! Assembly of a [`ProductDescriptor`] from grammar-independent parts.
//!
//! Every grammar reduces its input to [`DescriptorParts`]; the display
//! names, level, unit and data scale are derived here so that all grammars
//! agree on them.

use chrono::{DateTime, Utc};
use radar_common::{
    format_number, resolve_data_scale, DataType, Level, ProductDescriptor, ProductKind, Quantity,
    SourceFormat,
};

use crate::error::ParseFailure;
use crate::tables::{data_unit, quantity_label, ProductToken};

/// Tokens extracted from an identifier, before validation of their combination.
#[derive(Debug, Clone)]
pub struct DescriptorParts {
    pub timestamp: DateTime<Utc>,
    pub site: String,
    pub product: ProductToken,
    /// Elevation for PPI, height for CAPPI, threshold for ETOP
    pub value: f64,
    pub quantity: Quantity,
    pub composite: bool,
}

impl DescriptorParts {
    pub fn build(
        self,
        raw: &str,
        source: SourceFormat,
    ) -> Result<ProductDescriptor, ParseFailure> {
        validate_site(&self.site)?;

        let incompatible = || ParseFailure::Incompatible {
            product: product_name(self.product, self.composite).to_string(),
            datatype: self.quantity.token(),
        };

        let value = format_number(self.value);
        let (kind, product_type, product_subtype, level, data_type) =
            match (self.product, &self.quantity) {
                (ProductToken::Etop, Quantity::Dbzh) if !self.composite => (
                    ProductKind::EchoTop {
                        threshold: self.value,
                    },
                    "ETOP".to_string(),
                    format!("THR {}", value),
                    None,
                    DataType::Height,
                ),
                (ProductToken::Etop, _) => return Err(incompatible()),

                (ProductToken::Cappi, Quantity::Accumulation { duration }) if self.composite => (
                    ProductKind::Cappi,
                    format!("{} {}", quantity_label(&self.quantity), data_unit(DataType::Rr)),
                    duration.clone(),
                    Some(Level::Height(self.value)),
                    DataType::Rr,
                ),
                (_, Quantity::Accumulation { .. }) => return Err(incompatible()),

                (ProductToken::Cappi, Quantity::Dbzh) if self.composite => cappi(&self, &value),
                (ProductToken::Cappi, _) if self.composite => return Err(incompatible()),
                (ProductToken::Cappi, _) => cappi(&self, &value),

                (ProductToken::Ppi, _) if self.composite => return Err(incompatible()),
                (ProductToken::Ppi, quantity) => (
                    ProductKind::Ppi,
                    format!("PPI {}", quantity_label(quantity)),
                    format!("EL {}°", value),
                    Some(Level::Elevation(self.value)),
                    quantity.data_type(),
                ),
            };

        Ok(ProductDescriptor {
            timestamp: self.timestamp,
            site: self.site,
            product_type,
            product_subtype,
            data_type,
            data_unit: data_unit(data_type).to_string(),
            level,
            composite: self.composite,
            data_scale: resolve_data_scale(data_type),
            raw_identifier: raw.to_string(),
            source,
            product: kind,
            quantity: self.quantity,
        })
    }
}

type Shape = (ProductKind, String, String, Option<Level>, DataType);

fn cappi(parts: &DescriptorParts, value: &str) -> Shape {
    (
        ProductKind::Cappi,
        format!("CAPPI {}", quantity_label(&parts.quantity)),
        format!("H {} m", value),
        Some(Level::Height(parts.value)),
        parts.quantity.data_type(),
    )
}

fn product_name(product: ProductToken, composite: bool) -> &'static str {
    match (product, composite) {
        (ProductToken::Ppi, false) => "ppi",
        (ProductToken::Cappi, false) => "cappi",
        (ProductToken::Etop, false) => "etop",
        (ProductToken::Ppi, true) => "composite_ppi",
        (ProductToken::Cappi, true) => "composite_cappi",
        (ProductToken::Etop, true) => "composite_etop",
    }
}

fn validate_site(site: &str) -> Result<(), ParseFailure> {
    if site.is_empty() || !site.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return Err(ParseFailure::InvalidSite(site.to_string()));
    }
    Ok(())
}
