//! WFS feature records, form-encoded.
//!
//! Fields: `radar`, `product` (`ppi`, `cappi`, `etop`, `composite_cappi`),
//! `parameter` (datatype token), `time`, and one of `elevation`, `height`
//! or `threshold` depending on the product.

use radar_common::{parse_iso8601, ProductDescriptor, SourceFormat};

use super::{query_fields, required, IdentifierFormat};
use crate::descriptor::DescriptorParts;
use crate::error::ParseFailure;
use crate::tables::{datatype_token, is_composite_site, numeric_value, ProductToken};

#[derive(Debug, Clone, Copy, Default)]
pub struct WfsFeatureFormat;

impl IdentifierFormat for WfsFeatureFormat {
    fn source(&self) -> SourceFormat {
        SourceFormat::WfsFeature
    }

    fn parse(&self, raw: &str) -> Result<ProductDescriptor, ParseFailure> {
        let fields = query_fields(raw);

        let site = required(&fields, "radar")?.to_ascii_lowercase();
        let product = required(&fields, "product")?.to_ascii_lowercase();
        let quantity = datatype_token(&required(&fields, "parameter")?.to_ascii_lowercase())?;

        let time = required(&fields, "time")?;
        let timestamp =
            parse_iso8601(time).map_err(|_| ParseFailure::InvalidTimestamp(time.to_string()))?;

        let composite_site = is_composite_site(&site);
        let (product, level_field, composite) = match product.as_str() {
            "ppi" => (ProductToken::Ppi, "elevation", composite_site),
            "cappi" => (ProductToken::Cappi, "height", composite_site),
            "etop" => (ProductToken::Etop, "threshold", composite_site),
            "composite_cappi" => (ProductToken::Cappi, "height", true),
            other => return Err(ParseFailure::UnhandledProduct(other.to_string())),
        };
        let value = numeric_value(required(&fields, level_field)?)?;

        DescriptorParts {
            timestamp,
            site,
            product,
            value,
            quantity,
            composite,
        }
        .build(raw, SourceFormat::WfsFeature)
    }
}
