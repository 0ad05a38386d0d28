//! WMS layers with their dimensions, as a GetMap-style query string.
//!
//! ```text
//! LAYERS=[ns:]{site}_{product}&TIME={iso8601}[&ELEVATION={deg}|&HEIGHT={m}]
//! ```
//!
//! Products: a datatype (`dbz`, `dbzh`, `vrad`, `hclass`) sampled at an
//! ELEVATION (PPI) or HEIGHT (CAPPI), `etop_{threshold}`, and the composite
//! accumulations `rr{duration}` / `acrr{duration}` at a HEIGHT.

use radar_common::{parse_iso8601, ProductDescriptor, Quantity, SourceFormat};

use super::{optional, query_fields, required, IdentifierFormat};
use crate::descriptor::DescriptorParts;
use crate::error::ParseFailure;
use crate::tables::{accumulation, datatype_token, is_composite_site, numeric_value, ProductToken};

pub(crate) const LAYERS: &str = "layers";
pub(crate) const TIME: &str = "time";
pub(crate) const ELEVATION: &str = "elevation";
pub(crate) const HEIGHT: &str = "height";

#[derive(Debug, Clone, Copy, Default)]
pub struct WmsLayerFormat;

impl IdentifierFormat for WmsLayerFormat {
    fn source(&self) -> SourceFormat {
        SourceFormat::WmsLayer
    }

    fn parse(&self, raw: &str) -> Result<ProductDescriptor, ParseFailure> {
        let fields = query_fields(raw);

        let layers = required(&fields, LAYERS)?;
        if layers.contains(',') {
            return Err(ParseFailure::MultipleLayers(layers.to_string()));
        }
        let layer = layers.rsplit(':').next().unwrap_or(layers).to_ascii_lowercase();
        let (site, product) = layer
            .split_once('_')
            .ok_or_else(|| ParseFailure::UnhandledProduct(layer.clone()))?;

        let time = required(&fields, TIME)?;
        let timestamp =
            parse_iso8601(time).map_err(|_| ParseFailure::InvalidTimestamp(time.to_string()))?;

        let elevation = optional(&fields, ELEVATION).map(numeric_value).transpose()?;
        let height = optional(&fields, HEIGHT).map(numeric_value).transpose()?;
        if elevation.is_some() && height.is_some() {
            return Err(ParseFailure::ConflictingLevels);
        }

        let parts = |product, value, quantity, composite| DescriptorParts {
            timestamp,
            site: site.to_string(),
            product,
            value,
            quantity,
            composite,
        };

        let composite = is_composite_site(site);
        let parts = if let Some(threshold) = product.strip_prefix("etop_") {
            parts(ProductToken::Etop, numeric_value(threshold)?, Quantity::Dbzh, composite)
        } else if let Some(duration) = accumulation_duration(product) {
            let quantity = accumulation(duration)?;
            let height = height.ok_or_else(|| ParseFailure::MissingField(HEIGHT.to_string()))?;
            parts(ProductToken::Cappi, height, quantity, true)
        } else {
            let quantity = match product {
                "dbz" => Quantity::Dbzh,
                other => datatype_token(other)
                    .map_err(|_| ParseFailure::UnhandledProduct(other.to_string()))?,
            };
            match (elevation, height) {
                (Some(elevation), _) => parts(ProductToken::Ppi, elevation, quantity, composite),
                (None, Some(height)) => parts(ProductToken::Cappi, height, quantity, composite),
                (None, None) => return Err(ParseFailure::MissingField(ELEVATION.to_string())),
            }
        };

        parts.build(raw, SourceFormat::WmsLayer)
    }
}

fn accumulation_duration(product: &str) -> Option<&str> {
    product
        .strip_prefix("acrr")
        .or_else(|| product.strip_prefix("rr"))
}
