//! Canonical file-name rendering of descriptors.

use radar_common::{format_compact, format_number, ProductDescriptor, ProductKind};

use crate::tables::{COMPOSITE_TOKEN, QC_QUALIFIER};

/// Render a descriptor in the file-name grammar, without extension.
///
/// Parsing the result as a directory-scan identifier yields the same site,
/// product type and product subtype. Returns `None` for a PPI or CAPPI
/// descriptor that carries no level, which the grammar cannot express.
pub fn render_identifier(descriptor: &ProductDescriptor) -> Option<String> {
    let value = match descriptor.product {
        ProductKind::EchoTop { threshold } => threshold,
        ProductKind::Ppi | ProductKind::Cappi => descriptor.level?.value(),
    };

    let timestamp = format_compact(&descriptor.timestamp);
    let value = format_number(value);
    let quantity = descriptor.quantity.token();

    let rendered = if descriptor.composite {
        format!(
            "{}_{}_{}_{}_{}_{}_{}",
            timestamp,
            COMPOSITE_TOKEN,
            descriptor.product.token(),
            value,
            quantity,
            descriptor.site,
            QC_QUALIFIER
        )
    } else {
        format!(
            "{}_{}_{}_{}_{}_{}",
            timestamp,
            descriptor.site,
            descriptor.product.token(),
            value,
            quantity,
            QC_QUALIFIER
        )
    };

    Some(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_identifier;
    use radar_common::SourceFormat;

    #[test]
    fn test_render_wms_layer() {
        let d = parse_identifier(
            "LAYERS=fikau_dbzh&TIME=2026-01-24T00:05:00Z&ELEVATION=0.3",
            SourceFormat::WmsLayer,
        )
        .unwrap();
        assert_eq!(
            render_identifier(&d).unwrap(),
            "202601240005_fikau_ppi_0.3_dbzh_qc"
        );
    }

    #[test]
    fn test_render_composite() {
        let d = parse_identifier(
            "202601240000_composite_cappi_600_acrr1h_finradfast_qc.tif",
            SourceFormat::DirectoryScan,
        )
        .unwrap();
        assert_eq!(
            render_identifier(&d).unwrap(),
            "202601240000_composite_cappi_600_acrr1h_finradfast_qc"
        );
    }

    #[test]
    fn test_levelless_ppi_cannot_render() {
        let mut d = parse_identifier(
            "202601240000_fikau_ppi_0.3_dbzh_qc.tif",
            SourceFormat::DirectoryScan,
        )
        .unwrap();
        d.level = None;
        assert_eq!(render_identifier(&d), None);
    }
}
