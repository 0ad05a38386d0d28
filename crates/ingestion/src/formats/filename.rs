//! Product file name grammar.
//!
//! ```text
//! {timestamp}_{site}_{product}_{value}_{datatype}_{qualifier...}[.ext]
//! {timestamp}_composite_cappi_{value}_{datatype}_{site}_{qualifier...}[.ext]
//! ```
//!
//! e.g. `202601240000_fikau_ppi_0.3_dbzh_qc.tif` or
//! `202601240000_composite_cappi_600_acrr1h_finradfast_qc.tif`.

use radar_common::{parse_compact, ProductDescriptor, SourceFormat};

use super::IdentifierFormat;
use crate::descriptor::DescriptorParts;
use crate::error::ParseFailure;
use crate::tables::{
    datatype_token, is_composite_site, numeric_value, product_token, COMPOSITE_TOKEN, QC_QUALIFIER,
};

const MIN_TOKENS: usize = 5;
const MIN_COMPOSITE_TOKENS: usize = 6;

/// Paths found by scanning a product directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanFormat;

impl IdentifierFormat for DirectoryScanFormat {
    fn source(&self) -> SourceFormat {
        SourceFormat::DirectoryScan
    }

    fn parse(&self, raw: &str) -> Result<ProductDescriptor, ParseFailure> {
        let basename = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
        parse_filename(basename, raw, SourceFormat::DirectoryScan)
    }
}

/// Strip trailing file extensions (`.tif`, `.tiff.gz`, `.json`).
///
/// Only purely alphanumeric suffixes containing a letter count as
/// extensions, so the decimal point in `_0.3_dbzh_qc` is left alone.
pub fn strip_extensions(name: &str) -> &str {
    let mut stem = name;
    while let Some((head, ext)) = stem.rsplit_once('.') {
        let is_extension = !ext.is_empty()
            && ext.bytes().all(|b| b.is_ascii_alphanumeric())
            && ext.bytes().any(|b| b.is_ascii_alphabetic());
        if !is_extension || head.is_empty() {
            break;
        }
        stem = head;
    }
    stem
}

/// Parse a bare file name. `raw` is what gets recorded as the identifier.
pub fn parse_filename(
    name: &str,
    raw: &str,
    source: SourceFormat,
) -> Result<ProductDescriptor, ParseFailure> {
    let stem = strip_extensions(name);
    let tokens: Vec<&str> = stem.split('_').collect();

    let timestamp =
        parse_compact(tokens[0]).map_err(|_| ParseFailure::InvalidTimestamp(tokens[0].to_string()))?;

    let parts = if tokens.get(1) == Some(&COMPOSITE_TOKEN) {
        composite_parts(&tokens, timestamp)?
    } else {
        single_site_parts(&tokens, timestamp)?
    };

    parts.build(raw, source)
}

fn single_site_parts(
    tokens: &[&str],
    timestamp: chrono::DateTime<chrono::Utc>,
) -> Result<DescriptorParts, ParseFailure> {
    if tokens.len() < MIN_TOKENS {
        return Err(ParseFailure::TooFewTokens {
            expected: MIN_TOKENS,
            found: tokens.len(),
        });
    }

    Ok(DescriptorParts {
        timestamp,
        site: tokens[1].to_string(),
        product: product_token(tokens[2])?,
        value: numeric_value(tokens[3])?,
        quantity: datatype_token(tokens[4])?,
        composite: is_composite_site(tokens[1]),
    })
}

fn composite_parts(
    tokens: &[&str],
    timestamp: chrono::DateTime<chrono::Utc>,
) -> Result<DescriptorParts, ParseFailure> {
    if tokens.len() < MIN_COMPOSITE_TOKENS {
        return Err(ParseFailure::TooFewTokens {
            expected: MIN_COMPOSITE_TOKENS,
            found: tokens.len(),
        });
    }

    if tokens[2] != "cappi" {
        return Err(ParseFailure::UnhandledProduct(format!(
            "{}_{}",
            COMPOSITE_TOKEN, tokens[2]
        )));
    }

    // The site precedes the qualifiers.
    if tokens[5] == QC_QUALIFIER {
        return Err(ParseFailure::InvalidSite(tokens[5].to_string()));
    }

    Ok(DescriptorParts {
        timestamp,
        site: tokens[5].to_string(),
        product: product_token(tokens[2])?,
        value: numeric_value(tokens[3])?,
        quantity: datatype_token(tokens[4])?,
        composite: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_common::{DataType, Level, ProductKind};

    #[test]
    fn test_strip_extensions() {
        assert_eq!(
            strip_extensions("202601240000_fikau_ppi_0.3_dbzh_qc.tif"),
            "202601240000_fikau_ppi_0.3_dbzh_qc"
        );
        assert_eq!(
            strip_extensions("202601240000_fikau_ppi_0.3_dbzh_qc.tiff.gz"),
            "202601240000_fikau_ppi_0.3_dbzh_qc"
        );
        assert_eq!(
            strip_extensions("202601240000_fikau_ppi_0.3_dbzh_qc"),
            "202601240000_fikau_ppi_0.3_dbzh_qc"
        );
        assert_eq!(strip_extensions("x_0.5"), "x_0.5");
        assert_eq!(strip_extensions(".hidden"), ".hidden");
    }

    #[test]
    fn test_directory_scan_uses_basename() {
        let d = DirectoryScanFormat
            .parse("/data/radar/2026/1/24/202601240000_fivan_cappi_600_dbzh_qc.tiff.gz")
            .unwrap();
        assert_eq!(d.site, "fivan");
        assert_eq!(d.product, ProductKind::Cappi);
        assert_eq!(d.level, Some(Level::Height(600.0)));
        assert_eq!(
            d.raw_identifier,
            "/data/radar/2026/1/24/202601240000_fivan_cappi_600_dbzh_qc.tiff.gz"
        );
    }

    #[test]
    fn test_qualifiers_are_optional() {
        let d = DirectoryScanFormat
            .parse("202601240000_fikau_etop_20_dbzh.tif")
            .unwrap();
        assert_eq!(d.data_type, DataType::Height);
        assert_eq!(d.product_subtype, "THR 20");
    }

    #[test]
    fn test_composite_requires_cappi() {
        let err = DirectoryScanFormat
            .parse("202601240000_composite_ppi_0.3_dbzh_finrad_qc.tif")
            .unwrap_err();
        assert_eq!(err, ParseFailure::UnhandledProduct("composite_ppi".to_string()));
    }

    #[test]
    fn test_composite_without_site_is_rejected() {
        let err = DirectoryScanFormat
            .parse("202601240000_composite_cappi_600_dbzh_qc.tif")
            .unwrap_err();
        assert_eq!(err, ParseFailure::InvalidSite("qc".to_string()));
    }

    #[test]
    fn test_too_few_tokens() {
        let err = DirectoryScanFormat.parse("202601240000_fikau_ppi.tif").unwrap_err();
        assert_eq!(err, ParseFailure::TooFewTokens { expected: 5, found: 3 });

        let err = DirectoryScanFormat
            .parse("202601240000_composite_cappi_600_dbzh.tif")
            .unwrap_err();
        assert_eq!(err, ParseFailure::TooFewTokens { expected: 6, found: 5 });
    }

    #[test]
    fn test_bad_timestamp() {
        let err = DirectoryScanFormat
            .parse("fikau_202601240000_ppi_0.3_dbzh_qc.tif")
            .unwrap_err();
        assert_eq!(err, ParseFailure::InvalidTimestamp("fikau".to_string()));
    }
}
