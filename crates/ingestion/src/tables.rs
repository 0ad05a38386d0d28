//! Closed code tables for radar identifier tokens.
//!
//! Every token an identifier may carry is listed here. Anything not in a
//! table is a parse failure, never a silent default.

use radar_common::{DataType, Quantity};

use crate::error::ParseFailure;

// ============================================================================
// Product tokens
// ============================================================================

/// Product family token of the filename grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductToken {
    Ppi,
    Cappi,
    Etop,
}

/// Token that marks a multi-radar product in file names.
pub const COMPOSITE_TOKEN: &str = "composite";

/// Qualifier appended to rendered identifiers (quality-controlled data).
pub const QC_QUALIFIER: &str = "qc";

/// Sites that only publish multi-radar composites.
pub const COMPOSITE_SITES: [&str; 2] = ["finrad", "finradfast"];

pub fn is_composite_site(site: &str) -> bool {
    COMPOSITE_SITES.contains(&site)
}

pub fn product_token(token: &str) -> Result<ProductToken, ParseFailure> {
    match token {
        "ppi" => Ok(ProductToken::Ppi),
        "cappi" => Ok(ProductToken::Cappi),
        "etop" => Ok(ProductToken::Etop),
        other => Err(ParseFailure::UnhandledProduct(other.to_string())),
    }
}

// ============================================================================
// Datatype tokens
// ============================================================================

const ACCUMULATION_PREFIX: &str = "acrr";
const DURATION_UNITS: [&str; 3] = ["min", "h", "d"];

/// Normalize a datatype token: dbzh, hclass, vrad or acrr{duration}.
pub fn datatype_token(token: &str) -> Result<Quantity, ParseFailure> {
    match token {
        "dbzh" => Ok(Quantity::Dbzh),
        "hclass" => Ok(Quantity::Hclass),
        "vrad" => Ok(Quantity::Vrad),
        _ => match token.strip_prefix(ACCUMULATION_PREFIX) {
            Some(duration) => accumulation(duration),
            None => Err(ParseFailure::UnknownDatatype(token.to_string())),
        },
    }
}

/// Build an accumulation quantity from a duration like `1h`, `12h`, `15min`, `1d`.
pub fn accumulation(duration: &str) -> Result<Quantity, ParseFailure> {
    let digits_end = duration
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(duration.len());
    let (count, unit) = duration.split_at(digits_end);

    if count.is_empty() || !DURATION_UNITS.contains(&unit) {
        return Err(ParseFailure::InvalidDuration(duration.to_string()));
    }

    Ok(Quantity::Accumulation {
        duration: duration.to_string(),
    })
}

/// Canonical unit of a data type.
pub fn data_unit(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Z => "dbZ",
        DataType::Hclass => "hclass",
        DataType::V => "m/s",
        DataType::Rr => "mm",
        DataType::Height => "km",
    }
}

/// How a quantity is written in product display names ("PPI dbZh").
pub fn quantity_label(quantity: &Quantity) -> &'static str {
    match quantity {
        Quantity::Dbzh => "dbZh",
        Quantity::Hclass => "hclass",
        Quantity::Vrad => "vrad",
        Quantity::Accumulation { .. } => "ACRR",
    }
}

/// Parse a level or threshold token. The sign is kept.
pub fn numeric_value(token: &str) -> Result<f64, ParseFailure> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseFailure::InvalidValue(token.to_string()))
}
