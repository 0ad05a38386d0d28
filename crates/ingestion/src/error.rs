//! Error types for the ingestion crate.

use radar_common::SourceFormat;
use thiserror::Error;

/// Why a single identifier could not be parsed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseFailure {
    #[error("empty identifier")]
    Empty,

    #[error("expected at least {expected} '_'-separated tokens, found {found}")]
    TooFewTokens { expected: usize, found: usize },

    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("invalid site token '{0}'")]
    InvalidSite(String),

    #[error("unhandled product token '{0}'")]
    UnhandledProduct(String),

    #[error("unknown datatype token '{0}'")]
    UnknownDatatype(String),

    #[error("invalid numeric value '{0}'")]
    InvalidValue(String),

    #[error("invalid accumulation duration '{0}'")]
    InvalidDuration(String),

    #[error("product '{product}' cannot carry datatype '{datatype}'")]
    Incompatible { product: String, datatype: String },

    #[error("missing required field '{0}'")]
    MissingField(String),

    #[error("both elevation and height given")]
    ConflictingLevels,

    #[error("only one layer per identifier is supported, got '{0}'")]
    MultipleLayers(String),

    #[error("invalid date prefix '{0}'")]
    InvalidDatePrefix(String),

    #[error("date prefix {prefix} does not match timestamp date {timestamp}")]
    DateMismatch { prefix: String, timestamp: String },
}

impl ParseFailure {
    /// Stable short name, used to bucket failures in batch summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            ParseFailure::Empty => "empty",
            ParseFailure::TooFewTokens { .. } => "too_few_tokens",
            ParseFailure::InvalidTimestamp(_) => "invalid_timestamp",
            ParseFailure::InvalidSite(_) => "invalid_site",
            ParseFailure::UnhandledProduct(_) => "unhandled_product",
            ParseFailure::UnknownDatatype(_) => "unknown_datatype",
            ParseFailure::InvalidValue(_) => "invalid_value",
            ParseFailure::InvalidDuration(_) => "invalid_duration",
            ParseFailure::Incompatible { .. } => "incompatible",
            ParseFailure::MissingField(_) => "missing_field",
            ParseFailure::ConflictingLevels => "conflicting_levels",
            ParseFailure::MultipleLayers(_) => "multiple_layers",
            ParseFailure::InvalidDatePrefix(_) => "invalid_date_prefix",
            ParseFailure::DateMismatch { .. } => "date_mismatch",
        }
    }
}

/// A failed parse, carrying the offending input for diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Failed to parse {format} identifier '{raw}': {reason}")]
pub struct ParseError {
    pub raw: String,
    pub format: SourceFormat,
    #[source]
    pub reason: ParseFailure,
}

/// Errors reading a WMS capabilities document.
#[derive(Error, Debug)]
pub enum CapabilitiesError {
    #[error("XML parsing error at position {position}: {source}")]
    Xml {
        position: usize,
        #[source]
        source: quick_xml::Error,
    },
}

/// Result type for identifier parsing.
pub type Result<T> = std::result::Result<T, ParseError>;
