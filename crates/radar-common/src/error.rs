//! Error types for site directory access.

use thiserror::Error;

/// Failure to resolve a site id through a [`SiteDirectory`](crate::SiteDirectory).
///
/// Always recoverable: callers fall back to an id-only site record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SiteLookupError {
    #[error("Unknown site: {0}")]
    NotFound(String),

    #[error("Site directory unavailable while resolving '{site}': {message}")]
    Unavailable { site: String, message: String },
}

impl SiteLookupError {
    /// Site id the lookup was made for.
    pub fn site(&self) -> &str {
        match self {
            SiteLookupError::NotFound(site) => site,
            SiteLookupError::Unavailable { site, .. } => site,
        }
    }
}

/// Errors raised while building a static site directory.
#[derive(Debug, Error)]
pub enum SiteDirectoryError {
    #[error("Failed to parse site directory YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Duplicate site id in directory: {0}")]
    DuplicateSite(String),

    #[error("Invalid coordinates for site '{site}': lon={lon}, lat={lat}")]
    InvalidCoordinates { site: String, lon: f64, lat: f64 },
}
