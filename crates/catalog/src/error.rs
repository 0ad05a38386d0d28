//! Error types for the catalog crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Cannot derive an artifact name for '{0}'")]
    Unnameable(String),

    #[error("Failed to serialize catalog: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
