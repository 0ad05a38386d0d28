//! Catalog builder service library.
//!
//! Reads radar product identifiers, builds the product catalog served to
//! web clients, and lists the latest products that still need downloading.

pub mod config;
pub mod config_loader;
pub mod inputs;
pub mod pipeline;
