//! Radar product catalog.
//!
//! Builds the site → product → flavor → time catalog from parsed
//! descriptors, selects the latest observation per product, and renders the
//! catalog as the JSON document served to web clients.

pub mod aggregator;
pub mod error;
pub mod latest;
pub mod model;
pub mod naming;
pub mod product_info;
pub mod serializer;

// Re-exports
pub use aggregator::{
    aggregate, aggregate_partitioned, AggregationReport, CatalogAggregator, CatalogItem,
};
pub use error::{CatalogError, Result};
pub use latest::{
    pending_downloads, select_latest, select_latest_parallel, LatestSelection, Selected,
    SelectionKey,
};
pub use model::{
    Catalog, Flavor, InsertOutcome, MergeConflict, MergeSummary, ProductNode, SiteNode, Slot,
    TimeEntry, RADAR_RASTER_TYPE,
};
pub use naming::ArtifactName;
pub use product_info::{ProductInfo, ScaleInfo};
pub use serializer::{
    camel_case, camelize_keys, render_catalog, render_catalog_document, to_json_string,
};
