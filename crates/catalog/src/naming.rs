//! Derived artifact names.
//!
//! Every product has a base name from which its sibling files are named:
//! `{base}.json` (metadata sidecar), `{base}.tiff` (raster) and
//! `{base}.tiff.gz` (compressed raster, the catalog download url).

use ingestion::{render_identifier, strip_extensions};
use radar_common::ProductDescriptor;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const METADATA_SUFFIX: &str = ".json";
pub const RASTER_SUFFIX: &str = ".tiff";
pub const COMPRESSED_RASTER_SUFFIX: &str = ".tiff.gz";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactName {
    base: String,
}

impl ArtifactName {
    pub fn from_base(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    /// Base name for a descriptor.
    ///
    /// File-based identifiers keep their own name minus directories and
    /// extensions; WMS/WFS identifiers get the canonical file name.
    pub fn for_descriptor(descriptor: &ProductDescriptor) -> Option<Self> {
        if descriptor.source.is_file_based() {
            let raw = descriptor.raw_identifier.as_str();
            let file_name = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
            let base = strip_extensions(file_name);
            (!base.is_empty()).then(|| Self::from_base(base))
        } else {
            render_identifier(descriptor).map(Self::from_base)
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn metadata(&self) -> String {
        format!("{}{}", self.base, METADATA_SUFFIX)
    }

    pub fn raster(&self) -> String {
        format!("{}{}", self.base, RASTER_SUFFIX)
    }

    pub fn compressed_raster(&self) -> String {
        format!("{}{}", self.base, COMPRESSED_RASTER_SUFFIX)
    }

    /// Relative url the catalog publishes for this product.
    pub fn download_url(&self) -> String {
        self.compressed_raster()
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
