//! Catalog and latest-download runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use catalog::{
    aggregate, aggregate_partitioned, pending_downloads, select_latest_parallel, to_json_string,
    AggregationReport, ArtifactName, Catalog, CatalogItem,
};
use chrono::{DateTime, Utc};
use ingestion::{parse_batch, partition_outcomes, BatchSummary, RawIdentifier};
use radar_common::{ProductDescriptor, SiteDirectory, SourceFormat};
use serde::Serialize;
use tracing::{info, warn};

/// Parse a batch, logging its summary. Failures are dropped.
pub fn parse_inputs(raws: &[RawIdentifier]) -> (Vec<ProductDescriptor>, BatchSummary) {
    let outcomes = parse_batch(raws);
    let summary = BatchSummary::from_outcomes(&outcomes);
    summary.log();
    let (descriptors, _) = partition_outcomes(outcomes);
    (descriptors, summary)
}

/// Result of a catalog run.
#[derive(Debug)]
pub struct CatalogBuild {
    pub catalog: Catalog,
    pub parse_summary: BatchSummary,
    pub report: AggregationReport,
    /// Descriptors that could not be given an artifact name
    pub unnameable: usize,
}

pub fn build_catalog<D: SiteDirectory + Sync>(
    raws: &[RawIdentifier],
    directory: &D,
    partitioned: bool,
) -> CatalogBuild {
    let (descriptors, parse_summary) = parse_inputs(raws);

    let mut unnameable = 0;
    let items: Vec<CatalogItem> = descriptors
        .into_iter()
        .filter_map(|descriptor| match CatalogItem::from_descriptor(descriptor) {
            Ok(item) => Some(item),
            Err(e) => {
                warn!(error = %e, "Skipping descriptor");
                unnameable += 1;
                None
            }
        })
        .collect();

    let (catalog, report) = if partitioned {
        aggregate_partitioned(items, directory)
    } else {
        aggregate(items, directory)
    };
    report.log();

    CatalogBuild {
        catalog,
        parse_summary,
        report,
        unnameable,
    }
}

/// Write the catalog document so readers never observe a partial file.
pub fn write_catalog(catalog: &Catalog, path: &Path, pretty: bool) -> Result<()> {
    let json = to_json_string(catalog, pretty).context("Failed to render catalog")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }

    let tmp = temporary_path(path);
    fs::write(&tmp, json).with_context(|| format!("Failed to write {:?}", tmp))?;
    fs::rename(&tmp, path).with_context(|| format!("Failed to move {:?} to {:?}", tmp, path))?;

    info!(path = ?path, sites = catalog.sites().len(), entries = catalog.entry_count(), "Catalog written");
    Ok(())
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// A latest observation that still has to be fetched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingDownload {
    pub site: String,
    pub product_type: String,
    pub product_subtype: String,
    pub time: DateTime<Utc>,
    pub source: SourceFormat,
    pub locator: String,
    pub metadata_file: Option<String>,
    pub data_file: Option<String>,
}

impl PendingDownload {
    fn new(locator: String, descriptor: &ProductDescriptor) -> Self {
        let name = ArtifactName::for_descriptor(descriptor);
        Self {
            site: descriptor.site.clone(),
            product_type: descriptor.product_type.clone(),
            product_subtype: descriptor.product_subtype.clone(),
            time: descriptor.timestamp,
            source: descriptor.source,
            locator,
            metadata_file: name.as_ref().map(ArtifactName::metadata),
            data_file: name.as_ref().map(ArtifactName::compressed_raster),
        }
    }
}

/// Latest observation per product whose sidecar is not yet in `output_dir`.
pub fn select_pending(raws: &[RawIdentifier], output_dir: &Path) -> Vec<PendingDownload> {
    let (descriptors, _) = parse_inputs(raws);
    let selection = select_latest_parallel(
        descriptors
            .into_iter()
            .map(|d| (d.raw_identifier.clone(), d))
            .collect(),
    );
    let selected = selection.len();

    let pending: Vec<PendingDownload> =
        pending_downloads(selection, |sidecar| output_dir.join(sidecar).exists())
            .into_iter()
            .map(|s| PendingDownload::new(s.locator, &s.descriptor))
            .collect();

    info!(selected, pending = pending.len(), "Selected latest products");
    pending
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_path_is_a_sibling() {
        assert_eq!(
            temporary_path(Path::new("/data/radar/catalog.json")),
            PathBuf::from("/data/radar/catalog.json.tmp")
        );
    }
}
