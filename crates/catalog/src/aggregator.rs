//! Folding parsed descriptors into a [`Catalog`].

use std::collections::{BTreeMap, BTreeSet};

use radar_common::{ProductDescriptor, SiteDirectory, SiteLookupError};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{CatalogError, Result};
use crate::model::{Catalog, InsertOutcome, MergeConflict, SiteNode, Slot, TimeEntry};
use crate::naming::ArtifactName;
use crate::product_info::ProductInfo;

/// A descriptor with its artifact locator and product-info payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem {
    pub descriptor: ProductDescriptor,
    pub url: String,
    pub product_info: Value,
}

impl CatalogItem {
    pub fn new(descriptor: ProductDescriptor, url: impl Into<String>, product_info: Value) -> Self {
        Self {
            descriptor,
            url: url.into(),
            product_info,
        }
    }

    /// Item with the derived download url and the default product info.
    pub fn from_descriptor(descriptor: ProductDescriptor) -> Result<Self> {
        let name = ArtifactName::for_descriptor(&descriptor)
            .ok_or_else(|| CatalogError::Unnameable(descriptor.raw_identifier.clone()))?;
        let product_info = ProductInfo::from_descriptor(&descriptor).to_value()?;
        Ok(Self::new(descriptor, name.download_url(), product_info))
    }
}

/// What an aggregation run did.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub conflicts: Vec<MergeConflict>,
    /// Sites the directory could not resolve; they are cataloged by id only
    pub unknown_sites: BTreeSet<String>,
    /// Entries whose descriptor has no data scale
    pub unscaled: usize,
}

impl AggregationReport {
    pub fn absorb(&mut self, other: AggregationReport) {
        self.inserted += other.inserted;
        self.duplicates += other.duplicates;
        self.conflicts.extend(other.conflicts);
        self.unknown_sites.extend(other.unknown_sites);
        self.unscaled += other.unscaled;
    }

    pub fn log(&self) {
        info!(
            inserted = self.inserted,
            duplicates = self.duplicates,
            conflicts = self.conflicts.len(),
            unknown_sites = self.unknown_sites.len(),
            unscaled = self.unscaled,
            "Catalog aggregated"
        );
    }
}

/// Single-owner catalog builder.
pub struct CatalogAggregator<D> {
    directory: D,
    catalog: Catalog,
    report: AggregationReport,
}

impl<D: SiteDirectory> CatalogAggregator<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            catalog: Catalog::new(),
            report: AggregationReport::default(),
        }
    }

    pub fn add(&mut self, item: CatalogItem) {
        let CatalogItem {
            descriptor,
            url,
            product_info,
        } = item;

        let directory = &self.directory;
        let unknown_sites = &mut self.report.unknown_sites;
        let site = self.catalog.site_or_insert_with(&descriptor.site, || {
            resolve_site(directory, &descriptor.site, unknown_sites)
        });

        let flavor_key = descriptor.flavor_key();
        let flavor = site
            .product_mut(&descriptor.product_type, &descriptor.product_type)
            .flavor_mut(&flavor_key);

        let new_url = url.clone();
        let outcome = flavor.insert(TimeEntry {
            time: descriptor.timestamp,
            url,
            product_info,
        });

        match outcome {
            InsertOutcome::Inserted => {
                self.report.inserted += 1;
                if descriptor.data_scale.is_none() {
                    self.report.unscaled += 1;
                }
            }
            InsertOutcome::Duplicate => {
                debug!(raw = %descriptor.raw_identifier, "Duplicate catalog entry ignored");
                self.report.duplicates += 1;
            }
            InsertOutcome::Replaced(previous) => {
                warn!(
                    site = %descriptor.site,
                    product = %descriptor.product_type,
                    flavor = %flavor_key,
                    time = %descriptor.timestamp,
                    previous = %previous.url,
                    url = %new_url,
                    "Conflicting catalog entry, keeping the later one"
                );
                self.report.conflicts.push(MergeConflict {
                    slot: Slot {
                        site: descriptor.site.clone(),
                        product: descriptor.product_type.clone(),
                        flavor: flavor_key,
                        time: descriptor.timestamp,
                    },
                    previous_url: previous.url,
                    url: new_url,
                });
            }
        }
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = CatalogItem>) {
        for item in items {
            self.add(item);
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn finish(self) -> (Catalog, AggregationReport) {
        (self.catalog, self.report)
    }
}

fn resolve_site<D: SiteDirectory>(
    directory: &D,
    site_id: &str,
    unknown_sites: &mut BTreeSet<String>,
) -> SiteNode {
    match directory.lookup(site_id) {
        Ok(info) => SiteNode::new(info.display_name, Some(info.longitude), Some(info.latitude)),
        Err(err) => {
            match &err {
                SiteLookupError::NotFound(_) => warn!(site = %site_id, "Unknown site, cataloging by id"),
                SiteLookupError::Unavailable { .. } => {
                    warn!(site = %site_id, error = %err, "Site directory unavailable, cataloging by id")
                }
            }
            unknown_sites.insert(site_id.to_string());
            SiteNode::new(site_id, None, None)
        }
    }
}

/// Aggregate items in order.
pub fn aggregate<D: SiteDirectory>(
    items: impl IntoIterator<Item = CatalogItem>,
    directory: D,
) -> (Catalog, AggregationReport) {
    let mut aggregator = CatalogAggregator::new(directory);
    aggregator.extend(items);
    aggregator.finish()
}

/// Aggregate per site in parallel, then merge.
///
/// Items of one site keep their relative order, so the catalog equals the
/// one [`aggregate`] builds from the same input.
pub fn aggregate_partitioned<D: SiteDirectory + Sync>(
    items: Vec<CatalogItem>,
    directory: &D,
) -> (Catalog, AggregationReport) {
    let mut partitions: BTreeMap<String, Vec<CatalogItem>> = BTreeMap::new();
    for item in items {
        partitions
            .entry(item.descriptor.site.clone())
            .or_default()
            .push(item);
    }

    let partials: Vec<(Catalog, AggregationReport)> = partitions
        .into_par_iter()
        .map(|(_, items)| aggregate(items, directory))
        .collect();

    let mut catalog = Catalog::new();
    let mut report = AggregationReport::default();
    for (partial, partial_report) in partials {
        // Partitions are disjoint by site, so merging cannot collide.
        catalog.merge(partial);
        report.absorb(partial_report);
    }

    (catalog, report)
}
