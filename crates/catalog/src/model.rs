//! In-memory catalog tree: site → product → flavor → time entries.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flavor `type` published for every radar raster.
pub const RADAR_RASTER_TYPE: &str = "RADAR RASTER";

/// One product observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntry {
    pub time: DateTime<Utc>,
    pub url: String,
    pub product_info: Value,
}

/// What happened when an entry was inserted into a flavor.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertOutcome {
    Inserted,
    /// Same time, url and payload already present
    Duplicate,
    /// Same time with a different url or payload; the new entry replaced this one
    Replaced(TimeEntry),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flavor {
    pub display: String,
    pub kind: String,
    times: Vec<TimeEntry>,
}

impl Flavor {
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            kind: RADAR_RASTER_TYPE.to_string(),
            times: Vec::new(),
        }
    }

    /// Entries in ascending time order.
    pub fn times(&self) -> &[TimeEntry] {
        &self.times
    }

    /// Insert keeping `times` sorted. Equal times collide; the later write wins.
    pub fn insert(&mut self, entry: TimeEntry) -> InsertOutcome {
        let upper = self.times.partition_point(|e| e.time <= entry.time);

        if upper > 0 && self.times[upper - 1].time == entry.time {
            let existing = &mut self.times[upper - 1];
            if existing.url == entry.url && existing.product_info == entry.product_info {
                return InsertOutcome::Duplicate;
            }
            return InsertOutcome::Replaced(std::mem::replace(existing, entry));
        }

        self.times.insert(upper, entry);
        InsertOutcome::Inserted
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductNode {
    pub display: String,
    pub flavors: BTreeMap<String, Flavor>,
}

impl ProductNode {
    pub fn new(display: impl Into<String>) -> Self {
        Self {
            display: display.into(),
            flavors: BTreeMap::new(),
        }
    }

    pub fn flavor_mut(&mut self, key: &str) -> &mut Flavor {
        self.flavors
            .entry(key.to_string())
            .or_insert_with(|| Flavor::new(key))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteNode {
    pub display: String,
    /// `None` when the site directory did not know the site
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub products: BTreeMap<String, ProductNode>,
}

impl SiteNode {
    pub fn new(display: impl Into<String>, lon: Option<f64>, lat: Option<f64>) -> Self {
        Self {
            display: display.into(),
            lon,
            lat,
            products: BTreeMap::new(),
        }
    }

    pub fn product_mut(&mut self, id: &str, display: &str) -> &mut ProductNode {
        self.products
            .entry(id.to_string())
            .or_insert_with(|| ProductNode::new(display))
    }
}

/// Address of a time entry within the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Slot {
    pub site: String,
    pub product: String,
    pub flavor: String,
    pub time: DateTime<Utc>,
}

/// A collision on an occupied slot with a different payload or url.
///
/// Resolved last-write-wins: `url` is what the catalog now holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeConflict {
    pub slot: Slot,
    pub previous_url: String,
    pub url: String,
}

/// Aggregated catalog, ordered by key at every level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    sites: BTreeMap<String, SiteNode>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sites(&self) -> &BTreeMap<String, SiteNode> {
        &self.sites
    }

    pub fn site(&self, id: &str) -> Option<&SiteNode> {
        self.sites.get(id)
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Entries of one flavor, if present.
    pub fn times(&self, site: &str, product: &str, flavor: &str) -> Option<&[TimeEntry]> {
        self.sites
            .get(site)?
            .products
            .get(product)?
            .flavors
            .get(flavor)
            .map(Flavor::times)
    }

    /// Total number of time entries.
    pub fn entry_count(&self) -> usize {
        self.sites
            .values()
            .flat_map(|s| s.products.values())
            .flat_map(|p| p.flavors.values())
            .map(|f| f.times.len())
            .sum()
    }

    /// The site node for `id`, created with `make` on first use.
    pub fn site_or_insert_with(
        &mut self,
        id: &str,
        make: impl FnOnce() -> SiteNode,
    ) -> &mut SiteNode {
        self.sites.entry(id.to_string()).or_insert_with(make)
    }

    /// Fold `other` into this catalog with the same rules as aggregation.
    ///
    /// Site, product and flavor metadata already present here is kept.
    pub fn merge(&mut self, other: Catalog) -> MergeSummary {
        let mut summary = MergeSummary::default();

        for (site_id, other_site) in other.sites {
            let Some(site) = self.sites.get_mut(&site_id) else {
                summary.inserted += count_site(&other_site);
                self.sites.insert(site_id, other_site);
                continue;
            };

            for (product_id, other_product) in other_site.products {
                let product = site.product_mut(&product_id, &other_product.display);
                for (flavor_key, other_flavor) in other_product.flavors {
                    let flavor = product
                        .flavors
                        .entry(flavor_key.clone())
                        .or_insert_with(|| Flavor {
                            display: other_flavor.display.clone(),
                            kind: other_flavor.kind.clone(),
                            times: Vec::new(),
                        });

                    for entry in other_flavor.times {
                        let slot = Slot {
                            site: site_id.clone(),
                            product: product_id.clone(),
                            flavor: flavor_key.clone(),
                            time: entry.time,
                        };
                        let url = entry.url.clone();
                        match flavor.insert(entry) {
                            InsertOutcome::Inserted => summary.inserted += 1,
                            InsertOutcome::Duplicate => summary.duplicates += 1,
                            InsertOutcome::Replaced(previous) => {
                                summary.conflicts.push(MergeConflict {
                                    slot,
                                    previous_url: previous.url,
                                    url,
                                })
                            }
                        }
                    }
                }
            }
        }

        summary
    }
}

/// Counts from [`Catalog::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergeSummary {
    pub inserted: usize,
    pub duplicates: usize,
    pub conflicts: Vec<MergeConflict>,
}

fn count_site(site: &SiteNode) -> usize {
    site.products
        .values()
        .flat_map(|p| p.flavors.values())
        .map(|f| f.times.len())
        .sum()
}
