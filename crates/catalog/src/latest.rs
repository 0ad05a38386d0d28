//! Latest observation per (site, product type, product subtype).

use std::collections::btree_map::{self, Entry};
use std::collections::BTreeMap;

use radar_common::ProductDescriptor;
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::naming::ArtifactName;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SelectionKey {
    pub site: String,
    pub product_type: String,
    pub product_subtype: String,
}

impl SelectionKey {
    pub fn of(descriptor: &ProductDescriptor) -> Self {
        Self {
            site: descriptor.site.clone(),
            product_type: descriptor.product_type.clone(),
            product_subtype: descriptor.product_subtype.clone(),
        }
    }
}

/// A winning observation and where to fetch it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected<L> {
    pub locator: L,
    pub descriptor: ProductDescriptor,
}

/// Maximum-timestamp observation per [`SelectionKey`].
///
/// Offering the same observation twice changes nothing, and offering
/// strictly older ones never displaces a winner.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestSelection<L> {
    winners: BTreeMap<SelectionKey, Selected<L>>,
}

impl<L> Default for LatestSelection<L> {
    fn default() -> Self {
        Self {
            winners: BTreeMap::new(),
        }
    }
}

impl<L> LatestSelection<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer one observation. Returns true when it became the winner.
    pub fn offer(&mut self, locator: L, descriptor: ProductDescriptor) -> bool {
        self.offer_selected(Selected {
            locator,
            descriptor,
        })
    }

    fn offer_selected(&mut self, candidate: Selected<L>) -> bool {
        match self.winners.entry(SelectionKey::of(&candidate.descriptor)) {
            Entry::Vacant(slot) => {
                slot.insert(candidate);
                true
            }
            Entry::Occupied(mut slot) => {
                // Ties keep the first seen.
                if candidate.descriptor.timestamp > slot.get().descriptor.timestamp {
                    slot.insert(candidate);
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Combine with a selection built from later input.
    pub fn merge(mut self, later: LatestSelection<L>) -> Self {
        for candidate in later.winners.into_values() {
            self.offer_selected(candidate);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.winners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.winners.is_empty()
    }

    pub fn get(&self, key: &SelectionKey) -> Option<&Selected<L>> {
        self.winners.get(key)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, SelectionKey, Selected<L>> {
        self.winners.iter()
    }

    pub fn into_values(self) -> impl Iterator<Item = Selected<L>> {
        self.winners.into_values()
    }
}

/// Pick the latest observation per key, in input order.
pub fn select_latest<L>(
    items: impl IntoIterator<Item = (L, ProductDescriptor)>,
) -> LatestSelection<L> {
    let mut selection = LatestSelection::new();
    for (locator, descriptor) in items {
        selection.offer(locator, descriptor);
    }
    selection
}

/// Same result as [`select_latest`], computed with rayon.
pub fn select_latest_parallel<L: Send>(items: Vec<(L, ProductDescriptor)>) -> LatestSelection<L> {
    items
        .into_par_iter()
        .fold(LatestSelection::new, |mut selection, (locator, descriptor)| {
            selection.offer(locator, descriptor);
            selection
        })
        .reduce(LatestSelection::new, LatestSelection::merge)
}

/// Winners whose metadata sidecar is not present yet.
///
/// `exists` is asked about the sidecar file name (`{base}.json`).
pub fn pending_downloads<L>(
    selection: LatestSelection<L>,
    exists: impl Fn(&str) -> bool,
) -> Vec<Selected<L>> {
    selection
        .into_values()
        .filter(|selected| {
            let Some(name) = ArtifactName::for_descriptor(&selected.descriptor) else {
                debug!(raw = %selected.descriptor.raw_identifier, "No artifact name, keeping");
                return true;
            };
            let sidecar = name.metadata();
            if exists(&sidecar) {
                debug!(sidecar = %sidecar, "Already downloaded, skipping");
                false
            } else {
                true
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ingestion::parse_identifier;
    use radar_common::SourceFormat;

    fn parsed(name: &str) -> (String, ProductDescriptor) {
        (
            name.to_string(),
            parse_identifier(name, SourceFormat::DirectoryScan).unwrap(),
        )
    }

    #[test]
    fn test_ties_keep_first_seen() {
        let a = parsed("202601240000_fikau_ppi_0.3_dbzh_qc.tif");
        let b = parsed("202601240000_fikau_ppi_0.3_dbzh_qc.tiff.gz");
        let selection = select_latest(vec![a.clone(), b]);
        assert_eq!(selection.len(), 1);
        let (_, winner) = selection.iter().next().unwrap();
        assert_eq!(winner.locator, a.0);
    }

    #[test]
    fn test_merge_prefers_newer() {
        let older = select_latest(vec![parsed("202601240000_fikau_ppi_0.3_dbzh_qc.tif")]);
        let newer = select_latest(vec![parsed("202601240005_fikau_ppi_0.3_dbzh_qc.tif")]);
        let merged = newer.clone().merge(older);
        assert_eq!(merged, newer);
    }

    #[test]
    fn test_subtypes_are_separate_keys() {
        let selection = select_latest(vec![
            parsed("202601240000_fikau_ppi_0.3_dbzh_qc.tif"),
            parsed("202601240000_fikau_ppi_0.7_dbzh_qc.tif"),
            parsed("202601240000_fikau_ppi_0.3_vrad_qc.tif"),
        ]);
        assert_eq!(selection.len(), 3);
    }
}
