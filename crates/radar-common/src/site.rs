//! Radar site directory.
//!
//! The catalog needs a display name and WGS84 location per site. Where that
//! comes from (a YAML file, a service call) is up to the caller; everything
//! downstream only sees the [`SiteDirectory`] trait.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use crate::error::{SiteDirectoryError, SiteLookupError};

/// What the directory knows about a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    pub display_name: String,
    pub longitude: f64,
    pub latitude: f64,
}

/// Lookup of site metadata by id.
pub trait SiteDirectory {
    fn lookup(&self, site_id: &str) -> Result<SiteInfo, SiteLookupError>;
}

impl<S: BuildHasher> SiteDirectory for HashMap<String, SiteInfo, S> {
    fn lookup(&self, site_id: &str) -> Result<SiteInfo, SiteLookupError> {
        self.get(site_id)
            .cloned()
            .ok_or_else(|| SiteLookupError::NotFound(site_id.to_string()))
    }
}

impl SiteDirectory for BTreeMap<String, SiteInfo> {
    fn lookup(&self, site_id: &str) -> Result<SiteInfo, SiteLookupError> {
        self.get(site_id)
            .cloned()
            .ok_or_else(|| SiteLookupError::NotFound(site_id.to_string()))
    }
}

impl<D: SiteDirectory + ?Sized> SiteDirectory for &D {
    fn lookup(&self, site_id: &str) -> Result<SiteInfo, SiteLookupError> {
        (**self).lookup(site_id)
    }
}

/// One entry of a site directory file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteEntry {
    pub id: String,
    pub name: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub altitude: Option<f64>,
    #[serde(default)]
    pub composite: bool,
}

#[derive(Debug, Deserialize)]
struct SiteFile {
    sites: Vec<SiteEntry>,
}

/// In-memory directory built from a fixed list of sites.
#[derive(Debug, Clone, Default)]
pub struct StaticSiteDirectory {
    sites: HashMap<String, SiteEntry>,
}

impl StaticSiteDirectory {
    pub fn from_entries(
        entries: impl IntoIterator<Item = SiteEntry>,
    ) -> Result<Self, SiteDirectoryError> {
        let mut sites = HashMap::new();
        for entry in entries {
            if !(-180.0..=180.0).contains(&entry.lon) || !(-90.0..=90.0).contains(&entry.lat) {
                return Err(SiteDirectoryError::InvalidCoordinates {
                    site: entry.id,
                    lon: entry.lon,
                    lat: entry.lat,
                });
            }
            if sites.contains_key(&entry.id) {
                return Err(SiteDirectoryError::DuplicateSite(entry.id));
            }
            sites.insert(entry.id.clone(), entry);
        }
        Ok(Self { sites })
    }

    /// Parse a `sites:` YAML document.
    ///
    /// ```yaml
    /// sites:
    ///   - { id: fikau, name: Inari, lat: 68.4343, lon: 27.4428 }
    /// ```
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SiteDirectoryError> {
        let file: SiteFile = serde_yaml::from_str(yaml)?;
        Self::from_entries(file.sites)
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Site ids in lexicographic order.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sites.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn entry(&self, site_id: &str) -> Option<&SiteEntry> {
        self.sites.get(site_id)
    }
}

impl SiteDirectory for StaticSiteDirectory {
    fn lookup(&self, site_id: &str) -> Result<SiteInfo, SiteLookupError> {
        self.sites
            .get(site_id)
            .map(|entry| SiteInfo {
                display_name: entry.name.clone(),
                longitude: entry.lon,
                latitude: entry.lat,
            })
            .ok_or_else(|| SiteLookupError::NotFound(site_id.to_string()))
    }
}
