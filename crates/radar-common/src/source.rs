//! Source format tags for raw product identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where a raw identifier came from; selects the naming grammar used to parse it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// File path found while scanning a product directory
    DirectoryScan,
    /// WMS layer with its TIME/ELEVATION dimensions, as a GetMap query string
    WmsLayer,
    /// WFS feature record fields, form-encoded
    WfsFeature,
    /// Object-store key (`YYYY/MM/DD/<site>/<filename>`)
    ObjectStoreKey,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 4] = [
        SourceFormat::DirectoryScan,
        SourceFormat::WmsLayer,
        SourceFormat::WfsFeature,
        SourceFormat::ObjectStoreKey,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::DirectoryScan => "directory_scan",
            SourceFormat::WmsLayer => "wms_layer",
            SourceFormat::WfsFeature => "wfs_feature",
            SourceFormat::ObjectStoreKey => "object_store_key",
        }
    }

    /// Whether identifiers of this format name an actual file.
    pub fn is_file_based(&self) -> bool {
        matches!(self, SourceFormat::DirectoryScan | SourceFormat::ObjectStoreKey)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown source format '{0}' (expected one of: directory_scan, wms_layer, wfs_feature, object_store_key)")]
pub struct UnknownSourceFormat(pub String);

impl FromStr for SourceFormat {
    type Err = UnknownSourceFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        SourceFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == normalized)
            .ok_or_else(|| UnknownSourceFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_accepts_dashes_and_case() {
        assert_eq!("wms-layer".parse::<SourceFormat>().unwrap(), SourceFormat::WmsLayer);
        assert_eq!(
            "Object_Store_Key".parse::<SourceFormat>().unwrap(),
            SourceFormat::ObjectStoreKey
        );
        assert!("s3".parse::<SourceFormat>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for format in SourceFormat::ALL {
            assert_eq!(format.to_string().parse::<SourceFormat>().unwrap(), format);
        }
    }
}
