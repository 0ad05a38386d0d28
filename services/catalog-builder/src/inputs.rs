//! Collecting raw identifiers from listings, directory scans and WMS
//! capabilities documents.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use ingestion::{extract_wms_layers, RawIdentifier};
use radar_common::SourceFormat;
use tracing::{debug, info};
use walkdir::WalkDir;

/// One identifier per line. Blank lines and `#` comments are skipped.
pub fn read_listing<R: BufRead>(reader: R, source: SourceFormat) -> Result<Vec<RawIdentifier>> {
    let mut identifiers = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read identifier listing")?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        identifiers.push(RawIdentifier::new(line, source));
    }
    Ok(identifiers)
}

pub fn read_listing_file<P: AsRef<Path>>(path: P, source: SourceFormat) -> Result<Vec<RawIdentifier>> {
    let file = File::open(path.as_ref())
        .with_context(|| format!("Failed to open listing {:?}", path.as_ref()))?;
    let identifiers = read_listing(BufReader::new(file), source)?;
    info!(path = ?path.as_ref(), count = identifiers.len(), "Read identifier listing");
    Ok(identifiers)
}

/// Product files under `root` whose name ends with one of `extensions`.
///
/// Paths are reported relative to `root`, sorted.
pub fn scan_directory<P: AsRef<Path>>(root: P, extensions: &[String]) -> Result<Vec<RawIdentifier>> {
    let root = root.as_ref();
    let mut paths = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.with_context(|| format!("Failed to scan {:?}", root))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if !extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
            debug!(path = ?entry.path(), "Skipping non-product file");
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        paths.push(relative.to_string_lossy().into_owned());
    }

    paths.sort();
    info!(root = ?root, count = paths.len(), "Scanned product directory");
    Ok(paths
        .into_iter()
        .map(|p| RawIdentifier::new(p, SourceFormat::DirectoryScan))
        .collect())
}

/// WMS layer identifiers advertised by a capabilities document.
pub fn read_capabilities<P: AsRef<Path>>(path: P) -> Result<Vec<RawIdentifier>> {
    let xml = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read capabilities from {:?}", path.as_ref()))?;
    let identifiers = extract_wms_layers(&xml)
        .with_context(|| format!("Failed to parse capabilities {:?}", path.as_ref()))?;
    info!(path = ?path.as_ref(), count = identifiers.len(), "Extracted WMS layers");
    Ok(identifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_listing_skips_blanks_and_comments() {
        let listing = "# nightly listing\n\n202601240000_fikau_ppi_0.3_dbzh_qc.tif\n  \n202601240005_fikau_ppi_0.3_dbzh_qc.tif  \n";
        let identifiers = read_listing(listing.as_bytes(), SourceFormat::DirectoryScan).unwrap();
        assert_eq!(identifiers.len(), 2);
        assert_eq!(identifiers[1].raw, "202601240005_fikau_ppi_0.3_dbzh_qc.tif");
        assert_eq!(identifiers[0].source, SourceFormat::DirectoryScan);
    }

    #[test]
    fn test_scan_directory_filters_by_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let day = dir.path().join("2026/01/24");
        fs::create_dir_all(&day).unwrap();
        for name in [
            "202601240000_fikau_ppi_0.3_dbzh_qc.tif",
            "202601240000_fikau_ppi_0.3_dbzh_qc.json",
            "202601240005_fivan_cappi_600_dbzh_qc.tiff.gz",
            "README",
        ] {
            fs::write(day.join(name), b"").unwrap();
        }

        let extensions = vec![".tif".to_string(), ".tiff.gz".to_string()];
        let identifiers = scan_directory(dir.path(), &extensions).unwrap();

        let raws: Vec<&str> = identifiers.iter().map(|i| i.raw.as_str()).collect();
        assert_eq!(raws.len(), 2);
        assert!(raws[0].ends_with("202601240000_fikau_ppi_0.3_dbzh_qc.tif"));
        assert!(raws[1].ends_with("202601240005_fivan_cappi_600_dbzh_qc.tiff.gz"));
    }
}
