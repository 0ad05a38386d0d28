//! Path utilities for tests that touch the workspace's config files.

use std::io::Write;
use std::path::PathBuf;

use tempfile::NamedTempFile;

/// Returns the workspace root directory.
///
/// This is determined by walking up from the current crate's manifest directory
/// until we find the workspace Cargo.toml.
pub fn workspace_root() -> PathBuf {
    // Start from the test-utils crate manifest dir
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// The shipped `config/` directory.
pub fn config_dir() -> PathBuf {
    workspace_root().join("config")
}

/// The shipped site directory, `config/sites.yaml`.
pub fn sites_file() -> PathBuf {
    config_dir().join("sites.yaml")
}

/// Write `contents` to a fresh temporary file that lives as long as the handle.
pub fn temp_file_with(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_has_manifest() {
        assert!(workspace_root().join("Cargo.toml").exists());
    }

    #[test]
    fn test_temp_file_with() {
        let file = temp_file_with("sites: []\n", ".yaml");
        let read = std::fs::read_to_string(file.path()).unwrap();
        assert_eq!(read, "sites: []\n");
        assert!(file.path().to_string_lossy().ends_with(".yaml"));
    }
}
