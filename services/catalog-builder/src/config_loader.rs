//! Configuration loader for the catalog builder.
//!
//! Loads `catalog-builder.yaml` and the site directory, with `${VAR}` and
//! `${VAR:-default}` environment substitution.

use anyhow::{Context, Result};
use radar_common::StaticSiteDirectory;
use std::fs;
use std::path::Path;

use crate::config::BuilderConfig;

/// Load and validate the builder configuration.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<BuilderConfig> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read builder config from {:?}", path.as_ref()))?;
    parse_config(&content)
        .with_context(|| format!("Invalid builder config in {:?}", path.as_ref()))
}

/// Parse configuration text after environment substitution.
pub fn parse_config(content: &str) -> Result<BuilderConfig> {
    let expanded = expand_env_vars(content)?;
    let config: BuilderConfig =
        serde_yaml::from_str(&expanded).with_context(|| "Failed to parse builder config YAML")?;
    validate_config(&config)?;
    Ok(config)
}

/// Load the site directory file.
pub fn load_site_directory<P: AsRef<Path>>(path: P) -> Result<StaticSiteDirectory> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read site directory from {:?}", path.as_ref()))?;
    let expanded = expand_env_vars(&content)?;
    StaticSiteDirectory::from_yaml_str(&expanded)
        .with_context(|| format!("Invalid site directory in {:?}", path.as_ref()))
}

/// Expand `${VAR}` and `${VAR:-default}` references.
///
/// A default is used when the variable is unset or empty.
fn expand_env_vars(content: &str) -> Result<String> {
    let mut expanded = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(start) = rest.find("${") {
        expanded.push_str(&rest[..start]);
        let reference = &rest[start + 2..];
        let end = reference
            .find('}')
            .with_context(|| format!("Unclosed variable reference '${{{}'", reference))?;
        expanded.push_str(&lookup_var(&reference[..end])?);
        rest = &reference[end + 1..];
    }
    expanded.push_str(rest);

    Ok(expanded)
}

fn lookup_var(reference: &str) -> Result<String> {
    let (name, default) = match reference.split_once(":-") {
        Some((name, default)) => (name.trim(), Some(default)),
        None => (reference.trim(), None),
    };

    match (std::env::var(name).ok().filter(|v| !v.is_empty()), default) {
        (Some(value), _) => Ok(value),
        (None, Some(default)) => Ok(default.to_string()),
        (None, None) => anyhow::bail!("Config references unset environment variable {}", name),
    }
}

fn validate_config(config: &BuilderConfig) -> Result<()> {
    anyhow::ensure!(
        !config.sites_file.as_os_str().is_empty(),
        "sites_file must not be empty"
    );
    anyhow::ensure!(
        !config.output.catalog_file.is_empty()
            && !config.output.catalog_file.contains(['/', '\\']),
        "output.catalog_file must be a plain file name, got '{}'",
        config.output.catalog_file
    );
    anyhow::ensure!(
        !config.input.extensions.is_empty(),
        "input.extensions must list at least one suffix"
    );
    for ext in &config.input.extensions {
        anyhow::ensure!(
            ext.starts_with('.') && ext.len() > 1,
            "input.extensions entries must start with '.', got '{}'",
            ext
        );
    }
    anyhow::ensure!(
        matches!(
            config.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error"
        ),
        "logging.level must be one of trace, debug, info, warn, error; got '{}'",
        config.logging.level
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use radar_common::SourceFormat;

    #[test]
    fn test_expand_env_vars_simple() {
        std::env::set_var("CATALOG_TEST_VAR", "test_value");
        let result = expand_env_vars("prefix_${CATALOG_TEST_VAR}_suffix").unwrap();
        assert_eq!(result, "prefix_test_value_suffix");
    }

    #[test]
    fn test_expand_env_vars_with_default() {
        std::env::remove_var("CATALOG_NONEXISTENT_VAR");
        let result = expand_env_vars("value_${CATALOG_NONEXISTENT_VAR:-default}_end").unwrap();
        assert_eq!(result, "value_default_end");
    }

    #[test]
    fn test_expand_env_vars_missing_required() {
        std::env::remove_var("CATALOG_REQUIRED_VAR");
        assert!(expand_env_vars("${CATALOG_REQUIRED_VAR}").is_err());
        assert!(expand_env_vars("${UNCLOSED").is_err());
    }

    #[test]
    fn test_lookup_var_prefers_set_value() {
        std::env::set_var("CATALOG_SET_VAR", "custom");
        assert_eq!(lookup_var("CATALOG_SET_VAR:-default").unwrap(), "custom");
        std::env::set_var("CATALOG_EMPTY_VAR", "");
        assert_eq!(lookup_var("CATALOG_EMPTY_VAR:-fallback").unwrap(), "fallback");
        assert!(lookup_var("CATALOG_EMPTY_VAR").is_err());
    }

    #[test]
    fn test_expand_env_vars_several_references() {
        std::env::set_var("CATALOG_MULTI_A", "a");
        std::env::remove_var("CATALOG_MULTI_B");
        let result =
            expand_env_vars("${CATALOG_MULTI_A}/${CATALOG_MULTI_B:-b}/$HOME/{x}").unwrap();
        assert_eq!(result, "a/b/$HOME/{x}");
    }

    #[test]
    fn test_parse_config_with_substitution() {
        std::env::set_var("CATALOG_TEST_SOURCE", "wms_layer");
        let config = parse_config(
            "input:\n  source: ${CATALOG_TEST_SOURCE}\noutput:\n  dir: ${CATALOG_TEST_UNSET_DIR:-/srv/radar}\n",
        )
        .unwrap();
        assert_eq!(config.input.source, SourceFormat::WmsLayer);
        assert_eq!(config.output.dir, std::path::PathBuf::from("/srv/radar"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(parse_config("output:\n  catalog_file: out/catalog.json\n").is_err());
        assert!(parse_config("input:\n  extensions: [tif]\n").is_err());
        assert!(parse_config("logging:\n  level: loud\n").is_err());
        assert!(parse_config("input:\n  source: ftp\n").is_err());
    }
}
