//! Catalog builder configuration.

use std::path::PathBuf;

use radar_common::SourceFormat;
use serde::{Deserialize, Serialize};

/// Top-level configuration, usually loaded from `config/catalog-builder.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Site directory YAML
    #[serde(default = "default_sites_file")]
    pub sites_file: PathBuf,

    #[serde(default)]
    pub input: InputConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub aggregation: AggregationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Grammar of identifiers read from a listing or stdin
    #[serde(default = "default_source")]
    pub source: SourceFormat,

    /// File name suffixes picked up by a directory scan
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory holding the catalog and the downloaded products
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_catalog_file")]
    pub catalog_file: String,

    #[serde(default)]
    pub pretty: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregationConfig {
    #[serde(default = "default_true")]
    pub partitioned: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub sites_file: Option<PathBuf>,
    pub source: Option<SourceFormat>,
    pub output_dir: Option<PathBuf>,
    pub pretty: bool,
    pub sequential: bool,
    pub log_level: Option<String>,
}

impl BuilderConfig {
    pub fn apply(&mut self, overrides: ConfigOverrides) {
        if let Some(sites_file) = overrides.sites_file {
            self.sites_file = sites_file;
        }
        if let Some(source) = overrides.source {
            self.input.source = source;
        }
        if let Some(dir) = overrides.output_dir {
            self.output.dir = dir;
        }
        if overrides.pretty {
            self.output.pretty = true;
        }
        if overrides.sequential {
            self.aggregation.partitioned = false;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }
}

impl OutputConfig {
    pub fn catalog_path(&self) -> PathBuf {
        self.dir.join(&self.catalog_file)
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            sites_file: default_sites_file(),
            input: InputConfig::default(),
            output: OutputConfig::default(),
            aggregation: AggregationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            extensions: default_extensions(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            catalog_file: default_catalog_file(),
            pretty: false,
        }
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self { partitioned: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_sites_file() -> PathBuf {
    PathBuf::from("config/sites.yaml")
}

fn default_source() -> SourceFormat {
    SourceFormat::DirectoryScan
}

fn default_extensions() -> Vec<String> {
    vec![".tif".to_string(), ".tiff".to_string(), ".tiff.gz".to_string()]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_catalog_file() -> String {
    "catalog.json".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}
