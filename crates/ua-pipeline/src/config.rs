//! Run configuration, read from a TOML file.
//!
//! Every field has a default, so a file only lists what it changes.
//! Relative paths are resolved against the directory holding the file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ua_attrs::AttributeConfig;
use ua_output::{MatrixFormat, OutputError};
use ua_skims::SkimCatalog;
use ua_tables::directory::{DEFAULT_BASE_URL, DEFAULT_YEAR};
use ua_zones::{AssignConfig, ZoneAssigner};

use crate::{PipelineError, PipelineResult};

/// Used when neither the environment nor the configuration names a level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// School and college directory settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// When false, schools and colleges are empty and nothing is fetched.
    pub enabled:  bool,
    pub base_url: String,
    pub year:     u16,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            enabled:  true,
            base_url: DEFAULT_BASE_URL.into(),
            year:     DEFAULT_YEAR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory holding `households.csv`, `persons.csv`, `blocks.csv` and
    /// `jobs.csv`.
    pub input_dir:     PathBuf,
    /// BEAM long-format OD skims.
    pub skims_path:    PathBuf,
    pub output_dir:    PathBuf,
    /// Reshape and write the skim container.
    pub create_skims:  bool,
    /// Compute attributes and write the household, person, land-use and
    /// zone files.
    pub create_inputs: bool,
    pub matrix_format: MatrixFormat,
    pub log_level:     String,
    pub assignment:    AssignConfig,
    pub directory:     DirectoryConfig,
    pub attributes:    AttributeConfig,
    pub skims:         SkimCatalog,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir:     "data".into(),
            skims_path:    "data/skimsOD.UrbanSim.Full.csv".into(),
            output_dir:    "output".into(),
            create_skims:  true,
            create_inputs: true,
            matrix_format: MatrixFormat::default(),
            log_level:     DEFAULT_LOG_LEVEL.into(),
            assignment:    AssignConfig::default(),
            directory:     DirectoryConfig::default(),
            attributes:    AttributeConfig::default(),
            skims:         SkimCatalog::default(),
        }
    }
}

impl PipelineConfig {
    /// Read `path` and resolve relative paths against its directory.
    pub fn load(path: &Path) -> PipelineResult<PipelineConfig> {
        let text = fs::read_to_string(path).map_err(|source| PipelineError::ReadConfig {
            path: path.to_owned(),
            source,
        })?;
        let base = path.parent().unwrap_or(Path::new("."));
        Self::from_toml_str(&text, base)
    }

    /// Parse TOML text; relative paths are resolved against `base_dir`.
    pub fn from_toml_str(text: &str, base_dir: &Path) -> PipelineResult<PipelineConfig> {
        let mut config: PipelineConfig = toml::from_str(text)?;
        config.resolve_paths(base_dir);
        Ok(config)
    }

    fn resolve_paths(&mut self, base_dir: &Path) {
        for path in [&mut self.input_dir, &mut self.skims_path, &mut self.output_dir] {
            if path.is_relative() {
                *path = base_dir.join(&*path);
            }
        }
    }

    /// Check every section without touching the filesystem, including
    /// that this build can write `matrix_format`.
    pub fn validate(&self) -> PipelineResult<()> {
        ZoneAssigner::new(self.assignment)?;
        self.attributes.validate()?;
        self.skims.matrix_specs()?;
        if self.directory.enabled && self.directory.base_url.is_empty() {
            return Err(PipelineError::Config("directory.base_url must not be empty".into()));
        }
        if self.create_skims && !self.matrix_format.is_available() {
            return Err(OutputError::FormatUnavailable(self.matrix_format.name().into()).into());
        }
        Ok(())
    }
}
