#[cfg(feature = "cli")]
pub mod cli;
pub mod storage;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::core::indicators::Markers;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use serde::{Deserialize, Serialize};

/// Resolved settings for one generator run, after merging the config file
/// and command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Base directory. Relative paths below are resolved against it.
    pub working_dir: String,
    pub subjects_file: String,
    pub output_dir: String,
    pub markers: Markers,
    pub indicator_table: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            working_dir: ".".to_string(),
            subjects_file: "subs_excl325".to_string(),
            output_dir: ".".to_string(),
            markers: Markers::default(),
            indicator_table: None,
        }
    }
}

impl Validate for GeneratorConfig {
    fn validate(&self) -> Result<()> {
        validate_path("working_dir", &self.working_dir)?;
        validate_path("subjects_file", &self.subjects_file)?;
        validate_path("output_dir", &self.output_dir)?;
        if let Some(table) = &self.indicator_table {
            validate_path("indicator_table", table)?;
        }
        self.markers.validate()
    }
}

impl ConfigProvider for GeneratorConfig {
    fn working_dir(&self) -> &str {
        &self.working_dir
    }

    fn subjects_file(&self) -> &str {
        &self.subjects_file
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn markers(&self) -> Markers {
        self.markers.clone()
    }

    fn indicator_table(&self) -> Option<&str> {
        self.indicator_table.as_deref()
    }
}
