use crate::config::GeneratorConfig;
use crate::core::indicators::Markers;
use crate::utils::error::{DesignError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub input: InputConfig,
    pub markers: Markers,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub working_dir: Option<String>,
    pub subjects_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub output_dir: Option<String>,
    pub indicator_table: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DesignError::ReadError {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DesignError::ConfigParseError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STUDY_DIR})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DesignError::ConfigParseError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Settings from this file layered over the built-in defaults.
    pub fn into_generator_config(self) -> GeneratorConfig {
        let defaults = GeneratorConfig::default();
        GeneratorConfig {
            working_dir: self.input.working_dir.unwrap_or(defaults.working_dir),
            subjects_file: self.input.subjects_file.unwrap_or(defaults.subjects_file),
            output_dir: self.output.output_dir.unwrap_or(defaults.output_dir),
            markers: self.markers,
            indicator_table: self.output.indicator_table.or(defaults.indicator_table),
        }
    }
}
