pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::config::storage::LocalStorage;
pub use crate::config::toml_config::TomlConfig;
pub use crate::core::generator::{DesignGenerator, GenerationReport};
pub use crate::core::indicators::{IndicatorSet, Markers};
pub use crate::utils::error::{DesignError, Result};
