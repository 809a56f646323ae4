use crate::config::toml_config::TomlConfig;
use crate::config::GeneratorConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "glm-design")]
#[command(about = "Generate FSL group-analysis design, contrast and F-test files from a subject list")]
pub struct CliConfig {
    /// Optional TOML config file; flags given here override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory the subject list and outputs are resolved against [default: .]
    #[arg(short, long)]
    pub working_dir: Option<String>,

    /// Subject list, one identifier per line [default: subs_excl325]
    #[arg(short, long)]
    pub subjects: Option<String>,

    /// Where design files are written, relative to the working directory [default: .]
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Substring marking factor A (LL genotype) [default: A]
    #[arg(long)]
    pub factor_a_marker: Option<String>,

    /// Substring marking factor B (SS genotype) [default: B]
    #[arg(long)]
    pub factor_b_marker: Option<String>,

    /// Suffix marking condition X (CA) [default: 1]
    #[arg(long)]
    pub condition_x_suffix: Option<String>,

    /// Suffix marking condition Y (NoCA) [default: 2]
    #[arg(long)]
    pub condition_y_suffix: Option<String>,

    /// Also write a CSV of every derived indicator
    #[arg(long)]
    pub indicator_table: Option<String>,

    /// Show what would be written without writing it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Config file (or defaults) with command-line overrides applied.
    pub fn resolve(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                TomlConfig::from_file(path)?.into_generator_config()
            }
            None => GeneratorConfig::default(),
        };

        if let Some(dir) = &self.working_dir {
            config.working_dir = dir.clone();
        }
        if let Some(subjects) = &self.subjects {
            config.subjects_file = subjects.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(marker) = &self.factor_a_marker {
            config.markers.factor_a = marker.clone();
        }
        if let Some(marker) = &self.factor_b_marker {
            config.markers.factor_b = marker.clone();
        }
        if let Some(suffix) = &self.condition_x_suffix {
            config.markers.condition_x_suffix = suffix.clone();
        }
        if let Some(suffix) = &self.condition_y_suffix {
            config.markers.condition_y_suffix = suffix.clone();
        }
        if let Some(table) = &self.indicator_table {
            config.indicator_table = Some(table.clone());
        }

        Ok(config)
    }
}
