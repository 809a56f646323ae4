use clap::Parser;
use glm_design::core::ConfigProvider;
use glm_design::utils::{logger, validation::Validate};
use glm_design::{CliConfig, DesignGenerator, GenerationReport, LocalStorage};

fn print_summary(report: &GenerationReport) {
    for design in &report.designs {
        println!("📐 {} [{}]", design.label, design.evs.join(", "));
        for file in &design.files {
            println!("   {}", file);
        }
    }
    if let Some(table) = &report.indicator_table {
        println!("📋 Indicator table: {}", table);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose, cli.log_json);

    tracing::info!("Starting glm-design");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let storage = LocalStorage::new(config.working_dir());
    let generator = DesignGenerator::new(storage, config);

    let result = if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no files will be written");
        generator.plan()
    } else {
        generator.run()
    };

    match result {
        Ok(report) => {
            if cli.dry_run {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                tracing::info!(
                    "✅ Wrote {} files for {} subjects",
                    report.files().count(),
                    report.subjects
                );
                print_summary(&report);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Design generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
