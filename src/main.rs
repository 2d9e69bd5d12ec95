use clap::Parser;
use small_pipeline::config::LogFormat;
use small_pipeline::utils::error::ErrorSeverity;
use small_pipeline::utils::logger;
use small_pipeline::{CliConfig, PipelineBuilder};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.to_pipeline_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match config.log_format() {
        LogFormat::Json => logger::init_json_logger(),
        LogFormat::Compact => logger::init_cli_logger(config.verbose()),
    }

    tracing::info!("Starting pipeline '{}'", config.pipeline.name);
    tracing::debug!("Pipeline config: {:?}", config);

    let mut builder = match PipelineBuilder::from_config(&config) {
        Ok(builder) => builder,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    builder.step("Trim", |lines: Vec<String>| {
        lines
            .into_iter()
            .map(|line| line.trim().to_string())
            .collect::<Vec<_>>()
    });
    if cli.skip_blank {
        builder.step("DropBlank", |lines: Vec<String>| {
            lines
                .into_iter()
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
        });
    }
    if cli.uppercase {
        builder.step("Uppercase", |lines: Vec<String>| {
            lines
                .into_iter()
                .map(|line| line.to_uppercase())
                .collect::<Vec<_>>()
        });
    }
    builder.step("Number", |lines: Vec<String>| {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>5}  {}", i + 1, line))
            .collect::<Vec<_>>()
    });

    let pipeline = builder.build::<Vec<String>>()?;

    match pipeline.execute_with_report().await {
        Ok(report) => {
            for line in &report.value {
                println!("{}", line);
            }
            tracing::info!(
                "✅ Pipeline completed: {} source lines, {} steps, {:?}",
                report.source_lines,
                report.steps.len(),
                report.total_duration
            );
            tracing::debug!("Summary: {:?}", report.summary());
        }
        Err(e) => {
            tracing::error!(
                "❌ Pipeline failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
