use crate::config::toml_config::{LogFormat, LoggingConfig, PipelineConfig, PipelineSection};
use crate::domain::model::DataSource;
use crate::utils::error::{PipelineError, Result};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "small-pipeline")]
#[command(about = "Run a line-oriented pipeline over a file, URL or TOML config")]
pub struct CliConfig {
    /// Path to a TOML pipeline configuration
    #[arg(short, long, conflicts_with_all = ["file", "url"])]
    pub config: Option<String>,

    /// Read lines from a local file
    #[arg(long, conflicts_with = "url")]
    pub file: Option<String>,

    /// Fetch lines from an http(s) URL
    #[arg(long)]
    pub url: Option<String>,

    #[arg(long, help = "Drop lines that are empty after trimming")]
    pub skip_blank: bool,

    #[arg(long, help = "Uppercase every line")]
    pub uppercase: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// 將命令列參數轉成 `PipelineConfig`，命令列設定優先於檔案
    pub fn to_pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = if let Some(path) = &self.config {
            PipelineConfig::from_file(path)?
        } else {
            let source = match (&self.file, &self.url) {
                (Some(path), _) => DataSource::file(path.clone()),
                (None, Some(url)) => DataSource::url(url.clone()),
                (None, None) => {
                    return Err(PipelineError::configuration(
                        "one of --config, --file or --url is required",
                    ))
                }
            };

            PipelineConfig {
                pipeline: PipelineSection {
                    name: "cli".to_string(),
                    description: None,
                },
                source,
                http: None,
                logging: None,
            }
        };

        let logging = config.logging.get_or_insert_with(LoggingConfig::default);
        if self.verbose {
            logging.verbose = Some(true);
        }
        if self.json_logs {
            logging.format = Some(LogFormat::Json);
        }

        Ok(config)
    }
}
