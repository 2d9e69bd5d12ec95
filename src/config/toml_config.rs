use crate::domain::model::DataSource;
use crate::utils::error::{PipelineError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub pipeline: PipelineSection,
    pub source: DataSource,
    pub http: Option<HttpConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSection {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub format: Option<LogFormat>,
}

impl PipelineConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PipelineError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_URL})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PipelineError::ConfigParse {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn log_format(&self) -> LogFormat {
        self.logging
            .as_ref()
            .and_then(|l| l.format)
            .unwrap_or_default()
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }
}

impl Validate for PipelineConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("pipeline.name", &self.pipeline.name)?;

        match &self.source {
            DataSource::FromFile { path } => validate_path("source.path", path)?,
            DataSource::FromUrl { url } => validate_url("source.url", url)?,
            DataSource::InMemory { .. } => {}
        }

        if let Some(seconds) = self.http.as_ref().and_then(|h| h.timeout_seconds) {
            validate_range("http.timeout_seconds", seconds, 1, 3600)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[pipeline]
name = "word-count"
description = "Counts words"

[source]
type = "file"
path = "./words.txt"

[logging]
verbose = true
format = "json"
"#;

        let config = PipelineConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.pipeline.name, "word-count");
        assert_eq!(config.source, DataSource::file("./words.txt"));
        assert!(config.http.is_none());
        assert!(config.verbose());
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SMALL_PIPELINE_TEST_URL", "https://test.example.com/lines");

        let toml_content = r#"
[pipeline]
name = "remote"

[source]
type = "url"
url = "${SMALL_PIPELINE_TEST_URL}"
"#;

        let config = PipelineConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.source,
            DataSource::url("https://test.example.com/lines")
        );
        assert_eq!(config.log_format(), LogFormat::Compact);

        std::env::remove_var("SMALL_PIPELINE_TEST_URL");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[pipeline]
name = "broken"

[source]
type = "url"
url = "invalid-url"

[http]
timeout_seconds = 0
"#;

        let config = PipelineConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_source_type() {
        let toml_content = r#"
[pipeline]
name = "bad"

[source]
type = "s3"
bucket = "x"
"#;

        let err = PipelineConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, PipelineError::ConfigParse { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[pipeline]
name = "file-test"

[source]
type = "in_memory"
data = ["1", "2"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = PipelineConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.pipeline.name, "file-test");
        assert_eq!(config.source, DataSource::in_memory(["1", "2"]));
    }
}
