use crate::config::toml_config::HttpConfig;
use crate::domain::ports::SourceReader;
use crate::utils::error::{PipelineError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// 讀取本機檔案並以 HTTP GET 抓取網址內容
#[derive(Debug, Clone)]
pub struct DefaultSourceReader {
    client: Client,
}

impl DefaultSourceReader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn from_http_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(seconds) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Default for DefaultSourceReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SourceReader for DefaultSourceReader {
    async fn read_file(&self, path: &str) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PipelineError::SourceIo {
                path: path.to_string(),
                source,
            })
    }

    async fn fetch_url(&self, url: &str) -> Result<String> {
        let parsed = Url::parse(url).map_err(|e| PipelineError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PipelineError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        let response = self.client.get(parsed).send().await?;
        tracing::debug!("Source response status: {}", response.status());

        let body = response.error_for_status()?.text().await?;
        Ok(body)
    }
}
