use serde::{Deserialize, Serialize};

/// 管道初始資料的來源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataSource {
    #[serde(rename = "file")]
    FromFile { path: String },
    #[serde(rename = "url")]
    FromUrl { url: String },
    InMemory { data: Vec<String> },
}

impl DataSource {
    pub fn file(path: impl Into<String>) -> Self {
        Self::FromFile { path: path.into() }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self::FromUrl { url: url.into() }
    }

    pub fn in_memory<I, S>(data: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InMemory {
            data: data.into_iter().map(Into::into).collect(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::FromFile { .. } => "file",
            Self::FromUrl { .. } => "url",
            Self::InMemory { .. } => "in_memory",
        }
    }
}
