use thiserror::Error;

/// 步驟內部可回報的任意錯誤
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to read source file '{path}': {source}")]
    SourceIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid source URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Step '{step_name}' failed: {source}")]
    StepExecution {
        step_name: String,
        #[source]
        source: BoxError,
    },

    #[error("Type mismatch at {stage}: expected {expected}, found {found}")]
    TypeMismatch {
        stage: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Validation error in '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Config parsing error: {message}")]
    ConfigParse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Source,
    Step,
    Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PipelineError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Configuration { .. } | Self::Validation { .. } | Self::ConfigParse { .. } => {
                ErrorCategory::Configuration
            }
            Self::SourceIo { .. } | Self::InvalidUrl { .. } | Self::Network(_) | Self::Io(_) => {
                ErrorCategory::Source
            }
            Self::StepExecution { .. } => ErrorCategory::Step,
            Self::TypeMismatch { .. } => ErrorCategory::Type,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路錯誤通常重跑即可
            Self::Network(_) => ErrorSeverity::Medium,
            Self::StepExecution { .. } | Self::SourceIo { .. } | Self::InvalidUrl { .. } => {
                ErrorSeverity::High
            }
            Self::Configuration { .. } | Self::Validation { .. } | Self::ConfigParse { .. } => {
                ErrorSeverity::High
            }
            // 型別不符代表步驟串接本身寫錯了
            Self::TypeMismatch { .. } | Self::Io(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::Configuration { .. } => "Call `source(...)` on the builder before executing",
            Self::SourceIo { .. } => "Check that the file exists and is readable",
            Self::InvalidUrl { .. } => "Use an absolute http:// or https:// URL",
            Self::Network(_) => "Check network connectivity and the remote endpoint, then retry",
            Self::StepExecution { .. } => "Inspect the step input; the transform rejected it",
            Self::TypeMismatch { .. } => {
                "Make each step's input type match the previous step's output type"
            }
            Self::Validation { .. } | Self::ConfigParse { .. } => {
                "Fix the configuration value and run again"
            }
            Self::Io(_) => "Check file permissions and available disk space",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::Configuration { message } => format!("Pipeline is not configured: {}", message),
            Self::SourceIo { path, .. } => format!("Could not read '{}'", path),
            Self::InvalidUrl { url, .. } => format!("'{}' is not a usable URL", url),
            Self::Network(_) => "Could not fetch the source URL".to_string(),
            Self::StepExecution { step_name, source } => {
                format!("Step '{}' failed: {}", step_name, source)
            }
            Self::TypeMismatch {
                stage,
                expected,
                found,
            } => format!("{} expected {} but received {}", stage, expected, found),
            Self::Validation { field, message } => format!("Invalid '{}': {}", field, message),
            Self::ConfigParse { message } => format!("Config file is invalid: {}", message),
            Self::Io(e) => format!("I/O failure: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
