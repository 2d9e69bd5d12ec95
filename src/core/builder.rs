use crate::adapters::DefaultSourceReader;
use crate::config::toml_config::PipelineConfig;
use crate::core::pipeline::Pipeline;
use crate::core::step::Step;
use crate::domain::model::DataSource;
use crate::domain::ports::{SourceReader, StepLogger};
use crate::utils::error::{BoxError, Result};
use crate::utils::logger::TracingStepLogger;
use crate::utils::validation::{validate_non_empty_string, Validate};
use std::any::Any;
use std::sync::Arc;

/// 累積資料來源與步驟，最後凍結成 `Pipeline`
#[derive(Clone)]
pub struct PipelineBuilder {
    source: Option<DataSource>,
    steps: Vec<Step>,
    reader: Arc<dyn SourceReader>,
    logger: Arc<dyn StepLogger>,
}

impl PipelineBuilder {
    pub fn new() -> Self {
        Self {
            source: None,
            steps: Vec::new(),
            reader: Arc::new(DefaultSourceReader::new()),
            logger: Arc::new(TracingStepLogger),
        }
    }

    /// 依設定檔建立 builder：設定資料來源與 HTTP 用戶端
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Self::new();
        builder.source(config.source.clone());
        if let Some(http) = &config.http {
            builder.reader(Arc::new(DefaultSourceReader::from_http_config(http)?));
        }
        Ok(builder)
    }

    /// Sets the data source, replacing any previous one.
    pub fn source(&mut self, source: DataSource) -> &mut Self {
        if let Some(previous) = self.source.replace(source) {
            tracing::debug!("Replacing {} data source", previous.kind());
        }
        self
    }

    pub fn step<I, O, F>(&mut self, name: impl Into<String>, transform: F) -> &mut Self
    where
        I: Any + Send,
        O: Any + Send,
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        self.steps.push(Step::new(name, transform));
        self
    }

    pub fn try_step<I, O, E, F>(&mut self, name: impl Into<String>, transform: F) -> &mut Self
    where
        I: Any + Send,
        O: Any + Send,
        E: Into<BoxError>,
        F: Fn(I) -> std::result::Result<O, E> + Send + Sync + 'static,
    {
        self.steps.push(Step::fallible(name, transform));
        self
    }

    pub fn reader(&mut self, reader: Arc<dyn SourceReader>) -> &mut Self {
        self.reader = reader;
        self
    }

    pub fn logger(&mut self, logger: Arc<dyn StepLogger>) -> &mut Self {
        self.logger = logger;
        self
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Freezes the current configuration.
    ///
    /// The step list is copied into a new shared slice, so changes made to
    /// this builder afterwards are not visible to the returned pipeline.
    /// A missing source is reported by `execute`, not here.
    pub fn build<T>(&self) -> Result<Pipeline<T>> {
        self.validate()?;

        Ok(Pipeline::new(
            self.source.clone(),
            self.steps.iter().cloned().collect(),
            Arc::clone(&self.reader),
            Arc::clone(&self.logger),
        ))
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for PipelineBuilder {
    fn validate(&self) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            validate_non_empty_string(&format!("steps[{}].name", index), step.name())?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("source", &self.source)
            .field("steps", &self.steps)
            .finish_non_exhaustive()
    }
}

/// 以區塊設定一個新的 builder 並建出 pipeline
pub fn pipeline<T, F>(configure: F) -> Result<Pipeline<T>>
where
    F: FnOnce(&mut PipelineBuilder),
{
    let mut builder = PipelineBuilder::new();
    configure(&mut builder);
    builder.build()
}
