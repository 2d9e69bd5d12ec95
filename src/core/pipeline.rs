use crate::core::source;
use crate::core::step::Step;
use crate::core::value::ErasedValue;
use crate::domain::model::DataSource;
use crate::domain::ports::{SourceReader, StepLogger};
use crate::utils::error::{PipelineError, Result};
use chrono::{DateTime, Utc};
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// 單一步驟的執行時間
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepTiming {
    pub name: String,
    pub duration: Duration,
}

/// `execute_with_report` 的結果
#[derive(Debug, Clone)]
pub struct ExecutionReport<T> {
    pub value: T,
    pub source_lines: usize,
    pub steps: Vec<StepTiming>,
    pub started_at: DateTime<Utc>,
    pub total_duration: Duration,
}

impl<T> ExecutionReport<T> {
    /// 取得執行摘要
    pub fn summary(&self) -> HashMap<String, serde_json::Value> {
        let mut summary = HashMap::new();

        summary.insert(
            "total_steps".to_string(),
            serde_json::Value::Number(self.steps.len().into()),
        );
        summary.insert(
            "source_lines".to_string(),
            serde_json::Value::Number(self.source_lines.into()),
        );
        summary.insert(
            "total_duration_ms".to_string(),
            serde_json::Value::Number((self.total_duration.as_millis() as u64).into()),
        );
        summary.insert(
            "started_at".to_string(),
            serde_json::Value::String(self.started_at.to_rfc3339()),
        );

        let step_names: Vec<serde_json::Value> = self
            .steps
            .iter()
            .map(|s| serde_json::Value::String(s.name.clone()))
            .collect();
        summary.insert(
            "executed_steps".to_string(),
            serde_json::Value::Array(step_names),
        );

        summary
    }
}

/// An immutable, reusable chain of steps over one data source.
///
/// `T` is the type the last step (or the source, with no steps) is expected
/// to produce. It is checked at runtime when `execute` finishes.
pub struct Pipeline<T> {
    source: Option<DataSource>,
    steps: Arc<[Step]>,
    reader: Arc<dyn SourceReader>,
    logger: Arc<dyn StepLogger>,
    _result: PhantomData<fn() -> T>,
}

impl<T> Pipeline<T> {
    pub(crate) fn new(
        source: Option<DataSource>,
        steps: Arc<[Step]>,
        reader: Arc<dyn SourceReader>,
        logger: Arc<dyn StepLogger>,
    ) -> Self {
        Self {
            source,
            steps,
            reader,
            logger,
            _result: PhantomData,
        }
    }

    pub fn data_source(&self) -> Option<&DataSource> {
        self.source.as_ref()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(Step::name).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<T: Any> Pipeline<T> {
    /// 解析資料來源後依序執行所有步驟
    pub async fn execute(&self) -> Result<T> {
        let (value, _) = self.run(|_, _| {}).await?;
        Ok(value)
    }

    /// Same as `execute`, but also records per-step timings.
    pub async fn execute_with_report(&self) -> Result<ExecutionReport<T>> {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut steps = Vec::with_capacity(self.steps.len());

        let (value, source_lines) = self
            .run(|name, duration| {
                steps.push(StepTiming {
                    name: name.to_string(),
                    duration,
                })
            })
            .await?;

        Ok(ExecutionReport {
            value,
            source_lines,
            steps,
            started_at,
            total_duration: start.elapsed(),
        })
    }

    async fn run<F>(&self, mut on_step: F) -> Result<(T, usize)>
    where
        F: FnMut(&str, Duration),
    {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| PipelineError::configuration("data source not set"))?;

        let lines = source::resolve(source, self.reader.as_ref()).await?;
        let source_lines = lines.len();

        // 每次執行都有自己的折疊狀態
        let mut current = ErasedValue::new(lines);
        for step in self.steps.iter() {
            self.logger.step_started(step.name());
            let start = Instant::now();
            current = step.apply(current)?;
            let elapsed = start.elapsed();
            self.logger.step_finished(step.name(), elapsed);
            on_step(step.name(), elapsed);
        }

        let value = current
            .downcast::<T>()
            .map_err(|found| PipelineError::TypeMismatch {
                stage: "pipeline result".to_string(),
                expected: type_name::<T>(),
                found: found.type_name(),
            })?;

        Ok((value, source_lines))
    }
}

impl<T> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            steps: Arc::clone(&self.steps),
            reader: Arc::clone(&self.reader),
            logger: Arc::clone(&self.logger),
            _result: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Pipeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("source", &self.source)
            .field("steps", &self.steps)
            .field("result_type", &type_name::<T>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::logger::NoopStepLogger;
    use crate::DefaultSourceReader;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn make_pipeline<T>(source: Option<DataSource>, steps: Vec<Step>) -> Pipeline<T> {
        Pipeline::new(
            source,
            steps.into(),
            Arc::new(DefaultSourceReader::new()),
            Arc::new(NoopStepLogger),
        )
    }

    #[tokio::test]
    async fn test_execute_folds_steps_in_order() {
        let pipeline: Pipeline<String> = make_pipeline(
            Some(DataSource::in_memory(["b", "a"])),
            vec![
                Step::new("Join", |v: Vec<String>| v.concat()),
                Step::new("Append", |s: String| format!("{}!", s)),
            ],
        );

        assert_eq!(pipeline.execute().await.unwrap(), "ba!");
        assert_eq!(pipeline.step_names(), vec!["Join", "Append"]);
    }

    #[tokio::test]
    async fn test_unset_source_runs_no_steps() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let pipeline: Pipeline<usize> = make_pipeline(
            None,
            vec![Step::new("Count", move |v: Vec<String>| {
                counter.fetch_add(1, Ordering::SeqCst);
                v.len()
            })],
        );

        let err = pipeline.execute().await.unwrap_err();
        assert!(matches!(err, PipelineError::Configuration { .. }));
        assert_eq!(err.to_string(), "Configuration error: data source not set");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_result_type_mismatch() {
        let pipeline: Pipeline<i32> = make_pipeline(
            Some(DataSource::in_memory(["x"])),
            vec![Step::new("Len", |v: Vec<String>| v.len())],
        );

        let err = pipeline.execute().await.unwrap_err();
        match err {
            PipelineError::TypeMismatch {
                stage,
                expected,
                found,
            } => {
                assert_eq!(stage, "pipeline result");
                assert_eq!(expected, "i32");
                assert_eq!(found, "usize");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_execute_with_report() {
        let pipeline: Pipeline<usize> = make_pipeline(
            Some(DataSource::in_memory(["a", "b", "c"])),
            vec![
                Step::new("Upper", |v: Vec<String>| {
                    v.into_iter().map(|s| s.to_uppercase()).collect::<Vec<_>>()
                }),
                Step::new("Count", |v: Vec<String>| v.len()),
            ],
        );

        let report = pipeline.execute_with_report().await.unwrap();
        assert_eq!(report.value, 3);
        assert_eq!(report.source_lines, 3);
        assert_eq!(report.steps.len(), 2);
        assert_eq!(report.steps[0].name, "Upper");

        let summary = report.summary();
        assert_eq!(
            summary.get("total_steps").unwrap(),
            &serde_json::Value::Number(2.into())
        );
        assert_eq!(
            summary.get("source_lines").unwrap(),
            &serde_json::Value::Number(3.into())
        );
        let executed = summary.get("executed_steps").unwrap().as_array().unwrap();
        assert_eq!(executed[1], serde_json::Value::String("Count".to_string()));
    }

    #[tokio::test]
    async fn test_clone_shares_steps() {
        let pipeline: Pipeline<Vec<String>> =
            make_pipeline(Some(DataSource::in_memory(["z"])), vec![]);
        let copy = pipeline.clone();

        assert!(copy.is_empty());
        assert_eq!(copy.execute().await.unwrap(), vec!["z".to_string()]);
        assert_eq!(copy.data_source(), pipeline.data_source());
    }
}
