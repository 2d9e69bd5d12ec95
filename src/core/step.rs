use crate::core::value::ErasedValue;
use crate::utils::error::{BoxError, PipelineError, Result};
use std::any::{type_name, Any};
use std::fmt;
use std::sync::Arc;

/// 轉換失敗的原因，由 `Step::apply` 補上步驟名稱
enum StepFault {
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
    Failed(BoxError),
}

type Transform = dyn Fn(ErasedValue) -> std::result::Result<ErasedValue, StepFault> + Send + Sync;

/// 一個具名的轉換步驟，輸入輸出型別在建構後被抹除
#[derive(Clone)]
pub struct Step {
    name: String,
    input_type: &'static str,
    output_type: &'static str,
    transform: Arc<Transform>,
}

impl Step {
    /// Wraps an infallible `I -> O` function.
    pub fn new<I, O, F>(name: impl Into<String>, transform: F) -> Self
    where
        I: Any + Send,
        O: Any + Send,
        F: Fn(I) -> O + Send + Sync + 'static,
    {
        Self::fallible(name, move |input: I| {
            Ok::<O, std::convert::Infallible>(transform(input))
        })
    }

    /// Wraps an `I -> Result<O, E>` function; an `Err` aborts the pipeline.
    pub fn fallible<I, O, E, F>(name: impl Into<String>, transform: F) -> Self
    where
        I: Any + Send,
        O: Any + Send,
        E: Into<BoxError>,
        F: Fn(I) -> std::result::Result<O, E> + Send + Sync + 'static,
    {
        let erased = move |input: ErasedValue| -> std::result::Result<ErasedValue, StepFault> {
            let typed = input.downcast::<I>().map_err(|found| StepFault::Mismatch {
                expected: type_name::<I>(),
                found: found.type_name(),
            })?;
            let output = transform(typed).map_err(|e| StepFault::Failed(e.into()))?;
            Ok(ErasedValue::new(output))
        };

        Self {
            name: name.into(),
            input_type: type_name::<I>(),
            output_type: type_name::<O>(),
            transform: Arc::new(erased),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_type(&self) -> &'static str {
        self.input_type
    }

    pub fn output_type(&self) -> &'static str {
        self.output_type
    }

    pub fn apply(&self, input: ErasedValue) -> Result<ErasedValue> {
        (self.transform)(input).map_err(|fault| match fault {
            StepFault::Mismatch { expected, found } => PipelineError::TypeMismatch {
                stage: format!("step '{}'", self.name),
                expected,
                found,
            },
            StepFault::Failed(source) => PipelineError::StepExecution {
                step_name: self.name.clone(),
                source,
            },
        })
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("input_type", &self.input_type)
            .field("output_type", &self.output_type)
            .finish()
    }
}
