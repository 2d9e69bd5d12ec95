pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::PipelineConfig;

pub use adapters::DefaultSourceReader;
pub use core::{
    builder::{pipeline, PipelineBuilder},
    pipeline::{ExecutionReport, Pipeline, StepTiming},
    step::Step,
    value::ErasedValue,
};
pub use domain::{
    model::DataSource,
    ports::{SourceReader, StepLogger},
};
pub use utils::error::{PipelineError, Result};
pub use utils::logger::{NoopStepLogger, TracingStepLogger};
