use crate::domain::ports::StepLogger;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("small_pipeline=debug,info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("small_pipeline=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("small_pipeline=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

/// 預設的步驟記錄器，輸出到 tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingStepLogger;

impl StepLogger for TracingStepLogger {
    fn step_started(&self, name: &str) {
        tracing::info!("Executing step: {}", name);
    }

    fn step_finished(&self, name: &str, elapsed: Duration) {
        tracing::debug!("Step '{}' finished in {:?}", name, elapsed);
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopStepLogger;

impl StepLogger for NoopStepLogger {
    fn step_started(&self, _name: &str) {}
}
