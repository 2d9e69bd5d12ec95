pub mod builder;
pub mod pipeline;
pub mod source;
pub mod step;
pub mod value;

pub use crate::domain::model::DataSource;
pub use crate::domain::ports::{SourceReader, StepLogger};
pub use crate::utils::error::Result;
