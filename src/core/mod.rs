pub mod etl;
pub mod metrics;
pub mod pipeline;
pub mod teams;

pub use crate::domain::model::{PlayerStats, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
