pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, ScrapeSettings};
pub use core::{etl::EtlEngine, pipeline::NhlPipeline};
pub use domain::model::{CycleOutcome, Leader};
pub use utils::error::{Result, ScrapeError};
