//! `ua-pipeline`: run orchestration for usim2asim.
//!
//! Wires the zone, table, attribute, skim and output crates into one batch
//! run driven by a [`PipelineConfig`].
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `parquet` | `matrix_format = "parquet"` becomes available.             |
//! | `http`    | Schools and colleges are fetched from the Education Data API. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ua_pipeline::{LoggingObserver, PipelineBuilder, PipelineConfig};
//!
//! let config = PipelineConfig::load(Path::new("usim2asim.toml"))?;
//! let summary = PipelineBuilder::new(config)
//!     .build()?
//!     .run(&mut LoggingObserver::new())?;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod observer;
pub mod pipeline;


pub use builder::PipelineBuilder;
pub use config::{DirectoryConfig, PipelineConfig, DEFAULT_LOG_LEVEL};
pub use error::{PipelineError, PipelineResult};
pub use observer::{LoggingObserver, NoopObserver, PipelineObserver, Step};
pub use pipeline::{Pipeline, RunSummary, ValidationReport};
