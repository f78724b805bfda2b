//! Box-office record harvester
//!
//! Walks a year's worldwide ranking index, follows each title to its
//! summary page and extracts a fixed eleven-column record:
//! - Index walk and detail extraction through a [`PageNavigator`]
//! - Normalization of currency, running time and localized dates
//! - Assembly onto the fixed output schema
//! - One CSV file per year

pub mod assemble;
pub mod config;
pub mod error;
pub mod extractors;
pub mod logger;
pub mod navigator;
pub mod normalize;
pub mod pipeline;
pub mod schema;
pub mod sink;

pub use config::PipelineConfig;
pub use error::{ConfigError, FormatError, NavigatorError, RecordError, SinkError, YearError};
pub use navigator::{HttpNavigator, InMemorySite, NavigatorLauncher, PageNavigator};
pub use pipeline::{Pipeline, RunSummary, YearReport};
pub use schema::{Column, MovieRecord, YearDataset};
pub use sink::{CsvSink, MemorySink, Sink};
