//! Error types for each layer of the pipeline
//!
//! Navigation failures are year-fatal only when they hit the index page.
//! Everything a single detail page can go wrong with is a [`RecordError`],
//! which the controller counts and moves past.

use std::time::Duration;

use thiserror::Error;

/// Failure of the page navigator capability
#[derive(Debug, Error)]
pub enum NavigatorError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    #[error("request for {url} failed: {reason}")]
    Http { url: String, reason: String },

    #[error("{url} answered with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("timed out after {waited:?} waiting for {target}")]
    Timeout { target: String, waited: Duration },

    #[error("no element matches {locator}")]
    ElementNotFound { locator: String },

    #[error("invalid locator {locator}: {reason}")]
    InvalidLocator { locator: String, reason: String },

    /// The page navigated after the element was located
    #[error("stale element: the page has changed since it was located")]
    StaleElement,

    #[error("element has no link target")]
    NotALink,

    #[error("no page is open")]
    NoPage,

    #[error("navigator has been closed")]
    Closed,
}

/// A value was present but could not be normalized
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("not a currency amount: {0:?}")]
    Currency(String),

    #[error("not a recognizable release date: {0:?}")]
    Date(String),
}

/// Record-level failure; never aborts the year
#[derive(Debug, Error)]
pub enum RecordError {
    /// An expected sub-element is missing, the page is not extractable
    #[error("record skipped: {0}")]
    Skip(String),

    /// The page loaded but a required field could not be read
    #[error("failed to read {field}: {reason}")]
    Extraction { field: &'static str, reason: String },

    #[error(transparent)]
    Format(#[from] FormatError),
}

impl RecordError {
    pub(crate) fn extraction(field: &'static str, err: impl std::fmt::Display) -> Self {
        RecordError::Extraction {
            field,
            reason: err.to_string(),
        }
    }

    /// Skips are counted apart from extraction and format failures
    pub fn is_skip(&self) -> bool {
        matches!(self, RecordError::Skip(_))
    }
}

/// Failure persisting a year's dataset
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Year-level failure; the controller skips the year and moves on
#[derive(Debug, Error)]
pub enum YearError {
    #[error("could not start a navigator for {year}: {source}")]
    Launch { year: i32, source: NavigatorError },

    #[error("index for {year} unavailable: {source}")]
    Index { year: i32, source: NavigatorError },

    #[error("failed to write dataset for {year}: {source}")]
    Sink { year: i32, source: SinkError },
}

/// Invalid or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot parse config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
