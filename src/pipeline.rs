//! Batch pipeline controller
//!
//! Drives one year at a time: launch a navigator, walk the index, then for
//! each link fetch, extract, normalize and assemble a record. Failures of a
//! single link are logged, counted and left behind; only an unavailable
//! index (or navigator, or sink) costs the whole year. Nothing is retried.

use std::fmt;
use std::ops::RangeInclusive;
use std::time::Duration;

use log::{debug, error, info, warn};
use url::Url;

use crate::assemble::assemble;
use crate::config::PipelineConfig;
use crate::error::{RecordError, YearError};
use crate::extractors::{extract_detail, walk_index};
use crate::navigator::{NavigatorLauncher, PageNavigator, Session};
use crate::normalize::normalize;
use crate::schema::{MovieRecord, YearDataset};
use crate::sink::Sink;

/// Stage a link was in when it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStage {
    Fetching,
    Extracting,
    Normalizing,
}

impl fmt::Display for LinkStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkStage::Fetching => "fetching",
            LinkStage::Extracting => "extracting",
            LinkStage::Normalizing => "normalizing",
        };
        f.write_str(name)
    }
}

/// Why one link produced no record
#[derive(Debug)]
pub struct LinkFailure {
    pub stage: LinkStage,
    pub error: RecordError,
}

impl LinkFailure {
    fn at(stage: LinkStage) -> impl FnOnce(RecordError) -> Self {
        move |error| LinkFailure { stage, error }
    }
}

/// Counts for one completed year. `appended = links - skipped - errored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearReport {
    pub year: i32,
    pub links: usize,
    pub appended: usize,
    /// Pages that were not extractable
    pub skipped: usize,
    /// Pages that failed extraction or normalization
    pub errored: usize,
}

impl YearReport {
    fn new(year: i32, links: usize) -> Self {
        Self {
            year,
            links,
            appended: 0,
            skipped: 0,
            errored: 0,
        }
    }

    pub fn lost(&self) -> usize {
        self.skipped + self.errored
    }
}

/// Outcome of a multi-year run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub reports: Vec<YearReport>,
    pub failed: Vec<(i32, YearError)>,
}

impl RunSummary {
    pub fn total_records(&self) -> usize {
        self.reports.iter().map(|r| r.appended).sum()
    }

    pub fn failed_years(&self) -> Vec<i32> {
        self.failed.iter().map(|(year, _)| *year).collect()
    }
}

pub struct Pipeline<L, S> {
    base_url: Url,
    timeout: Duration,
    launcher: L,
    sink: S,
}

impl<L, S> Pipeline<L, S>
where
    L: NavigatorLauncher,
    S: Sink,
{
    pub fn new(config: &PipelineConfig, launcher: L, sink: S) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.wait_timeout(),
            launcher,
            sink,
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Run every year in order; a failed year is logged and skipped
    pub fn run(&mut self, years: RangeInclusive<i32>) -> RunSummary {
        let mut summary = RunSummary::default();
        for year in years {
            match self.run_year(year) {
                Ok(report) => summary.reports.push(report),
                Err(e) => {
                    error!("Skipping {year}: {e}");
                    summary.failed.push((year, e));
                }
            }
        }
        summary
    }

    /// Collect and flush one year.
    ///
    /// The navigator is released when this returns, whatever the outcome.
    pub fn run_year(&mut self, year: i32) -> Result<YearReport, YearError> {
        info!("Collecting {year}...");
        let navigator = self
            .launcher
            .launch()
            .map_err(|source| YearError::Launch { year, source })?;
        let mut session = Session::new(navigator);

        let links = walk_index(&mut *session, &self.base_url, year, self.timeout)
            .map_err(|source| YearError::Index { year, source })?;

        let mut report = YearReport::new(year, links.len());
        let mut dataset = YearDataset::new(year);
        for link in links {
            match self.process_link(&mut *session, &link) {
                Ok(record) => {
                    debug!("{year}: appended {:?}", record.movie_title);
                    dataset.push(record);
                    report.appended += 1;
                }
                Err(failure) => {
                    warn!("{year}: no record from {link} ({}): {}", failure.stage, failure.error);
                    if failure.error.is_skip() {
                        report.skipped += 1;
                    } else {
                        report.errored += 1;
                    }
                }
            }
        }

        self.sink
            .write_year(year, &dataset)
            .map_err(|source| YearError::Sink { year, source })?;
        drop(session);

        if report.lost() > 0 {
            warn!(
                "{year}: {} of {} records kept, {} skipped, {} failed",
                report.appended, report.links, report.skipped, report.errored
            );
        } else {
            info!("{year}: {} records kept", report.appended);
        }
        Ok(report)
    }

    fn process_link<N: PageNavigator + ?Sized>(
        &self,
        navigator: &mut N,
        link: &Url,
    ) -> Result<MovieRecord, LinkFailure> {
        navigator
            .open(link)
            .map_err(|e| RecordError::Skip(format!("detail page unavailable: {e}")))
            .map_err(LinkFailure::at(LinkStage::Fetching))?;

        let raw = extract_detail(navigator, self.timeout).map_err(LinkFailure::at(LinkStage::Extracting))?;

        let fields = normalize(raw)
            .map_err(RecordError::from)
            .map_err(LinkFailure::at(LinkStage::Normalizing))?;

        Ok(assemble(fields))
    }
}
