//! Detail page extraction
//!
//! From a title's detail page: follow the summary link, then read title,
//! summary, the gross triad and the attribute block into a [`RawFieldBag`].

use std::collections::BTreeMap;
use std::time::Duration;

use log::debug;

use super::locators::{ATTRIBUTES, GROSS_CELLS, GROSS_ROWS, SUMMARY, SUMMARY_LINK, TITLE};
use crate::error::RecordError;
use crate::navigator::{Element, PageNavigator};
use crate::normalize::is_sentinel;

/// Attribute labels that are never collected
pub const EXCLUDED_FIELDS: [&str; 1] = ["IMDbPro"];

/// Raw strings collected from one summary page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFieldBag {
    pub title: String,
    pub summary: String,
    pub gross: RawGross,
    /// Attribute label -> first value line
    pub attributes: BTreeMap<String, String>,
}

/// Raw gross strings; `None` where the page shows the sentinel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGross {
    pub domestic: Option<String>,
    pub international: Option<String>,
    pub total: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GrossSlot {
    Domestic,
    International,
    Worldwide,
}

impl GrossSlot {
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        if label.starts_with("Domestic") {
            Some(GrossSlot::Domestic)
        } else if label.starts_with("International") {
            Some(GrossSlot::International)
        } else if label.starts_with("Worldwide") {
            Some(GrossSlot::Worldwide)
        } else {
            None
        }
    }
}

impl RawGross {
    /// Three value cells in page order: domestic, international, worldwide.
    ///
    /// A sentinel in the first cell means no domestic figure; otherwise a
    /// sentinel in the second means no international figure. The cells are
    /// never reordered.
    pub fn from_positional(cells: &[String]) -> Option<Self> {
        let [first, second, third, ..] = cells else {
            return None;
        };

        let gross = if is_sentinel(first) {
            RawGross {
                domestic: None,
                international: Some(second.clone()),
                total: third.clone(),
            }
        } else if is_sentinel(second) {
            RawGross {
                domestic: Some(first.clone()),
                international: None,
                total: third.clone(),
            }
        } else {
            RawGross {
                domestic: Some(first.clone()),
                international: Some(second.clone()),
                total: third.clone(),
            }
        };
        Some(gross)
    }

    /// (label, value) rows in any order. Every slot must be labeled exactly
    /// once, otherwise `None`. Also `None` when neither domestic nor
    /// international applies, leaving that case to the positional rule.
    pub fn from_labeled<'a>(rows: impl IntoIterator<Item = (&'a str, &'a str)>) -> Option<Self> {
        let mut domestic = None;
        let mut international = None;
        let mut worldwide = None;

        for (label, value) in rows {
            let slot = match GrossSlot::from_label(label)? {
                GrossSlot::Domestic => &mut domestic,
                GrossSlot::International => &mut international,
                GrossSlot::Worldwide => &mut worldwide,
            };
            if slot.replace(value.trim().to_string()).is_some() {
                return None;
            }
        }

        let applicable = |v: String| (!is_sentinel(&v)).then_some(v);
        let gross = RawGross {
            domestic: applicable(domestic?),
            international: applicable(international?),
            total: worldwide?,
        };
        if gross.domestic.is_none() && gross.international.is_none() {
            return None;
        }
        Some(gross)
    }
}

/// Extract the raw fields of the title whose detail page is currently open.
///
/// A missing or unfollowable summary link is a skip. Once the summary page
/// is loaded, a missing title, summary, gross triad or attribute block is
/// an extraction failure.
pub fn extract_detail<N: PageNavigator + ?Sized>(
    navigator: &mut N,
    timeout: Duration,
) -> Result<RawFieldBag, RecordError> {
    let summary_link = navigator
        .wait_for_first(&SUMMARY_LINK, timeout)
        .map_err(|e| RecordError::Skip(format!("no summary link: {e}")))?;
    navigator
        .click(&summary_link)
        .map_err(|e| RecordError::Skip(format!("cannot open summary page: {e}")))?;

    let title = navigator
        .wait_for_first(&TITLE, timeout)
        .map_err(|e| RecordError::extraction("title", e))?;
    let summary = navigator
        .wait_for_first(&SUMMARY, timeout)
        .map_err(|e| RecordError::extraction("summary", e))?;

    let gross = extract_gross(navigator, timeout)?;

    let blocks = navigator
        .wait_for(&ATTRIBUTES, timeout)
        .map_err(|e| RecordError::extraction("attributes", e))?;
    let mut attributes = parse_attribute_blocks(&blocks);
    for excluded in EXCLUDED_FIELDS {
        attributes.remove(excluded);
    }

    Ok(RawFieldBag {
        title: title.text().to_string(),
        summary: summary.text().to_string(),
        gross,
        attributes,
    })
}

fn extract_gross<N: PageNavigator + ?Sized>(
    navigator: &mut N,
    timeout: Duration,
) -> Result<RawGross, RecordError> {
    if let Ok(rows) = navigator.wait_for(&GROSS_ROWS, timeout) {
        let labeled = RawGross::from_labeled(rows.iter().filter_map(|row| {
            let mut lines = row.lines();
            let label = lines.next()?;
            let value = lines.last()?;
            Some((label, value))
        }));
        if let Some(gross) = labeled {
            return Ok(gross);
        }
        debug!("gross rows are not labeled, reading cells by position");
    }

    let cells: Vec<String> = navigator
        .wait_for(&GROSS_CELLS, timeout)
        .map_err(|e| RecordError::extraction("gross figures", e))?
        .iter()
        .map(|cell| cell.text().to_string())
        .collect();

    RawGross::from_positional(&cells).ok_or_else(|| RecordError::Extraction {
        field: "gross figures",
        reason: format!("expected 3 cells, found {}", cells.len()),
    })
}

/// Label line followed by value line; shorter blocks are skipped
fn parse_attribute_blocks(blocks: &[Element]) -> BTreeMap<String, String> {
    let mut attributes = BTreeMap::new();
    for block in blocks {
        let mut lines = block.lines();
        match (lines.next(), lines.next()) {
            (Some(label), Some(value)) => {
                attributes.insert(label.trim().to_string(), value.trim().to_string());
            }
            _ => debug!("skipping attribute block {:?}", block.text()),
        }
    }
    attributes
}
