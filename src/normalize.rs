//! Value normalization: raw page strings into typed values
//!
//! Currency and date failures are [`FormatError`]s and cost the record.
//! Running time is the exception: anything unparseable becomes absent.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;

use crate::error::FormatError;
use crate::extractors::{RawFieldBag, RawGross};
use crate::schema::MonetaryFigureSet;

/// Placeholder the source uses for "not applicable"
pub const SENTINEL: &str = "\u{2013}";

/// Localized month names and their canonical English form
const MONTHS: [(&str, &str); 12] = [
    ("Janeiro", "January"),
    ("Fevereiro", "February"),
    ("Março", "March"),
    ("Abril", "April"),
    ("Maio", "May"),
    ("Junho", "June"),
    ("Julho", "July"),
    ("Agosto", "August"),
    ("Setembro", "September"),
    ("Outubro", "October"),
    ("Novembro", "November"),
    ("Dezembro", "December"),
];

const ENGLISH_MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

pub fn is_sentinel(raw: &str) -> bool {
    matches!(raw.trim(), SENTINEL | "\u{2014}" | "-")
}

/// Parse "$1,234,567" into whole dollars
pub fn parse_currency(raw: &str) -> Result<u64, FormatError> {
    let digits: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();

    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(FormatError::Currency(raw.to_string()));
    }
    digits
        .parse()
        .map_err(|_| FormatError::Currency(raw.to_string()))
}

/// Parse "Month Day, Year", ignoring any "(...)" annotation and translating
/// localized month names first
pub fn parse_release_date(raw: &str) -> Result<NaiveDate, FormatError> {
    let head = raw.split_once('(').map_or(raw, |(head, _)| head).trim();

    let canonical = MONTHS
        .iter()
        .find(|(local, _)| head.contains(local))
        .map(|(local, english)| head.replace(local, english))
        .unwrap_or_else(|| head.to_string());

    // %B alone would also take "Mar" or "MARCH"
    let month = canonical.split_whitespace().next().unwrap_or_default();
    if !ENGLISH_MONTHS.contains(&month) {
        return Err(FormatError::Date(raw.to_string()));
    }

    NaiveDate::parse_from_str(&canonical, "%B %d, %Y")
        .map_err(|_| FormatError::Date(raw.to_string()))
}

/// Parse "2 hr 15 min", "1 hr" or "45 min" into minutes
pub fn parse_running_time(raw: &str) -> Option<u32> {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.is_empty() || tokens.len() % 2 != 0 {
        return None;
    }

    let mut hours: Option<u32> = None;
    let mut minutes: Option<u32> = None;
    for pair in tokens.chunks(2) {
        let amount: u32 = pair[0].parse().ok()?;
        let slot = match pair[1] {
            "hr" | "hrs" | "hour" | "hours" => &mut hours,
            "min" | "mins" | "minute" | "minutes" => &mut minutes,
            _ => return None,
        };
        if slot.replace(amount).is_some() {
            // same unit twice
            return None;
        }
    }

    hours
        .unwrap_or(0)
        .checked_mul(60)?
        .checked_add(minutes.unwrap_or(0))
}

/// How an attribute's value is normalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttributeKind {
    Text,
    Currency,
    Date,
    RunningTime,
}

fn attribute_kind(label: &str) -> AttributeKind {
    match label {
        "Earliest Release Date" => AttributeKind::Date,
        "Running Time" => AttributeKind::RunningTime,
        "Domestic Opening" | "Budget" => AttributeKind::Currency,
        _ => AttributeKind::Text,
    }
}

/// Normalized attribute value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Text(String),
    Amount(u64),
    Date(NaiveDate),
    Minutes(u32),
    Absent,
}

/// A detail page's fields after normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedFields {
    pub title: String,
    pub summary: String,
    pub gross: MonetaryFigureSet,
    /// Keyed by source label
    pub attributes: BTreeMap<String, AttributeValue>,
}

/// Normalize every field of a raw bag
pub fn normalize(raw: RawFieldBag) -> Result<NormalizedFields, FormatError> {
    let gross = normalize_gross(&raw.gross)?;

    let mut attributes = BTreeMap::new();
    for (label, value) in raw.attributes {
        let normalized = normalize_attribute(&label, &value)?;
        attributes.insert(label, normalized);
    }

    Ok(NormalizedFields {
        title: raw.title,
        summary: raw.summary,
        gross,
        attributes,
    })
}

fn normalize_gross(raw: &RawGross) -> Result<MonetaryFigureSet, FormatError> {
    Ok(MonetaryFigureSet {
        domestic: raw.domestic.as_deref().map(parse_currency).transpose()?,
        international: raw.international.as_deref().map(parse_currency).transpose()?,
        total: parse_currency(&raw.total)?,
    })
}

fn normalize_attribute(label: &str, value: &str) -> Result<AttributeValue, FormatError> {
    if is_sentinel(value) {
        return Ok(AttributeValue::Absent);
    }

    let normalized = match attribute_kind(label) {
        AttributeKind::Text => AttributeValue::Text(value.to_string()),
        AttributeKind::Currency => AttributeValue::Amount(parse_currency(value)?),
        AttributeKind::Date => AttributeValue::Date(parse_release_date(value)?),
        AttributeKind::RunningTime => match parse_running_time(value) {
            Some(minutes) => AttributeValue::Minutes(minutes),
            None => {
                debug!("unparseable running time {value:?}, leaving it empty");
                AttributeValue::Absent
            }
        },
    };
    Ok(normalized)
}
