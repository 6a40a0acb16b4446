//! Normalizes raw text scraped from the purchase history page into `Records`.
//!
//! The page renders dates in two ways: `4月30日` for the current year and `2023/04/30` for past
//! years. Consecutive purchases on the same day only carry the date label on the first row, so an
//! empty date means "same day as the row above".

use crate::model::{Day, Record, Records, Yen, YenError};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use tracing::debug;

/// One scraped row, exactly as the page presented it.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawTriple {
    /// The date label, possibly empty.
    pub day: String,
    pub channel: String,
    /// The amount as displayed, e.g. `¥1,000`.
    #[serde(rename = "yen")]
    pub yen_text: String,
}

impl RawTriple {
    pub fn new(
        day: impl Into<String>,
        channel: impl Into<String>,
        yen_text: impl Into<String>,
    ) -> Self {
        Self {
            day: day.into(),
            channel: channel.into(),
            yen_text: yen_text.into(),
        }
    }
}

/// The ways extraction can fail. Any of them aborts the whole batch.
pub enum ExtractError {
    /// A date label was neither `<M>月<D>日` nor `YYYY/MM/DD`, or did not name a real date.
    MalformedDate { index: usize, token: String },
    /// The first row had no date label to carry forward from.
    MissingPriorDate { index: usize },
    /// The channel was empty once surrounding whitespace was removed.
    MissingChannel { index: usize },
    /// The amount text was not an integer once the currency glyph and separators were removed.
    InvalidAmount { index: usize, source: YenError },
    /// The amounts are too large to be totaled exactly.
    TotalOverflow,
}

impl Debug for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for ExtractError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::MalformedDate { index, token } => {
                write!(f, "Malformed date '{token}' at row {index}")
            }
            ExtractError::MissingPriorDate { index } => write!(
                f,
                "Row {index} has no date and there is no previous row to take it from"
            ),
            ExtractError::MissingChannel { index } => write!(f, "Row {index} has no channel"),
            ExtractError::InvalidAmount { index, source } => {
                write!(f, "Invalid amount at row {index}: {source}")
            }
            ExtractError::TotalOverflow => write!(f, "The amounts are too large to total"),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExtractError::InvalidAmount { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Turns a single date label into a `Day`.
///
/// Labels without a year are placed in `year`, which is the current year unless a specific year
/// is requested.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DateNormalizer {
    year: i32,
}

impl DateNormalizer {
    pub fn new(year: i32) -> Self {
        Self { year }
    }

    /// A normalizer for the current local calendar year.
    pub fn this_year() -> Self {
        Self::new(Local::now().year())
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Normalizes a non-empty date label. The empty label is handled by `extract`, which carries
    /// the previous row's day forward.
    pub fn normalize(&self, token: &str) -> Result<Day, ExtractError> {
        let token = token.trim();
        let malformed = || ExtractError::MalformedDate {
            index: 0,
            token: token.to_string(),
        };

        if let Some((month, day)) = parse_month_day(token) {
            return Day::from_ymd(self.year, month, day).ok_or_else(malformed);
        }
        Day::from_str(token).map_err(|_| malformed())
    }
}

/// Splits `<M>月<D>日` into its month and day numbers.
fn parse_month_day(token: &str) -> Option<(u32, u32)> {
    let (month, day) = token.strip_suffix('日')?.split_once('月')?;
    Some((parse_digits(month)?, parse_digits(day)?))
}

fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    u32::from_str(s).ok()
}

/// Converts scraped rows into records, in order.
///
/// # Errors
/// Returns the first `ExtractError` encountered. No partial result is produced.
pub fn extract(raw: &[RawTriple], normalizer: &DateNormalizer) -> Result<Records, ExtractError> {
    let mut records: Vec<Record> = Vec::with_capacity(raw.len());
    for (index, triple) in raw.iter().enumerate() {
        let day = if triple.day.trim().is_empty() {
            records
                .last()
                .map(Record::day)
                .ok_or(ExtractError::MissingPriorDate { index })?
        } else {
            normalizer
                .normalize(&triple.day)
                .map_err(|e| match e {
                    ExtractError::MalformedDate { token, .. } => {
                        ExtractError::MalformedDate { index, token }
                    }
                    other => other,
                })?
        };
        let yen = Yen::from_str(&triple.yen_text)
            .map_err(|source| ExtractError::InvalidAmount { index, source })?;
        let channel = triple.channel.trim();
        if channel.is_empty() {
            return Err(ExtractError::MissingChannel { index });
        }
        records.push(Record::new(day, channel, yen));
    }
    let records = Records::new(records);
    if records.checked_total().is_none() {
        return Err(ExtractError::TotalOverflow);
    }
    debug!("Extracted {} records", records.len());
    Ok(records)
}
