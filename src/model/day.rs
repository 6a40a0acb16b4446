//! The `Day` type: a calendar date whose canonical text form is `YYYY/MM/DD`.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

const CANONICAL: &str = "%Y/%m/%d";
const MONTH_KEY: &str = "%Y/%m";

/// A calendar date.
///
/// Ordering is chronological. Because the canonical text is zero-padded and year-first, the
/// chronological order and the lexicographic order of the canonical text always coincide, but
/// comparisons here never depend on that: they go through `NaiveDate`.
///
/// # Examples
///
/// ```
/// # use paylog::model::Day;
/// # use std::str::FromStr;
/// let day = Day::from_str("2024/04/30").unwrap();
/// assert_eq!(day.to_string(), "2024/04/30");
/// assert_eq!(day.month_key(), "2024/04");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Day(NaiveDate);

impl Day {
    /// Creates a `Day` from its parts, returning `None` if they do not name a real date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Returns the underlying `NaiveDate`.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The `YYYY/MM` prefix used to group days by month.
    pub fn month_key(&self) -> String {
        self.0.format(MONTH_KEY).to_string()
    }

    pub fn first_of_month(&self) -> Day {
        Day(self.0.with_day(1).unwrap_or(self.0))
    }

    pub fn last_of_month(&self) -> Day {
        let first = self.first_of_month().0;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);
        Day(last)
    }

    /// Parses text typed into a date field. Accepts the canonical `YYYY/MM/DD` as well as the
    /// `YYYY-MM-DD` form that date pickers produce.
    pub fn parse_input(s: &str) -> Result<Self, DayError> {
        let trimmed = s.trim();
        Self::from_str(&trimmed.replace('-', "/"))
    }
}

/// Returns true if `s` has the exact `dddd/dd/dd` shape, without checking that it is a real date.
pub fn has_canonical_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(ix, b)| match ix {
            4 | 7 => *b == b'/',
            _ => b.is_ascii_digit(),
        })
}

/// An error that occurs when text does not describe a canonical calendar date.
pub struct DayError(String);

impl DayError {
    /// The text that failed to parse.
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl Debug for DayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DayError({:?})", self.0)
    }
}

impl Display for DayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid YYYY/MM/DD date", self.0)
    }
}

impl std::error::Error for DayError {}

impl FromStr for Day {
    type Err = DayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts unpadded fields, so the shape is checked first
        if !has_canonical_shape(s) {
            return Err(DayError(s.to_string()));
        }
        NaiveDate::parse_from_str(s, CANONICAL)
            .map(Day)
            .map_err(|_| DayError(s.to_string()))
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL))
    }
}

impl Serialize for Day {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Day::from_str(&s).map_err(serde::de::Error::custom)
    }
}

impl From<NaiveDate> for Day {
    fn from(value: NaiveDate) -> Self {
        Day(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> Day {
        Day::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_canonical() {
        let d = day("2024/04/30");
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
        assert_eq!(d.to_string(), "2024/04/30");
    }

    #[test]
    fn test_parse_rejects_unpadded() {
        assert!(Day::from_str("2024/4/30").is_err());
        assert!(Day::from_str("24/04/30").is_err());
    }

    #[test]
    fn test_parse_rejects_impossible_date() {
        assert!(Day::from_str("2024/02/30").is_err());
        assert!(Day::from_str("2023/13/01").is_err());
        assert!(Day::from_str("2023/02/29").is_err());
    }

    #[test]
    fn test_parse_input_accepts_dashes() {
        assert_eq!(Day::parse_input("2024-01-05").unwrap(), day("2024/01/05"));
        assert_eq!(Day::parse_input(" 2024/01/05 ").unwrap(), day("2024/01/05"));
        assert!(Day::parse_input("").is_err());
    }

    #[test]
    fn test_shape() {
        assert!(has_canonical_shape("2024/02/30"));
        assert!(!has_canonical_shape("2024-02-03"));
        assert!(!has_canonical_shape("2024/02/3"));
        assert!(!has_canonical_shape("２０２４/02/03"));
    }

    #[test]
    fn test_ordering_is_chronological() {
        assert!(day("2023/12/31") < day("2024/01/01"));
        assert!(day("2024/01/09") < day("2024/01/10"));
    }

    #[test]
    fn test_month_bounds() {
        let d = day("2024/02/14");
        assert_eq!(d.first_of_month(), day("2024/02/01"));
        assert_eq!(d.last_of_month(), day("2024/02/29"));
        assert_eq!(day("2023/02/14").last_of_month(), day("2023/02/28"));
        assert_eq!(day("2023/12/01").last_of_month(), day("2023/12/31"));
    }

    #[test]
    fn test_serde() {
        let d = day("2024/04/30");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2024/04/30\"");
        let back: Day = serde_json::from_str("\"2024/04/30\"").unwrap();
        assert_eq!(back, d);
        assert!(serde_json::from_str::<Day>("\"2024/02/31\"").is_err());
    }
}
