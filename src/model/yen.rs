//! Yen type for handling whole-yen amounts scraped as currency text.
//!
//! Scraped amounts look like `¥1,234`. This module strips the currency glyph and digit-group
//! separators and keeps the integer value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

/// The currency glyphs that may prefix an amount: half-width `¥` and full-width `￥`.
const GLYPHS: [char; 2] = ['¥', '￥'];

/// Represents an amount of yen. Amounts can be zero or negative (refunds).
///
/// # Examples
///
/// ```
/// # use paylog::model::Yen;
/// # use std::str::FromStr;
/// assert_eq!(Yen::from_str("¥1,234").unwrap().value(), 1234);
/// assert_eq!(Yen::from_str("￥0").unwrap().value(), 0);
/// assert!(Yen::from_str("¥12.50").is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Yen(i64);

impl Yen {
    pub const ZERO: Yen = Yen(0);

    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn checked_add(self, rhs: Yen) -> Option<Yen> {
        self.0.checked_add(rhs.0).map(Yen)
    }
}

/// An error that can occur when parsing currency text into `Yen`.
pub struct YenError(String);

impl YenError {
    /// The text that failed to parse.
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl Debug for YenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "YenError({:?})", self.0)
    }
}

impl Display for YenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' is not a valid yen amount", self.0)
    }
}

impl std::error::Error for YenError {}

impl FromStr for Yen {
    type Err = YenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || YenError(s.to_string());
        let trimmed = s.trim();

        // A refund may be written "-¥500" or "¥-500"
        let (negative, rest) = match trimmed.strip_prefix('-') {
            Some(after_minus) => (true, after_minus),
            None => (false, trimmed),
        };
        let rest = rest.strip_prefix(GLYPHS).unwrap_or(rest);
        let (negative, rest) = match rest.strip_prefix('-') {
            Some(after_minus) if !negative => (true, after_minus),
            Some(_) => return Err(err()),
            None => (negative, rest),
        };

        // Separators may only sit between digits
        if rest.starts_with(',') || rest.ends_with(',') || rest.contains(",,") {
            return Err(err());
        }
        let digits = rest.replace(',', "");
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(err());
        }

        let magnitude = i64::from_str(&digits).map_err(|_| err())?;
        Ok(Yen(if negative { -magnitude } else { magnitude }))
    }
}

impl Display for Yen {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (ix, c) in digits.chars().enumerate() {
            if ix > 0 && (digits.len() - ix) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        write!(f, "{sign}¥{grouped}")
    }
}

/// Saturates at the bounds of `i64`. Accepted datasets never reach them, see
/// `Records::checked_total`.
impl Add for Yen {
    type Output = Yen;

    fn add(self, rhs: Self) -> Self::Output {
        Yen(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Yen {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Yen::ZERO, Add::add)
    }
}

impl From<i64> for Yen {
    fn from(value: i64) -> Self {
        Yen(value)
    }
}

impl From<Yen> for i64 {
    fn from(yen: Yen) -> Self {
        yen.0
    }
}
