use crate::model::{Day, Yen};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Represents a single purchase from the scraped history.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Record {
    /// The date of the purchase.
    pub(crate) day: Day,
    /// The counterparty that received the payment.
    pub(crate) channel: String,
    /// The amount paid. Negative for refunds.
    pub(crate) yen: Yen,
}

impl Record {
    pub fn new(day: Day, channel: impl Into<String>, yen: impl Into<Yen>) -> Self {
        Self {
            day,
            channel: channel.into(),
            yen: yen.into(),
        }
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn yen(&self) -> Yen {
        self.yen
    }
}

/// The canonical record set. It is only ever replaced as a whole.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Records(Vec<Record>);

impl Records {
    pub fn new(records: Vec<Record>) -> Self {
        Self(records)
    }

    /// The sum of `yen` over every record.
    pub fn total(&self) -> Yen {
        self.0.iter().map(Record::yen).sum()
    }

    /// The total, provided the sum of the absolute amounts fits in an `i64`. When it does, the
    /// total of every subset (any filter, any group) is exact too.
    pub fn checked_total(&self) -> Option<Yen> {
        let mut magnitude: u64 = 0;
        for record in &self.0 {
            magnitude = magnitude.checked_add(record.yen.value().unsigned_abs())?;
        }
        if magnitude > i64::MAX.unsigned_abs() {
            return None;
        }
        Some(self.total())
    }
}

impl Deref for Records {
    type Target = [Record];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Record>> for Records {
    fn from(value: Vec<Record>) -> Self {
        Records(value)
    }
}

impl FromIterator<Record> for Records {
    fn from_iter<T: IntoIterator<Item = Record>>(iter: T) -> Self {
        Records(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_record_json_shape() {
        let record = Record::new(Day::from_str("2024/04/30").unwrap(), "Some Channel", 490);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"day": "2024/04/30", "channel": "Some Channel", "yen": 490})
        );
    }

    #[test]
    fn test_records_total() {
        let day = Day::from_str("2024/01/01").unwrap();
        let records = Records::new(vec![
            Record::new(day, "a", 120),
            Record::new(day, "b", -20),
        ]);
        assert_eq!(records.total().value(), 100);
        assert_eq!(records.checked_total(), Some(Yen::new(100)));
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_checked_total_bounds() {
        let day = Day::from_str("2024/01/01").unwrap();
        let at_limit = Records::new(vec![
            Record::new(day, "a", i64::MAX - 1),
            Record::new(day, "b", 1),
        ]);
        assert_eq!(at_limit.checked_total(), Some(Yen::new(i64::MAX)));

        // the net total fits, the magnitudes do not
        let cancelling = Records::new(vec![
            Record::new(day, "a", i64::MAX),
            Record::new(day, "b", -i64::MAX),
        ]);
        assert_eq!(cancelling.checked_total(), None);

        let single = Records::new(vec![Record::new(day, "a", i64::MIN)]);
        assert_eq!(single.checked_total(), None);
    }
}
