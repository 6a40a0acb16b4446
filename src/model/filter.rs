use crate::model::{Day, Record};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The active filter. `None` in any dimension means no constraint on it.
///
/// On the wire each field is a string, and the empty string stands for "no constraint".
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FilterSpec {
    #[serde(default, with = "empty_as_none")]
    pub(crate) from: Option<Day>,
    #[serde(default, with = "empty_as_none")]
    pub(crate) to: Option<Day>,
    #[serde(default, with = "empty_as_none")]
    pub(crate) channel: Option<String>,
}

impl FilterSpec {
    pub fn new(from: Option<Day>, to: Option<Day>, channel: Option<String>) -> Self {
        Self { from, to, channel }
    }

    pub fn from(&self) -> Option<Day> {
        self.from
    }

    pub fn to(&self) -> Option<Day> {
        self.to
    }

    pub fn channel(&self) -> Option<&str> {
        self.channel.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none() && self.channel.is_none()
    }

    /// Returns true if `record` satisfies every constraint. An inverted range matches nothing.
    pub fn matches(&self, record: &Record) -> bool {
        let day = record.day();
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        if let Some(channel) = &self.channel {
            if record.channel() != channel {
                return false;
            }
        }
        true
    }
}

/// The fields of a `FilterSpec` that a user can edit directly.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    From,
    To,
    Channel,
}

serde_plain::derive_display_from_serialize!(FilterField);
serde_plain::derive_fromstr_from_deserialize!(FilterField);

mod empty_as_none {
    use super::*;
    use std::fmt::Display;
    use std::str::FromStr;

    pub(super) fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub(super) fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        T::from_str(&s).map(Some).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn day(s: &str) -> Day {
        Day::from_str(s).unwrap()
    }

    fn record(d: &str, channel: &str) -> Record {
        Record::new(day(d), channel, 100)
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = FilterSpec::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&record("2024/01/01", "a")));
    }

    #[test]
    fn test_range_is_inclusive() {
        let filter = FilterSpec::new(Some(day("2024/01/02")), Some(day("2024/01/03")), None);
        assert!(!filter.matches(&record("2024/01/01", "a")));
        assert!(filter.matches(&record("2024/01/02", "a")));
        assert!(filter.matches(&record("2024/01/03", "a")));
        assert!(!filter.matches(&record("2024/01/04", "a")));
    }

    #[test]
    fn test_inverted_range_matches_nothing() {
        let filter = FilterSpec::new(Some(day("2024/02/01")), Some(day("2024/01/01")), None);
        assert!(!filter.matches(&record("2024/01/15", "a")));
        assert!(!filter.matches(&record("2024/02/01", "a")));
    }

    #[test]
    fn test_channel_is_exact() {
        let filter = FilterSpec::new(None, None, Some("Alpha".into()));
        assert!(filter.matches(&record("2024/01/01", "Alpha")));
        assert!(!filter.matches(&record("2024/01/01", "alpha")));
        assert!(!filter.matches(&record("2024/01/01", "Alpha Beta")));
    }

    #[test]
    fn test_wire_format_uses_empty_strings() {
        let filter = FilterSpec::new(Some(day("2024/01/02")), None, None);
        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"from": "2024/01/02", "to": "", "channel": ""})
        );
        let back: FilterSpec = serde_json::from_value(json).unwrap();
        assert_eq!(back, filter);
    }
}
