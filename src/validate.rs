//! Admission checks for a JSON dataset before it replaces the canonical records.

use crate::model::{has_canonical_shape, Records};
use serde_json::Value;
use std::fmt;
use std::fmt::{Debug, Display, Formatter};
use tracing::debug;

/// Returns true if `candidate` is an array of objects that each have a numeric `yen`, a string
/// `channel` and a string `day` shaped like `YYYY/MM/DD`.
///
/// Only the shape of `day` is checked here, not whether it is a real calendar date.
pub fn is_valid_dataset(candidate: &Value) -> bool {
    let Some(items) = candidate.as_array() else {
        return false;
    };
    items.iter().all(|item| {
        item.get("yen").is_some_and(Value::is_number)
            && item.get("channel").is_some_and(Value::is_string)
            && item
                .get("day")
                .and_then(Value::as_str)
                .is_some_and(has_canonical_shape)
    })
}

/// The reasons a dataset can be refused. Either way the current state is kept.
pub enum DatasetError {
    /// The text is not JSON.
    Parse(serde_json::Error),
    /// The JSON does not describe a list of records.
    Shape(Option<serde_json::Error>),
}

impl Debug for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for DatasetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Parse(e) => write!(f, "cannot parse JSON: {e}"),
            DatasetError::Shape(None) => write!(f, "invalid data shape"),
            DatasetError::Shape(Some(e)) => write!(f, "invalid data shape: {e}"),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Parse(e) | DatasetError::Shape(Some(e)) => Some(e),
            DatasetError::Shape(None) => None,
        }
    }
}

/// Parses and validates a pasted or dropped dataset. Blank text is read as an empty dataset.
pub fn parse_dataset(text: &str) -> Result<Records, DatasetError> {
    let text = if text.trim().is_empty() { "[]" } else { text };
    let value: Value = serde_json::from_str(text).map_err(DatasetError::Parse)?;
    if !is_valid_dataset(&value) {
        return Err(DatasetError::Shape(None));
    }
    // Shape-valid values can still hold an impossible date or a fractional amount
    let records: Records =
        serde_json::from_value(value).map_err(|e| DatasetError::Shape(Some(e)))?;
    if records.checked_total().is_none() {
        debug!("Refusing a dataset whose amounts cannot be totaled exactly");
        return Err(DatasetError::Shape(None));
    }
    debug!("Accepted a dataset of {} records", records.len());
    Ok(records)
}
