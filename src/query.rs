//! The filter, group and sort pipeline that produces every table the viewer shows.
//!
//! `derive` is re-run on every redraw. It never mutates its inputs and always builds fresh
//! structures, so the derived tables are never a source of truth.

use crate::model::{Column, Day, FilterSpec, Order, Record, Records, SortSpec, Yen};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// The dimension a `GroupAggregate` was grouped by.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Day,
    /// The `YYYY/MM` prefix of the day.
    Month,
    Channel,
}

impl Dimension {
    fn key(&self, record: &Record) -> String {
        match self {
            Dimension::Day => record.day().to_string(),
            Dimension::Month => record.day().month_key(),
            Dimension::Channel => record.channel().to_string(),
        }
    }

    fn column(&self) -> Column {
        match self {
            Dimension::Day => Column::Day,
            Dimension::Month => Column::Month,
            Dimension::Channel => Column::Channel,
        }
    }
}

/// The total `yen` of all filtered records sharing `key`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct GroupAggregate {
    #[serde(skip_serializing)]
    dimension: Dimension,
    pub(crate) key: String,
    pub(crate) yen: Yen,
}

impl GroupAggregate {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn yen(&self) -> Yen {
        self.yen
    }
}

/// Everything `derive` computes from the canonical records and a filter.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct Derived {
    pub filtered: Vec<Record>,
    /// Sum over `filtered`.
    pub total_yen: Yen,
    /// Sum over every record, ignoring the filter.
    pub grand_total_yen: Yen,
    pub by_day: Vec<GroupAggregate>,
    pub by_month: Vec<GroupAggregate>,
    pub by_channel: Vec<GroupAggregate>,
    /// Every channel in the unfiltered records, in first-occurrence order.
    pub distinct_channels: Vec<String>,
}

/// Filters `records`, then totals and groups the result.
pub fn derive(records: &Records, filter: &FilterSpec) -> Derived {
    let filtered: Vec<Record> = records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect();

    let mut seen = HashSet::new();
    let distinct_channels = records
        .iter()
        .filter(|r| seen.insert(r.channel()))
        .map(|r| r.channel().to_string())
        .collect();

    Derived {
        total_yen: filtered.iter().map(Record::yen).sum(),
        grand_total_yen: records.total(),
        by_day: group_by(&filtered, Dimension::Day),
        by_month: group_by(&filtered, Dimension::Month),
        by_channel: group_by(&filtered, Dimension::Channel),
        distinct_channels,
        filtered,
    }
}

/// Sums `yen` per key. Keys appear in the order they are first seen.
pub fn group_by(records: &[Record], dimension: Dimension) -> Vec<GroupAggregate> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<GroupAggregate> = Vec::new();
    for record in records {
        let key = dimension.key(record);
        match index.get(&key) {
            Some(&ix) => groups[ix].yen = groups[ix].yen + record.yen(),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(GroupAggregate {
                    dimension,
                    key,
                    yen: record.yen(),
                });
            }
        }
    }
    groups
}

/// A cell value used to order rows. Cells of one column always share a variant.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Cell<'a> {
    Day(Day),
    Text(Cow<'a, str>),
    Yen(Yen),
}

/// A row that can be ordered by a `Column`.
pub trait Sortable {
    /// The value in `column`, or `None` if this row has no such column.
    fn cell(&self, column: Column) -> Option<Cell<'_>>;
}

impl Sortable for Record {
    fn cell(&self, column: Column) -> Option<Cell<'_>> {
        Some(match column {
            Column::Day => Cell::Day(self.day()),
            Column::Month => Cell::Text(Cow::Owned(self.day().month_key())),
            Column::Channel => Cell::Text(Cow::Borrowed(self.channel())),
            Column::Yen => Cell::Yen(self.yen()),
        })
    }
}

impl Sortable for GroupAggregate {
    fn cell(&self, column: Column) -> Option<Cell<'_>> {
        if column == Column::Yen {
            return Some(Cell::Yen(self.yen));
        }
        if self.dimension.column() == column {
            return Some(Cell::Text(Cow::Borrowed(&self.key)));
        }
        None
    }
}

/// Returns a copy of `rows` ordered by `spec`.
///
/// The sort is stable. `Desc` reverses the comparison rather than the output, so rows that tie
/// keep their input order in both directions.
pub fn sort<R>(rows: &[R], spec: &SortSpec) -> Vec<R>
where
    R: Sortable + Clone,
{
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| compare(a, b, spec));
    sorted
}

fn compare<R: Sortable>(a: &R, b: &R, spec: &SortSpec) -> Ordering {
    let ordering = a.cell(spec.column()).cmp(&b.cell(spec.column()));
    match spec.order() {
        Order::Asc => ordering,
        Order::Desc => ordering.reverse(),
    }
}
