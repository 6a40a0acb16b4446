//! The structure handed to renderers on every redraw.
//!
//! Renderers treat a `View` as read-only. Every interaction goes back through the scheduler.

use crate::model::{FilterSpec, Record, Records, Sorts, Table, Yen};
use crate::query::{derive, sort, GroupAggregate};
use serde::Serialize;

/// What is on screen.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum View {
    /// No dataset is loaded. Shows the pending JSON text and the last notice.
    Entrance {
        json: String,
        notice: Option<String>,
    },
    /// Usage instructions. `text` is `None` until the help has loaded.
    Help { text: Option<String> },
    Viewer(Box<Viewer>),
}

/// The four tables and the header figures for a loaded dataset.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Viewer {
    pub filter: FilterSpec,
    pub sorts: Sorts,
    pub totals: Totals,
    /// Options for the channel selector, independent of the current filter.
    pub channels: Vec<String>,
    pub records: Vec<Record>,
    pub by_day: Vec<GroupAggregate>,
    pub by_month: Vec<GroupAggregate>,
    pub by_channel: Vec<GroupAggregate>,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize)]
pub struct Totals {
    /// Sum over the filtered records.
    pub yen: Yen,
    /// Sum over every record.
    pub total_yen: Yen,
    pub count: usize,
    pub total_count: usize,
    pub days: usize,
    pub months: usize,
    pub channels: usize,
}

impl Viewer {
    /// Runs the pipeline and sorts each table by its own `SortSpec`.
    pub fn build(records: &Records, filter: &FilterSpec, sorts: &Sorts) -> Self {
        let derived = derive(records, filter);
        let totals = Totals {
            yen: derived.total_yen,
            total_yen: derived.grand_total_yen,
            count: derived.filtered.len(),
            total_count: records.len(),
            days: derived.by_day.len(),
            months: derived.by_month.len(),
            channels: derived.by_channel.len(),
        };
        Self {
            filter: filter.clone(),
            sorts: *sorts,
            totals,
            channels: derived.distinct_channels,
            records: sort(&derived.filtered, sorts.get(Table::Base)),
            by_day: sort(&derived.by_day, sorts.get(Table::Day)),
            by_month: sort(&derived.by_month, sorts.get(Table::Month)),
            by_channel: sort(&derived.by_channel, sorts.get(Table::Channel)),
        }
    }

    /// A one-line summary such as `¥1,200 / ¥3,450 (2 / 6 records)`.
    pub fn summary(&self) -> String {
        format!(
            "{} / {} ({} / {} records)",
            self.totals.yen, self.totals.total_yen, self.totals.count, self.totals.total_count
        )
    }
}
