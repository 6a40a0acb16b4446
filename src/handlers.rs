//! The mutators behind every user interaction.
//!
//! Each handler receives the `Shared` session state, changes it, and reports whether anything
//! visible changed. Handlers run through the `Scheduler`, which redraws on `Outcome::Changed`.
//! A handler never holds the store lock across I/O, so another event can run while it waits.

use crate::help::HelpSource;
use crate::model::{Column, Day, FilterField, FilterSpec, Table};
use crate::scheduler::Outcome;
use crate::store::{HelpState, Shared};
use crate::validate::parse_dataset;
use crate::{utils, Result};
use anyhow::{bail, Context};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// The MIME type a dropped file must have to be read.
pub const JSON_MIME: &str = "application/json";

/// Shown in place of the help text when it could not be fetched.
pub const HELP_UNAVAILABLE: &str = "(failed to fetch)";

/// Replaces the pending JSON text.
pub async fn input_json(store: Shared, text: String) -> Result<Outcome> {
    store.lock().await.json = text;
    Ok(Outcome::Changed)
}

/// Dragging over the input only suppresses the default behavior.
pub async fn drag_over() -> Result<Outcome> {
    Ok(Outcome::Skip)
}

/// Reads a dropped file into the pending JSON text. Files of any other MIME type are ignored.
pub async fn drop_file(store: Shared, path: &Path, mime: &str) -> Result<Outcome> {
    if mime == JSON_MIME {
        let text = utils::read(path).await?;
        store.lock().await.json = text;
    } else {
        debug!("Ignoring dropped file of type '{mime}'");
    }
    Ok(Outcome::Changed)
}

/// Accepts the pending JSON text as the dataset. A refused dataset leaves the records and filter
/// untouched and stores the reason as a notice.
pub async fn submit(store: Shared) -> Result<Outcome> {
    let mut store = store.lock().await;
    match parse_dataset(&store.json) {
        Ok(records) => {
            debug!("Loaded {} records", records.len());
            store.data = Some(records);
            store.filter = FilterSpec::default();
            store.notice = None;
        }
        Err(e) => {
            warn!("Dataset refused: {e}");
            store.notice = Some(e.to_string());
        }
    }
    Ok(Outcome::Changed)
}

/// Returns to the entrance screen.
pub async fn close_dataset(store: Shared) -> Result<Outcome> {
    store.lock().await.data = None;
    Ok(Outcome::Changed)
}

/// Sets one filter field from user text. An empty value removes the constraint, as does a date
/// that cannot be read.
pub async fn set_filter(store: Shared, field: FilterField, value: &str) -> Result<Outcome> {
    let mut store = store.lock().await;
    match field {
        FilterField::From => store.filter.from = parse_filter_day(field, value),
        FilterField::To => store.filter.to = parse_filter_day(field, value),
        FilterField::Channel => {
            store.filter.channel = (!value.is_empty()).then(|| value.to_string())
        }
    }
    Ok(Outcome::Changed)
}

fn parse_filter_day(field: FilterField, value: &str) -> Option<Day> {
    if value.trim().is_empty() {
        return None;
    }
    match Day::parse_input(value) {
        Ok(day) => Some(day),
        Err(e) => {
            warn!("Ignoring the '{field}' filter: {e}");
            None
        }
    }
}

pub async fn reset_filter(store: Shared) -> Result<Outcome> {
    store.lock().await.filter = FilterSpec::default();
    Ok(Outcome::Changed)
}

/// Sorts `table` by `column`, or flips the order if it is already sorted by it.
pub async fn click_header(store: Shared, table: Table, column: Column) -> Result<Outcome> {
    store.lock().await.sorts.get_mut(table).toggle(column);
    Ok(Outcome::Changed)
}

/// Filters on a clicked cell.
///
/// - `day`: from and to are both that day.
/// - `month` (`YYYY/MM`): from the first to the last day of the month.
/// - `channel`: that channel.
///
/// Unless `additive` is set, the rest of the filter is cleared first.
pub async fn click_select(
    store: Shared,
    column: Column,
    value: &str,
    additive: bool,
) -> Result<Outcome> {
    let (from, to, channel) = match column {
        Column::Day => {
            let day = Day::parse_input(value).context("Unable to select a day")?;
            (Some(day), Some(day), None)
        }
        Column::Month => {
            let first = Day::parse_input(&format!("{value}/01"))
                .context("Unable to select a month")?;
            (Some(first), Some(first.last_of_month()), None)
        }
        Column::Channel => (None, None, Some(value.to_string())),
        Column::Yen => bail!("The '{column}' column cannot be selected"),
    };

    let mut store = store.lock().await;
    if !additive {
        store.filter = FilterSpec::default();
    }
    if from.is_some() {
        store.filter.from = from;
        store.filter.to = to;
    }
    if channel.is_some() {
        store.filter.channel = channel;
    }
    Ok(Outcome::Changed)
}

pub async fn show_help(store: Shared) -> Result<Outcome> {
    store.lock().await.help = true;
    Ok(Outcome::Changed)
}

pub async fn hide_help(store: Shared) -> Result<Outcome> {
    store.lock().await.help = false;
    Ok(Outcome::Changed)
}

/// Fetches the help text once. While a fetch is in flight or after it finished, this does
/// nothing. A failed fetch is logged and replaced with `HELP_UNAVAILABLE`.
pub async fn load_help(store: Shared, source: Arc<dyn HelpSource>) -> Result<Outcome> {
    {
        let mut store = store.lock().await;
        if store.help_state != HelpState::NotLoaded {
            return Ok(Outcome::Skip);
        }
        store.help_state = HelpState::Loading;
    }

    let text = match source.fetch().await {
        Ok(text) => text,
        Err(e) => {
            error!("Unable to load the help text: {e:#}");
            HELP_UNAVAILABLE.to_string()
        }
    };
    store.lock().await.help_state = HelpState::Loaded(text);
    Ok(Outcome::Changed)
}
