//! A line-oriented interactive session.
//!
//! Each line of input is one JSON-encoded `Action`. Every redraw is handed to the subscribed
//! renderers, which for the CLI means one line of JSON on stdout.

use crate::handlers;
use crate::help::HelpSource;
use crate::model::{Column, FilterField, Sorts, Table};
use crate::scheduler::{Outcome, Renderer, Scheduler};
use crate::store::{Shared, Store};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// A user interaction, as received on the session input.
///
/// ```json
/// {"action": "click_header", "table": "channel", "column": "yen"}
/// ```
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    InputJson { text: String },
    DragOver,
    DropFile { path: PathBuf, mime: String },
    Submit,
    CloseDataset,
    SetFilter { field: FilterField, value: String },
    ResetFilter,
    ClickHeader { table: Table, column: Column },
    ClickSelect {
        column: Column,
        value: String,
        #[serde(default)]
        additive: bool,
    },
    ShowHelp,
    HideHelp,
}

/// Connects actions to their handlers through a `Scheduler`.
pub struct Session {
    scheduler: Scheduler,
    help: Arc<dyn HelpSource>,
    /// Handlers that keep running after `apply` returns.
    background: Mutex<JoinSet<Result<Outcome>>>,
}

impl Session {
    pub fn new(sorts: Sorts, help: Arc<dyn HelpSource>) -> Self {
        Self {
            scheduler: Scheduler::new(Store::new(sorts).into_shared()),
            help,
            background: Mutex::new(JoinSet::new()),
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn store(&self) -> Shared {
        self.scheduler.store()
    }

    pub async fn subscribe(&self, renderer: Box<dyn Renderer>) {
        self.scheduler.subscribe(renderer).await
    }

    /// Runs the handler for `action`. Opening the help screen also starts loading its text in the
    /// background, so later actions are not held up by the fetch.
    pub async fn apply(&self, action: Action) -> Result<Outcome> {
        debug!("Applying {action:?}");
        let store = self.store();
        let scheduler = &self.scheduler;
        match action {
            Action::InputJson { text } => scheduler.run(handlers::input_json(store, text)).await,
            Action::DragOver => scheduler.run(handlers::drag_over()).await,
            Action::DropFile { path, mime } => {
                scheduler
                    .run(handlers::drop_file(store, &path, &mime))
                    .await
            }
            Action::Submit => scheduler.run(handlers::submit(store)).await,
            Action::CloseDataset => scheduler.run(handlers::close_dataset(store)).await,
            Action::SetFilter { field, value } => {
                scheduler
                    .run(handlers::set_filter(store, field, &value))
                    .await
            }
            Action::ResetFilter => scheduler.run(handlers::reset_filter(store)).await,
            Action::ClickHeader { table, column } => {
                scheduler
                    .run(handlers::click_header(store, table, column))
                    .await
            }
            Action::ClickSelect {
                column,
                value,
                additive,
            } => {
                scheduler
                    .run(handlers::click_select(store, column, &value, additive))
                    .await
            }
            Action::ShowHelp => {
                let outcome = scheduler.run(handlers::show_help(store.clone())).await?;
                self.spawn_load_help(store);
                Ok(outcome)
            }
            Action::HideHelp => scheduler.run(handlers::hide_help(store)).await,
        }
    }

    fn spawn_load_help(&self, store: Shared) {
        let scheduler = self.scheduler.clone();
        let help = self.help.clone();
        let task = async move { scheduler.run(handlers::load_help(store, help)).await };
        match self.background.lock() {
            Ok(mut background) => {
                background.spawn(task);
            }
            Err(e) => error!("Unable to start loading the help text: {e}"),
        }
    }

    /// Waits for every background handler to finish. Failures are logged, not returned.
    pub async fn settle(&self) {
        let mut pending = match self.background.lock() {
            Ok(mut background) => std::mem::take(&mut *background),
            Err(e) => {
                error!("Unable to collect background handlers: {e}");
                return;
            }
        };
        while let Some(joined) = pending.join_next().await {
            match joined {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => error!("A background handler failed: {e:#}"),
                Err(e) => error!("A background handler did not complete: {e}"),
            }
        }
    }

    /// Reads actions line by line until the input ends, then waits for background handlers.
    ///
    /// Lines that are not a valid `Action` are skipped. A failing handler is logged and causes no
    /// redraw, and the session carries on with the next line. Only a failure to read the input
    /// ends the session with an error.
    pub async fn run<R>(&self, reader: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.scheduler.redraw().await?;
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Action>(&line) {
                Ok(action) => {
                    if let Err(e) = self.apply(action).await {
                        error!("Action failed: {e:#}");
                    }
                }
                Err(e) => warn!("Skipping unreadable action '{line}': {e}"),
            }
        }
        self.settle().await;
        debug!("Session input ended after {} redraws", self.scheduler.redraws());
        Ok(())
    }
}
