//! The state of one interactive session.
//!
//! There is exactly one `Store` per session, shared by reference as a `Shared` handle. Handlers
//! are its only mutators and the scheduler is the only thing that reads it to redraw.

use crate::model::{FilterSpec, Records, Sorts};
use crate::view::{View, Viewer};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A handle to the session state. Locks are held only between suspension points, never across
/// an `.await` on I/O.
pub type Shared = Arc<Mutex<Store>>;

/// Progress of the help text fetch.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum HelpState {
    #[default]
    NotLoaded,
    Loading,
    Loaded(String),
}

impl HelpState {
    pub fn text(&self) -> Option<&str> {
        match self {
            HelpState::Loaded(text) => Some(text),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Store {
    /// JSON text typed, pasted or dropped but not yet submitted.
    pub(crate) json: String,
    /// The canonical records, when a dataset has been accepted.
    pub(crate) data: Option<Records>,
    pub(crate) filter: FilterSpec,
    pub(crate) sorts: Sorts,
    /// Whether the help screen is showing.
    pub(crate) help: bool,
    pub(crate) help_state: HelpState,
    /// The last message for the user, such as why a dataset was refused.
    pub(crate) notice: Option<String>,
}

impl Store {
    pub fn new(sorts: Sorts) -> Self {
        Self {
            sorts,
            ..Default::default()
        }
    }

    /// Wraps the store in a `Shared` handle.
    pub fn into_shared(self) -> Shared {
        Arc::new(Mutex::new(self))
    }

    pub fn json(&self) -> &str {
        &self.json
    }

    pub fn data(&self) -> Option<&Records> {
        self.data.as_ref()
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn sorts(&self) -> &Sorts {
        &self.sorts
    }

    pub fn help(&self) -> bool {
        self.help
    }

    pub fn help_state(&self) -> &HelpState {
        &self.help_state
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Rebuilds everything the renderer shows from the current state.
    pub fn view(&self) -> View {
        if self.help {
            return View::Help {
                text: self.help_state.text().map(str::to_string),
            };
        }
        match &self.data {
            Some(records) => View::Viewer(Box::new(Viewer::build(
                records,
                &self.filter,
                &self.sorts,
            ))),
            None => View::Entrance {
                json: self.json.clone(),
                notice: self.notice.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::sample_records;

    #[test]
    fn test_view_entrance() {
        let mut store = Store::default();
        store.json = "[]".into();
        store.notice = Some("invalid data shape".into());
        assert_eq!(
            store.view(),
            View::Entrance {
                json: "[]".into(),
                notice: Some("invalid data shape".into())
            }
        );
    }

    #[test]
    fn test_view_help_wins() {
        let mut store = Store::default();
        store.data = Some(sample_records());
        store.help = true;
        assert_eq!(store.view(), View::Help { text: None });
        store.help_state = HelpState::Loaded("hello".into());
        assert_eq!(
            store.view(),
            View::Help {
                text: Some("hello".into())
            }
        );
    }

    #[test]
    fn test_view_viewer() {
        let mut store = Store::default();
        store.data = Some(sample_records());
        match store.view() {
            View::Viewer(viewer) => assert_eq!(viewer.totals.total_count, 6),
            other => panic!("unexpected view {other:?}"),
        }
    }
}
