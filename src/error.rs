use serde::{Deserialize, Serialize};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Labels the area of the program that an error surfaced from, so that the message presented to
/// the user says which part of the workflow failed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Problems with `$PAYLOG_HOME` or `config.json`.
    Config,
    /// The scraped data could not be normalized into records.
    Extract,
    /// A JSON dataset could not be accepted.
    Dataset,
    /// Reading or writing files or streams.
    Io,
    /// A handler failed while running an interactive session.
    Session,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// Converts any result into a crate `Result` whose error carries an `ErrorType` label.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(format!("{error_type} error")))
    }
}
