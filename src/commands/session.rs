use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::scheduler::JsonLines;
use crate::session::{Action, Session};
use crate::{utils, Config, Result};
use anyhow::bail;
use std::path::Path;
use tokio::io::BufReader;

/// Runs an interactive session over stdin and stdout until stdin is closed.
///
/// If `file` is given, it is loaded and submitted before any action is read.
pub async fn session(config: Config, file: Option<&Path>) -> Result<Out<()>> {
    let session = Session::new(config.sorts(), config.help_source());
    session
        .subscribe(Box::new(JsonLines::new(std::io::stdout())))
        .await;

    if let Some(path) = file {
        let text = utils::read(path).await.pub_result(ErrorType::Io)?;
        session
            .apply(Action::InputJson { text })
            .await
            .pub_result(ErrorType::Session)?;
        session
            .apply(Action::Submit)
            .await
            .pub_result(ErrorType::Session)?;
        if let Some(notice) = session.store().lock().await.notice() {
            bail!("Unable to load the dataset at {}: {notice}", path.display());
        }
    }

    session
        .run(BufReader::new(tokio::io::stdin()))
        .await
        .pub_result(ErrorType::Session)?;
    Ok(format!("Session ended after {} redraws", session.scheduler().redraws()).into())
}
