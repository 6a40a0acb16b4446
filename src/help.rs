//! Sources for the usage instructions shown on the help screen.

use crate::Result;
use anyhow::Context;
use tracing::debug;

/// The instructions that ship with the binary.
pub(crate) const BUNDLED_HELP: &str = include_str!("docs/HELP.md");

/// Provides the help text. Fetching may suspend, for example on a network request.
#[async_trait::async_trait]
pub trait HelpSource: Send + Sync {
    async fn fetch(&self) -> Result<String>;
}

/// Returns the bundled instructions.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledHelp;

#[async_trait::async_trait]
impl HelpSource for BundledHelp {
    async fn fetch(&self) -> Result<String> {
        Ok(BUNDLED_HELP.to_string())
    }
}

/// Downloads the help text from a URL.
#[derive(Debug, Clone)]
pub struct RemoteHelp {
    url: String,
    client: reqwest::Client,
}

impl RemoteHelp {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl HelpSource for RemoteHelp {
    async fn fetch(&self) -> Result<String> {
        debug!("Fetching help text from {}", self.url);
        self.client
            .get(&self.url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .with_context(|| format!("Unable to request help text from {}", self.url))?
            .text()
            .await
            .with_context(|| format!("Unable to read help text from {}", self.url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bundled_help() {
        let text = BundledHelp.fetch().await.unwrap();
        assert!(text.contains("paylog extract"));
    }

    #[tokio::test]
    async fn test_remote_help_bad_url_fails() {
        let help = RemoteHelp::new("not a url");
        assert_eq!(help.url(), "not a url");
        assert!(help.fetch().await.is_err());
    }
}
