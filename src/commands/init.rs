use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and an initial `config.json` file with default settings.
///
/// # Arguments
/// - `paylog_home` - The directory that will be the root of data directory, e.g. `$HOME/paylog`
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(paylog_home: &Path) -> Result<Out<()>> {
    let config = Config::create(paylog_home)
        .await
        .context("Unable to create the data directory and config")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the paylog directory and config at {}",
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let out = init(&home).await.unwrap();
        assert!(out.message().starts_with("Successfully created"));
        assert!(out.structure().is_none());
        Config::load(&home).await.unwrap();
    }
}
