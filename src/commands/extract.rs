use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::extract::{DateNormalizer, RawTriple};
use crate::model::Records;
use crate::{utils, Result};
use anyhow::Context;
use std::path::Path;

/// Reads raw triples from `file` (or stdin) and converts them into a dataset.
///
/// # Errors
/// - The input cannot be read or is not a JSON array of triples.
/// - Any row fails to extract. No partial dataset is returned.
pub async fn extract(file: Option<&Path>, year: Option<i32>) -> Result<Out<Records>> {
    let text = utils::read_input(file).await.pub_result(ErrorType::Io)?;
    let raw: Vec<RawTriple> = serde_json::from_str(&text)
        .context("The input is not a JSON array of day, channel and yen triples")
        .pub_result(ErrorType::Extract)?;
    let normalizer = year.map_or_else(DateNormalizer::this_year, DateNormalizer::new);
    let records = crate::extract::extract(&raw, &normalizer).pub_result(ErrorType::Extract)?;
    let message = format!(
        "Extracted {} records totaling {}",
        records.len(),
        records.total()
    );
    Ok(Out::new(message, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_extract_file() {
        let env = TestEnv::new().await;
        let path = env.write_file(
            "raw.json",
            r#"[
                {"day": "3月2日", "channel": " Alpha ", "yen": "¥1,200"},
                {"day": "", "channel": "Beta", "yen": "￥300"},
                {"day": "2023/12/31", "channel": "Gamma", "yen": "50"}
            ]"#,
        );
        let out = extract(Some(&path), Some(2024)).await.unwrap();
        let records = out.structure().unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].day().to_string(), "2024/03/02");
        assert_eq!(records[0].channel(), "Alpha");
        assert_eq!(records[1].day().to_string(), "2024/03/02");
        assert_eq!(records.total().value(), 1550);
        assert!(out.message().starts_with("Extracted 3 records"));
    }

    #[tokio::test]
    async fn test_extract_reports_bad_row() {
        let env = TestEnv::new().await;
        let path = env.write_file(
            "raw.json",
            r#"[{"day": "", "channel": "Alpha", "yen": "100"}]"#,
        );
        let err = extract(Some(&path), Some(2024)).await.unwrap_err();
        assert!(format!("{err:#}").contains("extract error"));
    }

    #[tokio::test]
    async fn test_extract_not_triples() {
        let env = TestEnv::new().await;
        let path = env.write_file("raw.json", r#"{"day": "3月2日"}"#);
        assert!(extract(Some(&path), Some(2024)).await.is_err());
    }
}
