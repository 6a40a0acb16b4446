use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Day, FilterSpec, Sorts};
use crate::validate::parse_dataset;
use crate::view::Viewer;
use crate::{utils, Result};
use std::path::Path;
use tracing::warn;

/// Loads a dataset from `file` (or stdin) and builds the viewer tables for it.
///
/// `from` and `to` accept `YYYY/MM/DD` or `YYYY-MM-DD`. A day that cannot be read leaves that
/// end of the range open. An empty `channel` means every channel.
pub async fn view(
    file: Option<&Path>,
    from: Option<&str>,
    to: Option<&str>,
    channel: Option<&str>,
    sorts: &Sorts,
) -> Result<Out<Viewer>> {
    let text = utils::read_input(file).await.pub_result(ErrorType::Io)?;
    let records = parse_dataset(&text).pub_result(ErrorType::Dataset)?;
    let filter = FilterSpec::new(
        from.and_then(|s| parse_bound("from", s)),
        to.and_then(|s| parse_bound("to", s)),
        channel.filter(|c| !c.is_empty()).map(str::to_string),
    );
    let viewer = Viewer::build(&records, &filter, sorts);
    Ok(Out::new(viewer.summary(), viewer))
}

fn parse_bound(name: &str, value: &str) -> Option<Day> {
    if value.is_empty() {
        return None;
    }
    match Day::parse_input(value) {
        Ok(day) => Some(day),
        Err(e) => {
            warn!("Ignoring --{name} '{value}': {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{day, sample_json, TestEnv};

    #[tokio::test]
    async fn test_view_with_filter() {
        let env = TestEnv::new().await;
        let path = env.write_file("history.json", &sample_json());
        let out = view(
            Some(&path),
            Some("2024-02-29"),
            Some("2024/03/01"),
            None,
            &Sorts::default(),
        )
        .await
        .unwrap();
        let viewer = out.structure().unwrap();
        assert_eq!(viewer.filter.from(), Some(day("2024/02/29")));
        assert_eq!(viewer.totals.count, 3);
        assert_eq!(viewer.totals.yen.value(), 1200 + 800 + 100);
        assert_eq!(out.message(), viewer.summary());
    }

    #[tokio::test]
    async fn test_view_unreadable_bound_is_ignored() {
        let env = TestEnv::new().await;
        let path = env.write_file("history.json", &sample_json());
        let out = view(Some(&path), Some("yesterday"), None, Some("Alpha"), &Sorts::default())
            .await
            .unwrap();
        let viewer = out.structure().unwrap();
        assert_eq!(viewer.filter.from(), None);
        assert_eq!(viewer.totals.count, 3);
    }

    #[tokio::test]
    async fn test_view_rejects_bad_dataset() {
        let env = TestEnv::new().await;
        let path = env.write_file("history.json", r#"[{"day": "2024/03/01"}]"#);
        let err = view(Some(&path), None, None, None, &Sorts::default())
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("invalid data shape"));
    }
}
