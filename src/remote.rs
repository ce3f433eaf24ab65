use crate::domain::PomodoroSettings;
use anyhow::{Context, Result};
use serde::Deserialize;

/// Remote pomodoro profile document: `{"settings": {"work": N, "rest": N}}`
#[derive(Debug, Deserialize)]
struct ProfileDocument {
    settings: ProfileSettings,
}

#[derive(Debug, Deserialize)]
struct ProfileSettings {
    work: u64,
    rest: u64,
}

/// Parse a pomodoro profile document into settings
pub fn parse_profile(json: &str) -> Result<PomodoroSettings> {
    let doc: ProfileDocument =
        serde_json::from_str(json).context("Malformed pomodoro profile document")?;
    Ok(PomodoroSettings {
        work_secs: doc.settings.work,
        rest_secs: doc.settings.rest,
    })
}

/// One-shot fetch of a pomodoro profile from a remote URL.
///
/// Fire-and-forget from the model's perspective: the caller decides whether
/// a failure is worth reporting, and the model's settings stay unchanged
/// until a fetch succeeds.
pub fn fetch_pomodoro_profile(url: &str) -> Result<PomodoroSettings> {
    let body = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to fetch pomodoro profile from {}", url))?
        .text()
        .context("Failed to read pomodoro profile response")?;
    parse_profile(&body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_profile() {
        let settings = parse_profile(r#"{"settings": {"work": 1500, "rest": 300}}"#).unwrap();
        assert_eq!(settings.work_secs, 1500);
        assert_eq!(settings.rest_secs, 300);
    }

    #[test]
    fn test_parse_profile_ignores_extra_fields() {
        let settings =
            parse_profile(r#"{"settings": {"work": 10, "rest": 5, "owner": "Peter"}, "v": 2}"#)
                .unwrap();
        assert_eq!(settings.work_secs, 10);
        assert_eq!(settings.rest_secs, 5);
    }

    #[test]
    fn test_parse_profile_rejects_malformed_document() {
        assert!(parse_profile("not json").is_err());
        assert!(parse_profile(r#"{"settings": {"work": 10}}"#).is_err());
    }
}
