use std::collections::HashMap;

use crate::error::{AppError, Result};
use crate::market::Hhmm;

use super::{
    parse_timezone, split_list, KEY_API_URL, KEY_ASSETS, KEY_CITY, KEY_HTTP_TIMEOUT_MS,
    KEY_MAX_CONNECTIONS, KEY_TIME_END, KEY_TIME_START, KEY_WEB_URL, REQUIRED_KEYS,
};

/// Validate raw settings and surface every problem at once.
pub fn validate_settings(settings: &HashMap<String, String>) -> Result<()> {
    let mut issues = Vec::new();

    validate_required(settings, &mut issues);
    validate_assets_and_windows(settings, &mut issues);
    validate_timezone(settings, &mut issues);
    validate_urls(settings, &mut issues);
    validate_tunables(settings, &mut issues);

    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::message(format!(
            "configuration invalid:\n  - {}",
            issues.join("\n  - ")
        )))
    }
}

fn validate_required(settings: &HashMap<String, String>, issues: &mut Vec<String>) {
    for key in REQUIRED_KEYS {
        if !settings.contains_key(key) {
            issues.push(format!("{key} is not set"));
        }
    }
}

fn validate_assets_and_windows(settings: &HashMap<String, String>, issues: &mut Vec<String>) {
    let (Some(assets), Some(starts), Some(ends)) = (
        settings.get(KEY_ASSETS),
        settings.get(KEY_TIME_START),
        settings.get(KEY_TIME_END),
    ) else {
        return;
    };

    let assets = split_list(assets);
    let starts = split_list(starts);
    let ends = split_list(ends);

    if assets.is_empty() {
        issues.push(format!("{KEY_ASSETS} lists no symbols"));
    }

    if starts.len() != assets.len() || ends.len() != assets.len() {
        issues.push(format!(
            "{KEY_ASSETS} has {} entries but {KEY_TIME_START} has {} and {KEY_TIME_END} has {}",
            assets.len(),
            starts.len(),
            ends.len()
        ));
    }

    for (position, (start, end)) in starts.iter().zip(ends.iter()).enumerate() {
        let label = assets
            .get(position)
            .map(String::as_str)
            .unwrap_or("<unassigned>");

        match (Hhmm::parse(start), Hhmm::parse(end)) {
            (Ok(start), Ok(end)) => {
                if start >= end {
                    issues.push(format!(
                        "window for `{label}` starts at {start} but ends at {end}"
                    ));
                }
            }
            (start_result, end_result) => {
                for err in [start_result.err(), end_result.err()].into_iter().flatten() {
                    issues.push(format!("window for `{label}`: {err}"));
                }
            }
        }
    }
}

fn validate_timezone(settings: &HashMap<String, String>, issues: &mut Vec<String>) {
    if let Some(city) = settings.get(KEY_CITY) {
        if let Err(err) = parse_timezone(city) {
            issues.push(err.to_string());
        }
    }
}

fn validate_urls(settings: &HashMap<String, String>, issues: &mut Vec<String>) {
    for key in [KEY_API_URL, KEY_WEB_URL] {
        if let Some(value) = settings.get(key) {
            if value.trim().is_empty() {
                issues.push(format!("{key} must not be empty"));
            }
        }
    }
}

fn validate_tunables(settings: &HashMap<String, String>, issues: &mut Vec<String>) {
    for key in [KEY_HTTP_TIMEOUT_MS, KEY_MAX_CONNECTIONS] {
        let Some(raw) = settings.get(key).map(|value| value.trim()) else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        match raw.parse::<usize>() {
            Ok(0) => issues.push(format!("{key} must be greater than zero")),
            Ok(_) => {}
            Err(_) => issues.push(format!("{key} must be a whole number, got `{raw}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::sample_settings;

    #[test]
    fn accepts_sample_settings() {
        validate_settings(&sample_settings()).expect("sample settings should be valid");
    }

    #[test]
    fn reports_every_missing_key() {
        let err = validate_settings(&HashMap::new()).expect_err("validation should fail");
        let message = err.to_string();
        for key in REQUIRED_KEYS {
            assert!(message.contains(key), "missing {key} in: {message}");
        }
    }

    #[test]
    fn rejects_misaligned_windows() {
        let mut settings = sample_settings();
        settings.insert(KEY_TIME_END.to_string(), "1700".to_string());

        let err = validate_settings(&settings).expect_err("validation should fail");
        assert!(
            err.to_string().contains("has 2 entries"),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn rejects_unpadded_window() {
        let mut settings = sample_settings();
        settings.insert(KEY_TIME_START.to_string(), "800:0900".to_string());

        let err = validate_settings(&settings).expect_err("validation should fail");
        let message = err.to_string();
        assert!(
            message.contains("zero-padded") && message.contains("EURUSD"),
            "unexpected error message: {message}"
        );
    }

    #[test]
    fn rejects_inverted_window() {
        let mut settings = sample_settings();
        settings.insert(KEY_TIME_START.to_string(), "1800:0900".to_string());

        let err = validate_settings(&settings).expect_err("validation should fail");
        assert!(
            err.to_string().contains("starts at 1800"),
            "unexpected error message: {err}"
        );
    }

    #[test]
    fn rejects_unknown_timezone_and_zero_tunables() {
        let mut settings = sample_settings();
        settings.insert(KEY_CITY.to_string(), "Mars/Olympus".to_string());
        settings.insert(KEY_MAX_CONNECTIONS.to_string(), "0".to_string());

        let err = validate_settings(&settings).expect_err("validation should fail");
        let message = err.to_string();
        assert!(message.contains("Mars/Olympus"), "unexpected: {message}");
        assert!(message.contains("greater than zero"), "unexpected: {message}");
    }
}
