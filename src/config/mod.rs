use std::collections::HashMap;
use std::time::Duration;

use chrono_tz::Tz;

use crate::error::{AppError, Result};
use crate::market::{Hhmm, TradingWindow};

pub mod loader;
pub mod validator;

pub use loader::{load_config, load_settings};

pub const KEY_TIME_START: &str = "TIME_START";
pub const KEY_TIME_END: &str = "TIME_END";
pub const KEY_ASSETS: &str = "ASSETS";
pub const KEY_CITY: &str = "CITY";
pub const KEY_API_URL: &str = "API_URL";
pub const KEY_WEB_URL: &str = "WEB_URL";
pub const KEY_HTTP_TIMEOUT_MS: &str = "HTTP_TIMEOUT_MS";
pub const KEY_MAX_CONNECTIONS: &str = "MAX_CONNECTIONS";

pub const REQUIRED_KEYS: [&str; 6] = [
    KEY_TIME_START,
    KEY_TIME_END,
    KEY_ASSETS,
    KEY_CITY,
    KEY_API_URL,
    KEY_WEB_URL,
];

/// Separator used by every list-valued setting.
pub const LIST_SEPARATOR: char = ':';

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_millis(4800);
pub const DEFAULT_MAX_CONNECTIONS: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub max_connections: usize,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_HTTP_TIMEOUT,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

/// Immutable run configuration. `assets[i]` trades inside `windows[i]`.
#[derive(Debug, Clone)]
pub struct Config {
    pub assets: Vec<String>,
    pub windows: Vec<TradingWindow>,
    pub timezone: Tz,
    pub api_url: String,
    pub web_url: String,
    pub http: HttpSettings,
}

impl Config {
    /// Build the configuration from raw key/value settings, rejecting anything invalid.
    pub fn from_map(settings: &HashMap<String, String>) -> Result<Self> {
        validator::validate_settings(settings)?;

        let assets = split_list(required(settings, KEY_ASSETS)?);
        let starts = split_list(required(settings, KEY_TIME_START)?);
        let ends = split_list(required(settings, KEY_TIME_END)?);

        let windows = starts
            .iter()
            .zip(ends.iter())
            .map(|(start, end)| -> Result<TradingWindow> {
                Ok(TradingWindow::new(Hhmm::parse(start)?, Hhmm::parse(end)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let timezone = parse_timezone(required(settings, KEY_CITY)?)?;

        let mut http = HttpSettings::default();
        if let Some(ms) = optional_number(settings, KEY_HTTP_TIMEOUT_MS)? {
            http.timeout = Duration::from_millis(ms as u64);
        }
        if let Some(limit) = optional_number(settings, KEY_MAX_CONNECTIONS)? {
            http.max_connections = limit;
        }

        Ok(Self {
            assets,
            windows,
            timezone,
            api_url: required(settings, KEY_API_URL)?.trim().to_string(),
            web_url: required(settings, KEY_WEB_URL)?.trim().to_string(),
            http,
        })
    }

    pub fn asset(&self, index: usize) -> Option<&str> {
        self.assets.get(index).map(String::as_str)
    }
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_timezone(value: &str) -> Result<Tz> {
    let name = value.trim();
    name.parse::<Tz>()
        .map_err(|err| AppError::message(format!("unknown timezone `{name}`: {err}")))
}

fn required<'a>(settings: &'a HashMap<String, String>, key: &str) -> Result<&'a str> {
    settings
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| AppError::message(format!("missing required setting {key}")))
}

fn optional_number(settings: &HashMap<String, String>, key: &str) -> Result<Option<usize>> {
    match settings.get(key).map(|value| value.trim()) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<usize>()
            .map(Some)
            .map_err(|_| AppError::message(format!("{key} must be a whole number, got `{raw}`"))),
    }
}

#[cfg(test)]
pub(crate) fn sample_settings() -> HashMap<String, String> {
    HashMap::from([
        (KEY_TIME_START.to_string(), "0800:0900".to_string()),
        (KEY_TIME_END.to_string(), "1700:1600".to_string()),
        (KEY_ASSETS.to_string(), "EURUSD:GBPUSD".to_string()),
        (KEY_CITY.to_string(), "Europe/Warsaw".to_string()),
        (KEY_API_URL.to_string(), "https://x/".to_string()),
        (KEY_WEB_URL.to_string(), "https://y".to_string()),
    ])
}
