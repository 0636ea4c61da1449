use std::fmt;

use chrono::{DateTime, Datelike, TimeZone, Weekday};

use crate::error::{AppError, Result};

/// Local time of day as a zero-padded 24-hour `HHMM` string.
///
/// Ordering is plain string ordering, which only matches clock ordering because every
/// value is exactly four ASCII digits. `parse` is the only way in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hhmm(String);

impl Hhmm {
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AppError::message(format!(
                "`{value}` is not a zero-padded HHMM time"
            )));
        }

        let hours: u32 = value[..2].parse().unwrap_or(99);
        let minutes: u32 = value[2..].parse().unwrap_or(99);
        if hours > 23 || minutes > 59 {
            return Err(AppError::message(format!("`{value}` is out of range")));
        }

        Ok(Self(value.to_string()))
    }

    pub fn from_datetime<Tz: TimeZone>(now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self(now.format("%H%M").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Hhmm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trading session of one asset, in the configured local zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingWindow {
    pub start: Hhmm,
    pub end: Hhmm,
}

impl TradingWindow {
    pub fn new(start: Hhmm, end: Hhmm) -> Self {
        Self { start, end }
    }

    /// Both edges are exclusive.
    pub fn contains(&self, now: &Hhmm) -> bool {
        self.start < *now && *now < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketStatus {
    Weekend,
    Closed,
    /// Indices into the configured asset list, ascending.
    Open(Vec<usize>),
}

impl MarketStatus {
    pub fn evaluate<Tz: TimeZone>(now: &DateTime<Tz>, windows: &[TradingWindow]) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
            return MarketStatus::Weekend;
        }

        let clock = Hhmm::from_datetime(now);
        let active: Vec<usize> = windows
            .iter()
            .enumerate()
            .filter(|(_, window)| window.contains(&clock))
            .map(|(index, _)| index)
            .collect();

        if active.is_empty() {
            MarketStatus::Closed
        } else {
            MarketStatus::Open(active)
        }
    }

    pub fn active_indices(&self) -> &[usize] {
        match self {
            MarketStatus::Open(indices) => indices,
            MarketStatus::Weekend | MarketStatus::Closed => &[],
        }
    }

    /// Single status line shown instead of quotes; `None` while any market is open.
    pub fn headline(&self) -> Option<&'static str> {
        match self {
            MarketStatus::Weekend => Some("Weekend - Markets closed"),
            MarketStatus::Closed => Some("Markets closed"),
            MarketStatus::Open(_) => None,
        }
    }
}
