use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Placeholder shown when the upstream timestamp cannot be represented.
pub const UNKNOWN_TIME: &str = "--:--:--";

/// Render an epoch-millisecond quote timestamp as `HH:MM:SS` in `zone`.
pub fn format_quote_time(epoch_ms: i64, zone: &Tz) -> String {
    match Utc.timestamp_millis_opt(epoch_ms).single() {
        Some(instant) => instant.with_timezone(zone).format("%H:%M:%S").to_string(),
        None => UNKNOWN_TIME.to_string(),
    }
}

pub fn now_in(zone: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(zone)
}
