use chrono::{DateTime, Utc};

pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Filename-safe timestamp with millisecond resolution, e.g. `20261019_153012_042`.
pub fn file_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%d_%H%M%S_%3f").to_string()
}
