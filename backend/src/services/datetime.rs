use chrono::{DateTime, FixedOffset, Utc};

/// Render an instant the way the `ja-JP` locale prints local time,
/// e.g. `2024/9/5 9:03:07`, at the given offset.
pub fn format_display_datetime(instant: &DateTime<Utc>, offset: FixedOffset) -> String {
    instant
        .with_timezone(&offset)
        .format("%Y/%-m/%-d %-H:%M:%S")
        .to_string()
}
