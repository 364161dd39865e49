//! Display formatting for timestamps.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

const DISPLAY_FORMAT: &str = "%b %-d, %I:%M %p";

/// `Oct 19, 08:15 AM`, in the viewer's local time zone.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    format_timestamp_in(ts, &Local)
}

pub fn format_timestamp_in<Tz>(ts: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}
