use chrono::{DateTime, FixedOffset, TimeZone};
use mongodb::bson::{self, Bson};
use std::time::{SystemTime, UNIX_EPOCH};

/// Get EPOCH timestamp in seconds
pub fn get_epoch_ts() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(n) => n.as_secs(),
        Err(_) => panic!("SystemTime before UNIX EPOCH!"),
    }
}

/// Parse a fixed UTC offset such as `+08:00`, `-0530`, `+8` or `Z`
pub fn parse_utc_offset(value: &str) -> anyhow::Result<FixedOffset> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("z") || value.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0).ok_or_else(|| anyhow::anyhow!("invalid utc offset"));
    }
    let (sign, rest) = if let Some(rest) = value.strip_prefix('+') {
        (1, rest)
    } else if let Some(rest) = value.strip_prefix('-') {
        (-1, rest)
    } else {
        anyhow::bail!("utc offset must start with + or -: {value}");
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours = hours.parse::<i32>()?;
    let minutes = minutes.parse::<i32>()?;
    if !(0..=14).contains(&hours) || !(0..60).contains(&minutes) {
        anyhow::bail!("utc offset out of range: {value}");
    }
    let secs = sign * (hours * 3600 + minutes * 60);
    FixedOffset::east_opt(secs).ok_or_else(|| anyhow::anyhow!("utc offset out of range: {value}"))
}

/// Human readable timestamp used in notification bodies, e.g. `May 4, 2025 | 9:07`
pub fn format_notification_time<Tz: TimeZone>(ts: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    ts.format("%B %-d, %Y | %-H:%M").to_string()
}

/// Convert a chrono timestamp into a BSON date
pub fn to_bson_datetime<Tz: TimeZone>(ts: &DateTime<Tz>) -> bson::DateTime {
    bson::DateTime::from_millis(ts.timestamp_millis())
}

/// String form of a document `_id`, whatever its BSON type
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.to_owned(),
        other => other.to_string(),
    }
}
