//! Timestamp parsing for the `yyyy-MM-ddTHH:mm:ss` + zone format used in task payloads.

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};

const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const OFFSET_LEN: usize = 6;

/// Parses a task timestamp ending in `Z` or a six character offset such as `+02:00`.
///
/// Malformed input is logged and yields `None`.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    match try_parse(input) {
        Some(parsed) => Some(parsed),
        None => {
            tracing::warn!(value = input, "unparseable task timestamp");
            None
        }
    }
}

fn try_parse(input: &str) -> Option<DateTime<Utc>> {
    if let Some(local) = input.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(local, LOCAL_FORMAT).ok()?;
        return Some(Utc.from_utc_datetime(&naive));
    }

    let split = input.len().checked_sub(OFFSET_LEN)?;
    if !input.is_char_boundary(split) {
        return None;
    }
    let (local, designator) = input.split_at(split);
    let offset = parse_offset(designator)?;
    let naive = NaiveDateTime::parse_from_str(local, LOCAL_FORMAT).ok()?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Reads `+HH:MM` / `-HH:MM`.
fn parse_offset(designator: &str) -> Option<FixedOffset> {
    let bytes = designator.as_bytes();
    if bytes.len() != OFFSET_LEN || bytes[3] != b':' {
        return None;
    }
    let sign = match bytes[0] {
        b'+' => 1,
        b'-' => -1,
        _ => return None,
    };
    let digit = |index: usize| -> Option<i32> {
        let byte = bytes[index];
        byte.is_ascii_digit().then(|| i32::from(byte - b'0'))
    };
    let hours = digit(1)? * 10 + digit(2)?;
    let minutes = digit(4)? * 10 + digit(5)?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
