//! Interpretation of raw property values.
//!
//! Every function here is total over `&str` and reports failure as `None`; the store decides what
//! "absent" means before any of these run.
use bytesize::ByteSize;
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc, Weekday};
use regex::Regex;

/// Human readable layout used by `zfs get` without `-p`, minus the leading day of the week.
static DATE_FORMAT: &str = "%b %e %H:%M %Y";

lazy_static! {
    /// Number followed by exactly one unit letter, e.g. `42K` or `31.5M`. The tool means binary
    /// multiples.
    static ref IEC_SIZE: Regex =
        Regex::new(r"^(([0-9]+)(\.[0-9]+)?)\s*([kKmMgGtTpPeE])$").expect("static regex");
    /// Number followed by a unit `bytesize` knows, e.g. `42KiB` or `42KB`.
    static ref UNIT_SIZE: Regex = Regex::new(r"^([0-9]+(\.[0-9]+)?)\s*([a-zA-Z]+)$").expect("static regex");
}

/// 2^64, the first size that doesn't fit.
const SIZE_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Parse a human readable size. Single letter suffixes `K` through `E` are binary multiples, so
/// `42K` is `43008`. Anything longer is handed to `bytesize`: `42KiB` is `43008` and `42KB` is
/// `42000`. Sizes past `u64::MAX` are failures.
pub fn parse_size(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.starts_with('+') {
        return None;
    }
    if let Some(caps) = IEC_SIZE.captures(value) {
        let multiplier = 1024u64.pow(binary_power(&caps[4])?);
        return match caps.get(3) {
            None => caps[2].parse::<u64>().ok()?.checked_mul(multiplier),
            Some(_) => fits(caps[1].parse::<f64>().ok()? * multiplier as f64),
        };
    }
    let size = value.parse::<ByteSize>().ok()?.as_u64();
    // ByteSize saturates instead of failing.
    if let Some(caps) = UNIT_SIZE.captures(value) {
        let mantissa = caps[1].parse::<f64>().ok()?;
        let unit = format!("1{}", &caps[3]).parse::<ByteSize>().ok()?.as_u64();
        fits(mantissa * unit as f64)?;
    }
    Some(size)
}

fn binary_power(letter: &str) -> Option<u32> {
    match letter.to_ascii_lowercase().as_str() {
        "k" => Some(1),
        "m" => Some(2),
        "g" => Some(3),
        "t" => Some(4),
        "p" => Some(5),
        "e" => Some(6),
        _ => None,
    }
}

fn fits(size: f64) -> Option<u64> {
    if size < SIZE_LIMIT {
        Some(size as u64)
    } else {
        None
    }
}

/// `"42%"` is `42`. Trailing `%` is optional.
pub fn parse_percent(value: &str) -> Option<u64> { parse_u64(value.strip_suffix('%').unwrap_or(value)) }

/// Some ratios have `x` character, and some don't.
pub fn parse_ratio(value: &str) -> Option<f64> { value.strip_suffix('x').unwrap_or(value).parse().ok() }

/// Only `on` and `enabled` in any case mean true. Everything else is false, never an error.
pub fn parse_bool(value: &str) -> bool {
    value.eq_ignore_ascii_case("on") || value.eq_ignore_ascii_case("enabled")
}

/// Either unix timestamp (`-p`) or `Mon May  2 10:36 2022`. Always UTC.
pub fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(timestamp) = value.parse::<i64>() {
        return Utc.timestamp_opt(timestamp, 0).single();
    }
    // Day of the week is only checked for syntax, same as the tool itself doesn't care.
    let (weekday, rest) = value.split_once(char::is_whitespace)?;
    if weekday.len() != 3 || weekday.parse::<Weekday>().is_err() {
        return None;
    }
    NaiveDateTime::parse_from_str(rest.trim_start(), DATE_FORMAT)
        .ok()
        .map(|date| Utc.from_utc_datetime(&date))
}

/// Base 10 `u64`. Signs and overflow are failures.
pub fn parse_u64(value: &str) -> Option<u64> {
    if value.starts_with('+') {
        return None;
    }
    value.parse().ok()
}
