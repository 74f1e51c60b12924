//! Timestamp codec
//!
//! Parses and renders the compact `[time]text` line format used by `.lrc`
//! and `.chp` sidecars and by flat lyric fields, plus the `[d.]hh:mm:ss.fffffff`
//! duration pattern used inside rich payloads.
//!
//! Parsing is best-effort: anything that does not match is rejected with
//! `None` and callers skip it.

use crate::synthesis::Onset;
use std::time::Duration;

const MILLIS_PER_SECOND: u64 = 1_000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
const NANOS_PER_TICK: u32 = 100;
const TICK_DIGITS: usize = 7;

/// One accepted time-token layout
#[derive(Debug, Clone, Copy)]
struct TimePattern {
    hours: bool,
    minute_digits: (usize, usize),
    fraction: bool,
}

/// Tried in order, most specific first: `h:mm:ss.fff`, `mm:ss.fff`,
/// `m:ss.fff`, `h:mm:ss`, `mm:ss`, `m:ss`
const PATTERNS: [TimePattern; 6] = [
    TimePattern { hours: true, minute_digits: (2, 2), fraction: true },
    TimePattern { hours: false, minute_digits: (2, 2), fraction: true },
    TimePattern { hours: false, minute_digits: (1, 2), fraction: true },
    TimePattern { hours: true, minute_digits: (2, 2), fraction: false },
    TimePattern { hours: false, minute_digits: (2, 2), fraction: false },
    TimePattern { hours: false, minute_digits: (1, 2), fraction: false },
];

impl TimePattern {
    fn parse(self, token: &str) -> Option<Duration> {
        let (clock, fraction) = match (token.split_once('.'), self.fraction) {
            (Some((clock, fraction)), true) => (clock, Some(fraction)),
            (None, false) => (token, None),
            _ => return None,
        };

        let parts: Vec<&str> = clock.split(':').collect();
        let (min_digits, max_digits) = self.minute_digits;
        let (hours, minutes, seconds) = match (self.hours, parts.as_slice()) {
            (true, [h, m, s]) => (
                digits(h, 1, usize::MAX)?,
                digits(m, min_digits, max_digits)?,
                digits(s, 2, 2)?,
            ),
            (false, [m, s]) => (0, digits(m, min_digits, max_digits)?, digits(s, 2, 2)?),
            _ => return None,
        };
        if minutes >= 60 || seconds >= 60 {
            return None;
        }

        // Two-digit hundredths are the legacy variant; scale to millis.
        let millis = match fraction {
            Some(fraction) => {
                let value = digits(fraction, 1, 3)?;
                value * 10u64.pow(3 - fraction.len() as u32)
            }
            None => 0,
        };

        let total = hours
            .checked_mul(MILLIS_PER_HOUR)?
            .checked_add(minutes * MILLIS_PER_MINUTE + seconds * MILLIS_PER_SECOND + millis)?;
        Some(Duration::from_millis(total))
    }
}

/// Parse an all-digit field whose length lies in `min..=max`
fn digits(field: &str, min: usize, max: usize) -> Option<u64> {
    if field.len() < min || field.len() > max || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

/// Parse a time token such as `01:02.345` or `1:02:03`
pub fn parse_time(token: &str) -> Option<Duration> {
    PATTERNS.iter().find_map(|pattern| pattern.parse(token))
}

/// Render a duration canonically
///
/// `mm:ss.fff` below one hour, `h:mm:ss.fff` from there on. Precision below
/// one millisecond is truncated, never rounded.
pub fn format_time(time: Duration) -> String {
    let total = time.as_millis() as u64;
    let hours = total / MILLIS_PER_HOUR;
    let minutes = total % MILLIS_PER_HOUR / MILLIS_PER_MINUTE;
    let seconds = total % MILLIS_PER_MINUTE / MILLIS_PER_SECOND;
    let millis = total % MILLIS_PER_SECOND;

    if hours > 0 {
        format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    } else {
        format!("{:02}:{:02}.{:03}", minutes, seconds, millis)
    }
}

/// Parse a `[time]text` line
///
/// The bracketed token must open the line (leading whitespace is ignored);
/// everything after the first closing bracket is the text.
pub fn parse_line(line: &str) -> Option<Onset> {
    let rest = line.trim_start().strip_prefix('[')?;
    let (token, text) = rest.split_once(']')?;
    let start = parse_time(token)?;
    Some(Onset::new(start, text))
}

/// Whole milliseconds as the `u32` ID3v2 frames store, saturating at `u32::MAX`
pub fn frame_millis(time: Duration) -> u32 {
    u32::try_from(time.as_millis()).unwrap_or(u32::MAX)
}

/// Render a `[time]text` line
pub fn format_line(start: Duration, text: &str) -> String {
    format!("[{}]{}", format_time(start), text)
}

/// Render a duration as `[d.]hh:mm:ss[.fffffff]`
///
/// The fraction is written in 100ns ticks and omitted when zero.
pub fn format_rich_time(time: Duration) -> String {
    let total_seconds = time.as_secs();
    let days = total_seconds / SECONDS_PER_DAY;
    let hours = total_seconds % SECONDS_PER_DAY / 3600;
    let minutes = total_seconds % 3600 / 60;
    let seconds = total_seconds % 60;
    let ticks = time.subsec_nanos() / NANOS_PER_TICK;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{}.", days));
    }
    out.push_str(&format!("{:02}:{:02}:{:02}", hours, minutes, seconds));
    if ticks > 0 {
        out.push_str(&format!(".{:07}", ticks));
    }
    out
}

/// Parse the `[d.]hh:mm:ss[.fffffff]` duration pattern
pub fn parse_rich_time(text: &str) -> Option<Duration> {
    let parts: Vec<&str> = text.trim().split(':').collect();
    let [head, minutes, seconds] = parts.as_slice() else {
        return None;
    };

    let (days, hours) = match head.split_once('.') {
        Some((days, hours)) => (digits(days, 1, usize::MAX)?, digits(hours, 1, 2)?),
        None => (0, digits(head, 1, 2)?),
    };
    let minutes = digits(minutes, 1, 2)?;
    let (seconds, fraction) = match seconds.split_once('.') {
        Some((seconds, fraction)) => (digits(seconds, 1, 2)?, Some(fraction)),
        None => (digits(seconds, 1, 2)?, None),
    };
    if hours >= 24 || minutes >= 60 || seconds >= 60 {
        return None;
    }

    let nanos = match fraction {
        Some(fraction) => {
            let ticks = digits(fraction, 1, TICK_DIGITS)?;
            let ticks = ticks * 10u64.pow((TICK_DIGITS - fraction.len()) as u32);
            (ticks * u64::from(NANOS_PER_TICK)) as u32
        }
        None => 0,
    };

    let whole = days
        .checked_mul(SECONDS_PER_DAY)?
        .checked_add(hours * 3600 + minutes * 60 + seconds)?;
    Some(Duration::new(whole, nanos))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn frame_millis_saturates() {
        assert_eq!(frame_millis(ms(1_500)), 1_500);
        assert_eq!(frame_millis(ms(u64::from(u32::MAX))), u32::MAX);
        assert_eq!(frame_millis(ms(u64::from(u32::MAX) + 1)), u32::MAX);
        assert_eq!(frame_millis(Duration::from_secs(60 * 60 * 24 * 365)), u32::MAX);
    }

    #[test]
    fn parses_every_pattern() {
        assert_eq!(parse_time("1:02:03.456"), Some(ms(3_723_456)));
        assert_eq!(parse_time("02:03.456"), Some(ms(123_456)));
        assert_eq!(parse_time("2:03.456"), Some(ms(123_456)));
        assert_eq!(parse_time("1:02:03"), Some(ms(3_723_000)));
        assert_eq!(parse_time("02:03"), Some(ms(123_000)));
        assert_eq!(parse_time("2:03"), Some(ms(123_000)));
    }

    #[test]
    fn legacy_hundredths_scale_to_millis() {
        assert_eq!(parse_time("00:12.34"), Some(ms(12_340)));
        assert_eq!(parse_time("00:12.5"), Some(ms(12_500)));
    }

    #[test]
    fn rejects_malformed_tokens() {
        for token in [
            "", "ar:Someone", "12", "00:60.000", "60:00", "00:5", "00:05.", "00:05.1234",
            "0:00:00:00", "-1:00", "00:05,000", "a1:00",
        ] {
            assert_eq!(parse_time(token), None, "{token:?} should be rejected");
        }
    }

    #[test]
    fn formats_canonically() {
        assert_eq!(format_time(Duration::ZERO), "00:00.000");
        assert_eq!(format_time(ms(5_000)), "00:05.000");
        assert_eq!(format_time(ms(3_599_999)), "59:59.999");
        assert_eq!(format_time(ms(3_600_000)), "1:00:00.000");
        assert_eq!(format_time(ms(90_061_001)), "25:01:01.001");
    }

    #[test]
    fn format_truncates_sub_millisecond_precision() {
        assert_eq!(format_time(Duration::from_micros(1_999)), "00:00.001");
        assert_eq!(format_time(Duration::from_nanos(999_999)), "00:00.000");
    }

    #[test]
    fn formatted_lines_round_trip() {
        for token in ["1:02:03.456", "02:03.456", "2:03.456", "1:02:03", "02:03", "2:03"] {
            let time = parse_time(token).unwrap();
            let line = format_line(time, "text");
            let onset = parse_line(&line).unwrap();
            assert_eq!(onset.start, time);
            assert_eq!(format_line(onset.start, &onset.text), line);
        }
    }

    #[test]
    fn parse_line_splits_at_first_bracket() {
        let onset = parse_line("[00:05.000]hello [world]").unwrap();
        assert_eq!(onset.start, ms(5_000));
        assert_eq!(onset.text, "hello [world]");

        let empty = parse_line("[00:07.00]").unwrap();
        assert_eq!(empty.text, "");

        assert!(parse_line("  [00:01.000]indented").is_some());
        assert!(parse_line("hello world").is_none());
        assert!(parse_line("[ti:Title]").is_none());
        assert!(parse_line("[00:01.000").is_none());
    }

    #[test]
    fn rich_time_round_trips() {
        for time in [
            Duration::ZERO,
            ms(5_000),
            ms(61_250),
            Duration::new(90_061, 123_456_700),
            Duration::new(3 * SECONDS_PER_DAY + 5, 0),
        ] {
            assert_eq!(parse_rich_time(&format_rich_time(time)), Some(time));
        }
    }

    #[test]
    fn rich_time_layout() {
        assert_eq!(format_rich_time(ms(5_000)), "00:00:05");
        assert_eq!(format_rich_time(ms(61_250)), "00:01:01.2500000");
        assert_eq!(format_rich_time(Duration::new(90_000, 0)), "1.01:00:00");
        assert_eq!(parse_rich_time("00:00:05.5"), Some(ms(5_500)));
        assert_eq!(parse_rich_time("00:61:00"), None);
        assert_eq!(parse_rich_time("garbage"), None);
    }
}
