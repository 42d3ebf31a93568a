use crate::normalize::NormalizeError;
use crate::time::Minute;
use chrono::{NaiveDate, NaiveTime, Timelike};

const CLOCK_FORMAT: &str = "%I:%M %p";
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Parses a 12-hour `"HH:MM AM/PM"` clock string into minutes since midnight.
///
/// # Examples
/// ```
/// use stundenplan_libs::clock::parse_clock;
///
/// assert_eq!(parse_clock("09:30 AM").unwrap(), 570);
/// assert_eq!(parse_clock("12:00 AM").unwrap(), 0);
/// assert_eq!(parse_clock("12:15 PM").unwrap(), 735);
/// assert_eq!(parse_clock("01:05 PM").unwrap(), 785);
/// assert!(parse_clock("13:00").is_err());
/// ```
pub fn parse_clock(value: &str) -> Result<Minute, NormalizeError> {
    let time = NaiveTime::parse_from_str(value.trim(), CLOCK_FORMAT).map_err(|_| {
        NormalizeError::MalformedTime {
            value: value.to_string(),
        }
    })?;

    // hour < 24 and minute < 60, so this always fits
    Ok((time.hour() * 60 + time.minute()) as Minute)
}

/// Parses a `"MM/DD/YYYY"` date string.
pub fn parse_date(value: &str) -> Result<NaiveDate, NormalizeError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        NormalizeError::MalformedDate {
            value: value.to_string(),
        }
    })
}

/// `"HH:MM"`. Hours are not wrapped at midnight, so a block closing at
/// the end of the day renders as `"24:00"`.
///
/// # Examples
/// ```
/// use stundenplan_libs::clock::format_hhmm;
///
/// assert_eq!(format_hhmm(570), "09:30");
/// assert_eq!(format_hhmm(1440), "24:00");
/// ```
pub fn format_hhmm(minutes: Minute) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// `"HH:MM:SS"`, seconds are always zero.
pub fn format_hhmmss(minutes: Minute) -> String {
    format!("{}:00", format_hhmm(minutes))
}
