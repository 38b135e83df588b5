//! Conversion between provider timestamps and the packed clock encoding.

use crate::error::{Error, Result};

/// A 24-hour clock time packed as HHMM with no separator (8:24 becomes
/// 824, 23:59 becomes 2359).
///
/// Values order correctly as plain integers because both operands share
/// the same encoding, but the scale jumps from xx59 to (xx+1)00, so it is
/// only suitable for comparison. The type offers no arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeValue(u16);

impl TimeValue {
    /// Accepts a packed HHMM value with hour <= 23 and minute <= 59.
    pub fn new(raw: u16) -> Option<Self> {
        (raw / 100 <= 23 && raw % 100 <= 59).then_some(Self(raw))
    }

    pub fn hour(self) -> u16 {
        self.0 / 100
    }

    pub fn minute(self) -> u16 {
        self.0 % 100
    }

    pub fn as_u16(self) -> u16 {
        self.0
    }
}

/// Byte positions of the HH:MM field inside a provider timestamp, after
/// the ten-character date and one separator ("2021-10-05 14:30" or
/// "2021-10-05T14:30:00").
const TIME_FIELD: std::ops::Range<usize> = 11..16;

/// Extract the time-of-day portion of a provider timestamp.
///
/// Fails with [`Error::MalformedTimestamp`] when the string is shorter
/// than the expected prefix, the remainder is not numeric, or the digits
/// do not form a valid clock time.
pub fn parse_time_value(timestamp: &str) -> Result<TimeValue> {
    let malformed = || Error::MalformedTimestamp(timestamp.to_owned());

    let field = timestamp.get(TIME_FIELD).ok_or_else(malformed)?;
    let digits = field.replacen(':', "", 1);
    let raw: u16 = digits.parse().map_err(|_| malformed())?;

    TimeValue::new(raw).ok_or_else(malformed)
}

/// Format a [`TimeValue`] as a 12-hour "HH:MM AM/PM" display string.
///
/// 0..=1159 keeps its hour digits with an AM suffix, 1200..=1259 displays
/// unchanged as "12:xx PM", and later values drop 1200 so 13:00-23:59
/// display as 01:00-11:59 PM. Midnight stays "00:00 AM".
pub fn format_am_pm(t: TimeValue) -> String {
    let raw = t.as_u16();
    let (display, suffix) = if raw <= 1159 {
        (raw, "AM")
    } else if raw > 1259 {
        (raw - 1200, "PM")
    } else {
        (raw, "PM")
    };

    format!("{:02}:{:02} {}", display / 100, display % 100, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tv(raw: u16) -> TimeValue {
        TimeValue::new(raw).expect("valid clock time")
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(TimeValue::new(2400).is_none());
        assert!(TimeValue::new(1260).is_none());
        assert!(TimeValue::new(999).is_some());
        assert!(TimeValue::new(0).is_some());
        assert!(TimeValue::new(2359).is_some());
    }

    #[test]
    fn parses_space_separated_timestamp() {
        assert_eq!(parse_time_value("2021-10-05 14:30").unwrap(), tv(1430));
    }

    #[test]
    fn parses_t_separated_timestamp_with_seconds() {
        assert_eq!(parse_time_value("2021-10-05T06:00:00").unwrap(), tv(600));
    }

    #[test]
    fn parse_round_trips_constructed_timestamp() {
        let timestamp = format!("2021-10-05 {:02}:{:02}", 8, 24);
        let parsed = parse_time_value(&timestamp).unwrap();
        assert_eq!(parsed.hour(), 8);
        assert_eq!(parsed.minute(), 24);
        assert_eq!(parsed.as_u16(), 824);
    }

    #[test]
    fn parse_rejects_short_input() {
        let err = parse_time_value("14:30").unwrap_err();
        assert!(matches!(err, Error::MalformedTimestamp(_)));
    }

    #[test]
    fn parse_rejects_non_numeric_remainder() {
        let err = parse_time_value("2021-10-05 xx:yy").unwrap_err();
        assert!(matches!(err, Error::MalformedTimestamp(_)));
    }

    #[test]
    fn parse_rejects_invalid_minute() {
        let err = parse_time_value("2021-10-05 14:75").unwrap_err();
        assert!(matches!(err, Error::MalformedTimestamp(_)));
    }

    #[test]
    fn formats_morning_times_as_am() {
        assert_eq!(format_am_pm(tv(824)), "08:24 AM");
        assert_eq!(format_am_pm(tv(1159)), "11:59 AM");
    }

    #[test]
    fn formats_noon_hour_unchanged() {
        assert_eq!(format_am_pm(tv(1200)), "12:00 PM");
        assert_eq!(format_am_pm(tv(1230)), "12:30 PM");
        assert_eq!(format_am_pm(tv(1259)), "12:59 PM");
    }

    #[test]
    fn formats_afternoon_times_shifted_by_twelve() {
        assert_eq!(format_am_pm(tv(1300)), "01:00 PM");
        assert_eq!(format_am_pm(tv(1624)), "04:24 PM");
        assert_eq!(format_am_pm(tv(2359)), "11:59 PM");
    }

    #[test]
    fn formats_midnight_without_conversion() {
        assert_eq!(format_am_pm(tv(0)), "00:00 AM");
    }

    #[test]
    fn ordering_follows_the_packed_encoding() {
        assert!(tv(59) < tv(100));
        assert!(tv(1159) < tv(1200));
        assert!(tv(600) < tv(1800));
    }
}
