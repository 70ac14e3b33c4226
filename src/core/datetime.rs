use crate::core::pattern;
use crate::utils::error::{GnssError, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Day-of-week numbers with Sunday as zero.
pub const SZ_SUNDAY: u32 = 0;
pub const SZ_MONDAY: u32 = 1;
pub const SZ_TUESDAY: u32 = 2;
pub const SZ_WEDNESDAY: u32 = 3;
pub const SZ_THURSDAY: u32 = 4;
pub const SZ_FRIDAY: u32 = 5;
pub const SZ_SATURDAY: u32 = 6;

/// A UTC calendar instant with millisecond precision.
///
/// Leap seconds are not representable; UNIX time repeats them, so a
/// `Datetime` is always on the UNIX scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Datetime(NaiveDateTime);

impl Datetime {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::from_ymd_hms_milli(year, month, day, 0, 0, 0, 0)
    }

    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        Self::from_ymd_hms_milli(year, month, day, hour, minute, second, 0)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn from_ymd_hms_milli(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
    ) -> Result<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
            GnssError::invalid_date(format!("{:04}-{:02}-{:02}", year, month, day))
        })?;
        // chrono reads milli >= 1000 as a leap second, which UNIX time cannot hold
        let datetime = Some(milli)
            .filter(|ms| *ms < 1000)
            .and_then(|ms| date.and_hms_milli_opt(hour, minute, second, ms))
            .ok_or_else(|| {
                GnssError::invalid_date(format!(
                    "{:02}:{:02}:{:02}.{:03}",
                    hour, minute, second, milli
                ))
            })?;
        Ok(Self(datetime))
    }

    /// Milliseconds since 1970-01-01T00:00:00 UTC; negative values are
    /// instants before the epoch.
    pub fn from_unix_millis(millis: i64) -> Result<Self> {
        chrono::DateTime::<Utc>::from_timestamp_millis(millis)
            .map(|dt| Self(dt.naive_utc()))
            .ok_or_else(|| GnssError::invalid_date(format!("{} ms is out of range", millis)))
    }

    pub fn now() -> Self {
        Self(Utc::now().naive_utc())
    }

    pub(crate) fn from_naive(datetime: NaiveDateTime) -> Self {
        Self(datetime)
    }

    pub fn unix_millis(&self) -> i64 {
        self.0.and_utc().timestamp_millis()
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// 1..=12
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn second(&self) -> u32 {
        self.0.second()
    }

    pub fn millisecond(&self) -> u32 {
        self.0.nanosecond() / 1_000_000
    }

    /// 1 for January 1st.
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    pub fn day_of_week_sz(&self) -> u32 {
        self.0.weekday().num_days_from_sunday()
    }

    /// Hour on a 12-hour clock, 1..=12.
    pub fn hour12(&self) -> u32 {
        match self.hour() % 12 {
            0 => 12,
            h => h,
        }
    }

    pub fn is_am(&self) -> bool {
        self.hour() < 12
    }

    pub fn add_millis(&self, millis: i64) -> Result<Self> {
        self.0
            .checked_add_signed(Duration::milliseconds(millis))
            .map(Self)
            .ok_or_else(|| GnssError::invalid_date(format!("{} + {} ms overflows", self, millis)))
    }

    /// Renders the instant as UTC.
    pub fn format(&self, pattern: &str) -> String {
        pattern::format(pattern, self, 0)
    }

    /// Renders the wall clock of a zone `hours:minutes` away from UTC. Both
    /// parts carry their own sign, so `(0, -30)` is UTC-00:30. Fails when the
    /// shifted wall clock leaves the representable range.
    pub fn format_with_offset(&self, pattern: &str, hours: i32, minutes: i32) -> Result<String> {
        let offset_minutes = hours as i64 * 60 + minutes as i64;
        let local = self.add_millis(offset_minutes * 60_000)?;
        Ok(pattern::format(pattern, &local, offset_minutes))
    }

    /// Inverse of [`Datetime::format_with_offset`]: a parsed zone offset is
    /// removed so the result is always UTC.
    pub fn parse(pattern: &str, text: &str) -> Result<Self> {
        pattern::parse(pattern, text)
    }
}

impl fmt::Display for Datetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format("YYYY-MM-DD HH:mm:ss.ccc"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_millis_round_trip() {
        let dt = Datetime::from_ymd_hms_milli(2001, 2, 3, 4, 5, 6, 789).unwrap();
        assert_eq!(dt.unix_millis(), 981_173_106_789);
        assert_eq!(Datetime::from_unix_millis(dt.unix_millis()).unwrap(), dt);
    }

    #[test]
    fn test_negative_millis() {
        let dt = Datetime::from_unix_millis(-1).unwrap();
        assert_eq!(dt.year(), 1969);
        assert_eq!(dt.month(), 12);
        assert_eq!(dt.day(), 31);
        assert_eq!(dt.millisecond(), 999);
    }

    #[test]
    fn test_invalid_components() {
        assert!(Datetime::from_ymd(2001, 2, 29).is_err());
        assert!(Datetime::from_ymd(2000, 2, 29).is_ok());
        assert!(Datetime::from_ymd(2001, 13, 1).is_err());
        assert!(Datetime::from_ymd_hms(2001, 1, 1, 24, 0, 0).is_err());
    }

    #[test]
    fn test_large_offsets_do_not_overflow() {
        let dt = Datetime::from_ymd_hms(2001, 2, 3, 4, 5, 6).unwrap();
        assert_eq!(dt.format_with_offset("HH", 100_000_000, 0).unwrap(), "20");

        let far = Datetime::from_ymd(200_000, 1, 1).unwrap();
        assert!(far.format_with_offset("YYYY", i32::MAX, i32::MAX).is_err());
        assert!(far.format_with_offset("YYYY", i32::MIN, i32::MIN).is_ok());
    }

    #[test]
    fn test_twelve_hour_clock() {
        let midnight = Datetime::from_ymd_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let noon = Datetime::from_ymd_hms(2001, 1, 1, 12, 0, 0).unwrap();
        assert_eq!(midnight.hour12(), 12);
        assert!(midnight.is_am());
        assert_eq!(noon.hour12(), 12);
        assert!(!noon.is_am());
    }
}
