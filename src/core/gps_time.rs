//! GNSS time scales.
//!
//! Every value here is an `i64` count of milliseconds. **GPS time** counts
//! from 1980-01-06T00:00:00 and includes leap seconds as elapsed time;
//! **UNIX time** counts from 1970-01-01 and repeats them. Around an inserted
//! leap second the two scales advance like this:
//!
//! ```text
//! UTC        : 23:59:59.000 23:59:59.999 23:59:60.000 23:59:60.999 00:00:00.000
//! GPS time   :   ...800.000   ...800.999   ...801.000   ...801.999   ...802.000
//! UNIX time  :   ...800.000   ...800.999   ...800.000   ...800.999   ...801.000
//! ```
//!
//! The `_leap` variants convert without any leap second correction.

use crate::core::datetime::Datetime;
use crate::utils::error::Result;
use serde::Serialize;

pub const MS_IN_HOUR: i64 = 60 * 60 * 1000;
pub const MS_IN_DAY: i64 = 24 * MS_IN_HOUR;
pub const MS_IN_WEEK: i64 = 7 * MS_IN_DAY;
pub const SEC_IN_WEEK: i64 = MS_IN_WEEK / 1000;

/// 1980-01-06 minus 1970-01-01: ten years of which two are leap years,
/// plus five days.
pub const GPS_UNIX_DIFF: i64 = (5 + 2 + 10 * 365) * MS_IN_DAY;
pub const GPS_UNIX_DIFF_S: i64 = GPS_UNIX_DIFF / 1000;

/// GLONASS runs on Moscow time (UTC+3). The extra day aligns the GLONASS
/// day boundary with the GPS week arithmetic.
pub const GPS_GLO_DIFF: i64 = 3 * MS_IN_HOUR - MS_IN_DAY;

/// BeiDou time lags GPS time by a constant 14 s.
pub const BDT_LEAP_OFFSET_MS: i64 = 14_000;

/// GPS week in which BeiDou week 0 starts (2006-01-01).
pub const BDT_EPOCH_GPS_WEEK: i64 = 1356;

/// Modified Julian Day of the GPS epoch.
pub const GPS_EPOCH_MJD: i64 = 44_244;

/// 2100-01-01 plus one minute minus leap seconds.
pub const Y2100: i64 = 3_786_480_060_000;

/// GPS times at which a leap second starts.
pub const GPST_LEAP_EPOCHS: [i64; 18] = [
    46_828_800_000,    // 1981-06-30 23:59:60
    78_364_801_000,    // 1982-06-30 23:59:60
    109_900_802_000,   // 1983-06-30 23:59:60
    173_059_203_000,   // 1985-06-30 23:59:60
    252_028_804_000,   // 1987-12-31 23:59:60
    315_187_205_000,   // 1989-12-31 23:59:60
    346_723_206_000,   // 1990-12-31 23:59:60
    393_984_007_000,   // 1992-06-30 23:59:60
    425_520_008_000,   // 1993-06-30 23:59:60
    457_056_009_000,   // 1994-06-30 23:59:60
    504_489_610_000,   // 1995-12-31 23:59:60
    551_750_411_000,   // 1997-06-30 23:59:60
    599_184_012_000,   // 1998-12-31 23:59:60
    820_108_813_000,   // 2005-12-31 23:59:60
    914_803_214_000,   // 2008-12-31 23:59:60
    1_025_136_015_000, // 2012-06-30 23:59:60
    1_119_744_016_000, // 2015-06-30 23:59:60
    1_167_264_017_000, // 2016-12-31 23:59:60
];

/// Number of leap seconds accumulated at a GPS time.
pub fn leap_seconds(gps_ms: i64) -> i64 {
    GPST_LEAP_EPOCHS.partition_point(|epoch| *epoch <= gps_ms) as i64
}

/// Like [`leap_seconds`], for a GPS-epoch count that does not include the
/// leap seconds themselves (UNIX time shifted to the GPS epoch).
pub fn leap_seconds_unix_scale(gps_ms: i64) -> i64 {
    GPST_LEAP_EPOCHS
        .iter()
        .enumerate()
        .rposition(|(i, epoch)| gps_ms >= epoch - i as i64 * 1000)
        .map_or(0, |i| i as i64 + 1)
}

pub fn current_leap_seconds() -> i64 {
    leap_seconds(gps_now())
}

pub fn gps_unix_diff_at(gps_ms: i64) -> i64 {
    GPS_UNIX_DIFF - leap_seconds(gps_ms) * 1000
}

pub fn gps_to_unix(gps_ms: i64) -> i64 {
    gps_ms + gps_unix_diff_at(gps_ms)
}

pub fn gps_to_unix_leap(gps_ms: i64) -> i64 {
    gps_ms + GPS_UNIX_DIFF
}

pub fn unix_to_gps(unix_ms: i64) -> i64 {
    let gt = unix_ms - GPS_UNIX_DIFF;
    gt + leap_seconds_unix_scale(gt) * 1000
}

pub fn unix_to_gps_leap(unix_ms: i64) -> i64 {
    unix_ms - GPS_UNIX_DIFF
}

/// [`gps_to_unix`] returning `None` on `i64` overflow.
pub fn checked_gps_to_unix(gps_ms: i64) -> Option<i64> {
    gps_ms.checked_add(gps_unix_diff_at(gps_ms))
}

/// [`unix_to_gps`] returning `None` on `i64` overflow.
pub fn checked_unix_to_gps(unix_ms: i64) -> Option<i64> {
    let gt = unix_ms.checked_sub(GPS_UNIX_DIFF)?;
    gt.checked_add(leap_seconds_unix_scale(gt) * 1000)
}

/// GPS time from the system clock. Only as good as the host clock.
pub fn gps_now() -> i64 {
    unix_to_gps(chrono::Utc::now().timestamp_millis())
}

pub fn gps_week(gps_ms: i64) -> i64 {
    gps_ms / MS_IN_WEEK
}

pub fn ms_of_week(gps_ms: i64) -> i64 {
    gps_ms % MS_IN_WEEK
}

pub fn construct(week: i64, ms_of_week: i64) -> i64 {
    week * MS_IN_WEEK + ms_of_week
}

pub fn gps_to_bdt(gps_ms: i64) -> i64 {
    gps_ms - BDT_LEAP_OFFSET_MS
}

pub fn bdt_to_gps(bdt_ms: i64) -> i64 {
    bdt_ms + BDT_LEAP_OFFSET_MS
}

/// BeiDou week number of a GPS time.
pub fn bds_week(gps_ms: i64) -> i64 {
    (gps_to_bdt(gps_ms) - BDT_EPOCH_GPS_WEEK * MS_IN_WEEK).div_euclid(MS_IN_WEEK)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeParts {
    pub ms: i64,
    pub sec: i64,
    pub min: i64,
    pub hour: i64,
    /// Day of week, 0 = Sunday for GPS time.
    pub day: i64,
    pub week: i64,
}

pub fn separate(time_ms: i64) -> TimeParts {
    let sec = time_ms / 1000;
    let min = sec / 60;
    let hour = min / 60;
    let day = hour / 24;
    TimeParts {
        ms: time_ms % 1000,
        sec: sec % 60,
        min: min % 60,
        hour: hour % 24,
        day: day % 7,
        week: day / 7,
    }
}

/// GLONASS time of day for a GPS ms-of-week in week `ref_gps_week`.
pub fn gps_ms_to_glo_ms(gps_ms_of_week: i64, ref_gps_week: i64) -> i64 {
    let leaps = leap_seconds(construct(ref_gps_week, gps_ms_of_week));
    (MS_IN_DAY + gps_ms_of_week + GPS_GLO_DIFF - leaps * 1000) % MS_IN_DAY
}

/// GLONASS time of day for a full GPS time.
pub fn gps_to_glo_ms(gps_ms: i64) -> i64 {
    (MS_IN_DAY + ms_of_week(gps_ms) + GPS_GLO_DIFF - leap_seconds(gps_ms) * 1000) % MS_IN_DAY
}

/// Full GPS time from a GLONASS time of day, taking the day nearest to
/// `ref_gps_ms`.
pub fn glo_ms_to_gps(glo_ms_of_day: i64, ref_gps_ms: i64) -> i64 {
    let gt = add_guessed_days(ref_gps_ms, glo_ms_of_day - GPS_GLO_DIFF);
    gt + leap_seconds_unix_scale(gt) * 1000
}

/// Full GPS time from a GLONASS day of week (1 = Monday .. 7 = Sunday) and
/// time of day, taking the week nearest to `ref_gps_ms`.
pub fn glo_dms_to_gps(glo_dow: u32, glo_ms_of_day: i64, ref_gps_ms: i64) -> i64 {
    let day = (glo_dow as i64 + 7 - 1) % 7;
    let gt = add_guessed_week(ref_gps_ms, day * MS_IN_DAY + glo_ms_of_day - GPS_GLO_DIFF);
    gt + leap_seconds_unix_scale(gt) * 1000
}

/// GLONASS day of week of a full GPS time.
pub fn gps_to_glo_dow(gps_ms: i64) -> u32 {
    let glo_week_ms = gps_ms + GPS_GLO_DIFF - leap_seconds(gps_ms) * 1000;
    ((glo_week_ms / MS_IN_DAY + 1) % 7) as u32
}

/// The GPS time closest to `ref_gps_ms` whose ms-of-week is `week_ms`.
pub fn add_guessed_week(ref_gps_ms: i64, week_ms: i64) -> i64 {
    let target = week_ms % MS_IN_WEEK;
    let mut week = gps_week(ref_gps_ms);
    let ms = ms_of_week(ref_gps_ms);
    if (target - ms).abs() > MS_IN_WEEK / 2 {
        // A small target against a large reference means the week rolled over.
        if target < ms {
            week += 1;
        } else {
            week -= 1;
        }
    }
    construct(week, target)
}

/// The GPS time closest to `ref_gps_ms` whose ms-of-day is `day_ms`.
pub fn add_guessed_days(ref_gps_ms: i64, day_ms: i64) -> i64 {
    let target = day_ms % MS_IN_DAY;
    let ms = ms_of_week(ref_gps_ms);
    let mut day = gps_week(ref_gps_ms) * 7 + ms / MS_IN_DAY;
    let ms = ms % MS_IN_DAY;
    if (target - ms).abs() > MS_IN_DAY / 2 {
        if target < ms {
            day += 1;
        } else {
            day -= 1;
        }
    }
    construct(day / 7, target + (day % 7) * MS_IN_DAY)
}

/// The GPS time closest to `ref_gps_ms` whose ms-of-hour is `hour_ms`.
pub fn add_guessed_hours(ref_gps_ms: i64, hour_ms: i64) -> i64 {
    let ms = ms_of_week(ref_gps_ms);
    let mut hour = gps_week(ref_gps_ms) * 7 * 24 + ms / MS_IN_HOUR;
    let ms = ms % MS_IN_HOUR;
    if (hour_ms - ms).abs() > MS_IN_HOUR / 2 {
        if hour_ms < ms {
            hour += 1;
        } else {
            hour -= 1;
        }
    }
    construct(hour / (7 * 24), hour_ms + (hour % (7 * 24)) * MS_IN_HOUR)
}

pub fn gps_to_datetime(gps_ms: i64) -> Result<Datetime> {
    Datetime::from_unix_millis(gps_to_unix(gps_ms))
}

pub fn gps_to_datetime_leap(gps_ms: i64) -> Result<Datetime> {
    Datetime::from_unix_millis(gps_to_unix_leap(gps_ms))
}

/// Modified Julian Day containing a GPS time (GPS day boundaries).
pub fn mjd(gps_ms: i64) -> i64 {
    gps_ms.div_euclid(MS_IN_DAY) + GPS_EPOCH_MJD
}

pub fn current_mjd() -> i64 {
    mjd(gps_now())
}

pub fn mjd_to_gps(mjd: i64, ms_of_day: i64) -> i64 {
    (mjd - GPS_EPOCH_MJD) * MS_IN_DAY + ms_of_day
}

/// True at the exact instant a leap second begins.
pub fn is_leap_second(gps_ms: i64) -> bool {
    GPST_LEAP_EPOCHS.binary_search(&gps_ms).is_ok()
}
