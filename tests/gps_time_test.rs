use gnss_kit::gps_time::*;
use gnss_kit::Datetime;

// 2017-01-01 00:00:00 UTC, right after the 18th leap second.
const NEW_YEAR_2017_UNIX: i64 = 1_483_228_800_000;
const NEW_YEAR_2017_GPS: i64 = 1_167_264_018_000;

fn gps_at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> i64 {
    let dt = Datetime::from_ymd_hms_milli(y, mo, d, h, mi, s, ms).unwrap();
    unix_to_gps(dt.unix_millis())
}

#[test]
fn test_unix_gps_conversion_across_leap_second() {
    assert_eq!(unix_to_gps(NEW_YEAR_2017_UNIX), NEW_YEAR_2017_GPS);
    assert_eq!(gps_to_unix(NEW_YEAR_2017_GPS), NEW_YEAR_2017_UNIX);
    assert_eq!(leap_seconds(NEW_YEAR_2017_GPS), 18);

    // The inserted second repeats the last UNIX second of the year.
    assert!(is_leap_second(NEW_YEAR_2017_GPS - 1000));
    assert_eq!(gps_to_unix(NEW_YEAR_2017_GPS - 500), NEW_YEAR_2017_UNIX - 500);
    assert_eq!(gps_to_unix(NEW_YEAR_2017_GPS - 1500), NEW_YEAR_2017_UNIX - 500);
}

#[test]
fn test_unix_gps_round_trip_outside_leap_seconds() {
    for gps_ms in [
        0,
        GPST_LEAP_EPOCHS[0] - 1,
        GPST_LEAP_EPOCHS[0] + 1000,
        gps_at(2000, 1, 1, 12, 0, 0, 0),
        gps_at(2020, 6, 15, 12, 34, 56, 789),
    ] {
        assert_eq!(unix_to_gps(gps_to_unix(gps_ms)), gps_ms, "gps {}", gps_ms);
    }
}

#[test]
fn test_leap_free_conversions() {
    assert_eq!(gps_to_unix_leap(0), GPS_UNIX_DIFF);
    assert_eq!(unix_to_gps_leap(GPS_UNIX_DIFF), 0);
    let dt = gps_to_datetime_leap(0).unwrap();
    assert_eq!(dt.format("YYYY-MM-DD HH:mm:ss"), "1980-01-06 00:00:00");
}

#[test]
fn test_gps_to_datetime() {
    let dt = gps_to_datetime(NEW_YEAR_2017_GPS).unwrap();
    assert_eq!(dt.format("YYYY-MM-DD HH:mm:ss.ccc"), "2017-01-01 00:00:00.000");
    assert_eq!(mjd(NEW_YEAR_2017_GPS), 57_754);
}

#[test]
fn test_week_decomposition() {
    assert_eq!(gps_week(NEW_YEAR_2017_GPS), 1930);
    assert_eq!(ms_of_week(NEW_YEAR_2017_GPS), 18_000);
    assert_eq!(construct(1930, 18_000), NEW_YEAR_2017_GPS);

    let parts = separate(NEW_YEAR_2017_GPS);
    assert_eq!((parts.week, parts.day, parts.hour), (1930, 0, 0));
    assert_eq!((parts.min, parts.sec, parts.ms), (0, 18, 0));
}

#[test]
fn test_beidou_week_starts_at_2006() {
    let epoch = gps_at(2006, 1, 1, 0, 0, 0, 0);
    assert_eq!(epoch, construct(BDT_EPOCH_GPS_WEEK, 0) + BDT_LEAP_OFFSET_MS);
    assert_eq!(bds_week(epoch), 0);
    assert_eq!(bds_week(epoch - 1), -1);
    assert_eq!(bds_week(epoch + MS_IN_WEEK), 1);
    assert_eq!(bdt_to_gps(gps_to_bdt(epoch)), epoch);
}

#[test]
fn test_glonass_time_of_day() {
    // Moscow is three hours ahead of UTC.
    assert_eq!(gps_to_glo_ms(NEW_YEAR_2017_GPS), 3 * MS_IN_HOUR);
    assert_eq!(
        gps_ms_to_glo_ms(ms_of_week(NEW_YEAR_2017_GPS), gps_week(NEW_YEAR_2017_GPS)),
        3 * MS_IN_HOUR
    );
    // Sunday
    assert_eq!(gps_to_glo_dow(NEW_YEAR_2017_GPS), 0);
}

#[test]
fn test_glonass_round_trips() {
    for gps_ms in [NEW_YEAR_2017_GPS, gps_at(2020, 6, 15, 12, 34, 56, 789)] {
        let glo_ms = gps_to_glo_ms(gps_ms);
        let glo_dow = gps_to_glo_dow(gps_ms);
        assert_eq!(glo_ms_to_gps(glo_ms, gps_ms + 3 * MS_IN_HOUR), gps_ms);
        assert_eq!(glo_ms_to_gps(glo_ms, gps_ms - 3 * MS_IN_HOUR), gps_ms);
        assert_eq!(glo_dms_to_gps(glo_dow, glo_ms, gps_ms + MS_IN_DAY), gps_ms);
    }
}

#[test]
fn test_guessed_periods_pick_nearest() {
    let reference = gps_at(2020, 6, 15, 23, 59, 0, 0);
    let target = gps_at(2020, 6, 16, 0, 1, 0, 0);
    assert_eq!(add_guessed_week(reference, ms_of_week(target)), target);
    assert_eq!(add_guessed_days(reference, target % MS_IN_DAY), target);
    assert_eq!(add_guessed_hours(reference, target % MS_IN_HOUR), target);
}

#[test]
fn test_mjd_round_trip() {
    let gps_ms = mjd_to_gps(57_754, 18_000);
    assert_eq!(gps_ms, NEW_YEAR_2017_GPS);
    assert_eq!(mjd(gps_ms), 57_754);
}
