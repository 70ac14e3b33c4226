use crate::core::datetime::Datetime;
use crate::core::gps_time::{self, TimeParts};
use crate::core::glonass;
use crate::domain::constants;
use crate::domain::{RawSignal, SatSystem};
use crate::utils::error::{GnssError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    /// GPS milliseconds since 1980-01-06
    Gps,
    /// UNIX milliseconds since 1970-01-01
    Unix,
    /// BeiDou milliseconds (GPS - 14 s)
    Bdt,
}

impl TimeScale {
    pub fn to_gps(self, value: i64) -> Result<i64> {
        match self {
            TimeScale::Gps => Some(value),
            TimeScale::Unix => gps_time::checked_unix_to_gps(value),
            TimeScale::Bdt => value.checked_add(gps_time::BDT_LEAP_OFFSET_MS),
        }
        .ok_or_else(|| GnssError::invalid_date(format!("{} ms on the {:?} scale is out of range", value, self)))
    }
}

/// How calendar instants are rendered in reports.
#[derive(Debug, Clone)]
pub struct Rendering {
    pub pattern: String,
    pub offset_hours: i32,
    pub offset_minutes: i32,
}

impl Rendering {
    pub fn render(&self, dt: &Datetime) -> Result<String> {
        dt.format_with_offset(&self.pattern, self.offset_hours, self.offset_minutes)
    }
}

impl Validate for Rendering {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("pattern", &self.pattern)?;
        validation::validate_offset(self.offset_hours, self.offset_minutes)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeReport {
    pub gps_ms: i64,
    pub gps_week: i64,
    pub ms_of_week: i64,
    pub parts: TimeParts,
    pub unix_ms: i64,
    pub leap_seconds: i64,
    pub in_leap_second: bool,
    pub bdt_ms: i64,
    pub bds_week: i64,
    pub glo_ms_of_day: i64,
    pub glo_day_of_week: u32,
    pub mjd: i64,
    pub calendar: String,
}

impl TimeReport {
    pub fn build(gps_ms: i64, rendering: &Rendering) -> Result<Self> {
        rendering.validate()?;
        // Every field below stays far inside i64 once the calendar date exists.
        let unix_ms = gps_time::checked_gps_to_unix(gps_ms)
            .ok_or_else(|| GnssError::invalid_date(format!("GPS time {} ms is out of range", gps_ms)))?;
        let datetime = Datetime::from_unix_millis(unix_ms)?;

        let leap_seconds = gps_time::leap_seconds(gps_ms);
        // The inserted second itself maps onto a repeated UNIX second.
        let in_leap_second = gps_time::GPST_LEAP_EPOCHS
            .iter()
            .any(|epoch| (*epoch..*epoch + 1000).contains(&gps_ms));
        tracing::debug!(gps_ms, leap_seconds, "Building time report");

        Ok(Self {
            gps_ms,
            gps_week: gps_time::gps_week(gps_ms),
            ms_of_week: gps_time::ms_of_week(gps_ms),
            parts: gps_time::separate(gps_ms),
            unix_ms,
            leap_seconds,
            in_leap_second,
            bdt_ms: gps_time::gps_to_bdt(gps_ms),
            bds_week: gps_time::bds_week(gps_ms),
            glo_ms_of_day: gps_time::gps_to_glo_ms(gps_ms),
            glo_day_of_week: gps_time::gps_to_glo_dow(gps_ms),
            mjd: gps_time::mjd(gps_ms),
            calendar: rendering.render(&datetime)?,
        })
    }
}

impl fmt::Display for TimeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.parts;
        writeln!(f, "Calendar:        {}", self.calendar)?;
        writeln!(f, "GPS time:        {} ms", self.gps_ms)?;
        writeln!(f, "GPS week / TOW:  {} / {} ms", self.gps_week, self.ms_of_week)?;
        writeln!(
            f,
            "Day/hh:mm:ss:    {} / {:02}:{:02}:{:02}.{:03}",
            p.day, p.hour, p.min, p.sec, p.ms
        )?;
        writeln!(f, "UNIX time:       {} ms", self.unix_ms)?;
        let marker = if self.in_leap_second { " (inside leap second)" } else { "" };
        writeln!(f, "Leap seconds:    {}{}", self.leap_seconds, marker)?;
        writeln!(f, "BDT:             {} ms, week {}", self.bdt_ms, self.bds_week)?;
        writeln!(
            f,
            "GLONASS:         day {} / {} ms of day",
            self.glo_day_of_week, self.glo_ms_of_day
        )?;
        writeln!(f, "MJD:             {}", self.mjd)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LeapRow {
    pub count: usize,
    pub gps_ms: i64,
    pub date: String,
}

pub fn leap_table() -> Result<Vec<LeapRow>> {
    gps_time::GPST_LEAP_EPOCHS
        .iter()
        .enumerate()
        .map(|(i, epoch)| {
            let day = gps_time::gps_to_datetime(*epoch)?;
            Ok(LeapRow {
                count: i + 1,
                gps_ms: *epoch,
                date: day.format("YYYY-MM-DD 23:59:60"),
            })
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SystemRow {
    pub system: SatSystem,
    pub code: char,
    pub name: &'static str,
    pub min_id: i32,
    pub max_id: i32,
    pub num_sats: u32,
}

pub fn system_table() -> Vec<SystemRow> {
    SatSystem::ALL
        .into_iter()
        .map(|system| SystemRow {
            system,
            code: system.char_code(),
            name: system.three_letter_name(),
            min_id: system.min_id(),
            max_id: system.max_id(),
            num_sats: system.num_sats(),
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct SignalRow {
    pub signal: RawSignal,
    pub system: SatSystem,
    pub rinex: String,
    pub band_index: usize,
    pub frequency_hz: f64,
    pub frequency_step_hz: i64,
    pub wavelength_m: f64,
    pub code: Option<&'static str>,
}

pub fn signal_table(systems: &BTreeSet<SatSystem>) -> Vec<SignalRow> {
    RawSignal::all()
        .filter(|s| systems.contains(&s.system()))
        .map(|signal| SignalRow {
            signal,
            system: signal.system(),
            rinex: signal.rinex_code(),
            band_index: signal.band_index(),
            frequency_hz: signal.frequency(0),
            frequency_step_hz: signal.frequency_step(),
            wavelength_m: signal.wavelength(0),
            code: if signal.is_p_code() {
                Some("P")
            } else if signal.is_ca_code() {
                Some("C/A")
            } else {
                None
            },
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct GloChannelReport {
    pub slot: u32,
    pub channel: i8,
    pub l1_hz: i64,
    pub l2_hz: i64,
    pub l1_wavelength_m: f64,
    pub l2_wavelength_m: f64,
}

pub fn glo_channel(slot: u32) -> Result<GloChannelReport> {
    let channel = glonass::freq_channel(slot).ok_or_else(|| GnssError::UnknownIdentifierError {
        kind: "GLONASS slot",
        value: slot.to_string(),
    })?;
    let ch = channel as i32;
    Ok(GloChannelReport {
        slot,
        channel,
        l1_hz: constants::glo_freq_l1(ch),
        l2_hz: constants::glo_freq_l2(ch),
        l1_wavelength_m: constants::glo_wave_l1(ch),
        l2_wavelength_m: constants::glo_wave_l2(ch),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc_rendering() -> Rendering {
        Rendering {
            pattern: "YYYY-MM-DD HH:mm:ss.ccc".to_string(),
            offset_hours: 0,
            offset_minutes: 0,
        }
    }

    #[test]
    fn test_time_report_at_gps_epoch() {
        let report = TimeReport::build(0, &utc_rendering()).unwrap();
        assert_eq!(report.calendar, "1980-01-06 00:00:00.000");
        assert_eq!(report.unix_ms, gps_time::GPS_UNIX_DIFF);
        assert_eq!(report.leap_seconds, 0);
        assert_eq!(report.mjd, 44_244);
        assert!(!report.in_leap_second);
        assert!(report.to_string().contains("MJD:             44244"));
    }

    #[test]
    fn test_time_report_inside_leap_second() {
        let epoch = gps_time::GPST_LEAP_EPOCHS[17];
        let report = TimeReport::build(epoch + 500, &utc_rendering()).unwrap();
        assert!(report.in_leap_second);
        assert_eq!(report.leap_seconds, 18);
    }

    #[test]
    fn test_leap_table_dates() {
        let table = leap_table().unwrap();
        assert_eq!(table.len(), 18);
        assert_eq!(table[0].date, "1981-06-30 23:59:60");
        assert_eq!(table[17].date, "2016-12-31 23:59:60");
    }

    #[test]
    fn test_signal_table_filters_systems() {
        let systems = SatSystem::from_one_char_string("R");
        let table = signal_table(&systems);
        assert_eq!(table.len(), 5);
        assert!(table.iter().all(|row| row.system == SatSystem::Glonass));
        assert_eq!(table[0].frequency_step_hz, constants::GLO_L1_FREQ_STEP);
    }

    #[test]
    fn test_glo_channel() {
        let report = glo_channel(10).unwrap();
        assert_eq!(report.channel, -7);
        assert_eq!(report.l1_hz, constants::GLO_L1_FREQUENCY_MIN);
        assert!(glo_channel(25).is_err());
    }

    #[test]
    fn test_time_scale_to_gps() {
        assert_eq!(TimeScale::Gps.to_gps(42).unwrap(), 42);
        assert_eq!(TimeScale::Bdt.to_gps(0).unwrap(), 14_000);
        assert_eq!(TimeScale::Unix.to_gps(gps_time::GPS_UNIX_DIFF).unwrap(), 0);
    }

    #[test]
    fn test_extreme_times_are_errors() {
        for gps_ms in [i64::MAX, i64::MIN] {
            let err = TimeReport::build(gps_ms, &utc_rendering()).unwrap_err();
            assert!(matches!(err, GnssError::InvalidDateError { .. }));
        }
        assert!(TimeScale::Unix.to_gps(i64::MIN).is_err());
        assert!(TimeScale::Bdt.to_gps(i64::MAX).is_err());
        assert_eq!(TimeScale::Gps.to_gps(i64::MAX).unwrap(), i64::MAX);
    }

    #[test]
    fn test_rendering_offsets_are_validated() {
        let mut rendering = utc_rendering();
        rendering.offset_hours = 20;
        let err = TimeReport::build(0, &rendering).unwrap_err();
        assert!(matches!(err, GnssError::InvalidConfigValueError { .. }));

        rendering.offset_hours = -14;
        rendering.offset_minutes = -60;
        assert!(rendering.validate().is_err());

        rendering.offset_minutes = -59;
        assert!(TimeReport::build(0, &rendering).is_ok());
    }
}
