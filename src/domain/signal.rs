use crate::domain::constants::*;
use crate::domain::sat_system::SatSystem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nominal band numbers in band-index order; 0 is the "unknown band" slot.
pub const BANDS: [u8; 7] = [1, 2, 5, 6, 7, 8, 0];

#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RawSignal {
    GPS_L1_CA,
    GPS_L1C_DP,
    GPS_L1_PY,
    GPS_L2_C,
    GPS_L2C_M,
    GPS_L2C_L,
    GPS_L2C_ML,
    GPS_L2_PY_DIRECT,
    GPS_L2_PY_CROSS,
    GPS_L2_PY_CORRELATED,
    GPS_L5_Q,
    GPS_L5_IQ,
    GLO_L1_CA,
    GLO_L1_P,
    GLO_L2_CA,
    GLO_L2_P,
    GLO_L3_IQ,
    GAL_E1A,
    GAL_E1B,
    GAL_E1C,
    GAL_E1BC,
    GAL_E1ABC,
    GAL_E5A_Q,
    GAL_E5A_IQ,
    GAL_E5B_Q,
    GAL_E5B_I,
    GAL_E5B_IQ,
    GAL_ALTBOC_Q,
    QZSS_L1CA,
    QZSS_L1C_DP,
    QZSS_L1SAIF,
    QZSS_L2C_M,
    QZSS_L2C_L,
    QZSS_L2C_ML,
    QZSS_L5Q,
    QZSS_L5_IQ,
    SBAS_L1CA,
    SBAS_L5I,
    BDS_B1D1,
    BDS_B2D1,
    BDS_B1D2,
    BDS_B2D2,
    BDS_B3D1,
    BDS_B3D2,
    OMNISTAR,
}

#[derive(Debug, Clone, Copy)]
struct SignalInfo {
    system: SatSystem,
    band: u8,
    attr: char,
    frequency: i64,
    frequency_step: i64,
}

const fn sig(system: SatSystem, band: u8, attr: char, frequency: i64) -> SignalInfo {
    SignalInfo {
        system,
        band,
        attr,
        frequency,
        frequency_step: 0,
    }
}

const fn fdma(band: u8, attr: char, frequency: i64, frequency_step: i64) -> SignalInfo {
    SignalInfo {
        system: SatSystem::Glonass,
        band,
        attr,
        frequency,
        frequency_step,
    }
}

use RawSignal::*;
use SatSystem::*;

// Indexed by discriminant; order must follow the enum declaration.
const TABLE: [(RawSignal, SignalInfo); 45] = [
    (GPS_L1_CA, sig(Gps, 1, 'C', GPS_L1_FREQUENCY)),
    (GPS_L1C_DP, sig(Gps, 1, 'X', GPS_L1_FREQUENCY)),
    (GPS_L1_PY, sig(Gps, 1, 'P', GPS_L1_FREQUENCY)),
    (GPS_L2_C, sig(Gps, 2, 'C', GPS_L2_FREQUENCY)),
    (GPS_L2C_M, sig(Gps, 2, 'S', GPS_L2_FREQUENCY)),
    (GPS_L2C_L, sig(Gps, 2, 'L', GPS_L2_FREQUENCY)),
    (GPS_L2C_ML, sig(Gps, 2, 'X', GPS_L2_FREQUENCY)),
    (GPS_L2_PY_DIRECT, sig(Gps, 2, 'P', GPS_L2_FREQUENCY)),
    (GPS_L2_PY_CROSS, sig(Gps, 2, 'W', GPS_L2_FREQUENCY)),
    (GPS_L2_PY_CORRELATED, sig(Gps, 2, 'W', GPS_L2_FREQUENCY)),
    (GPS_L5_Q, sig(Gps, 5, 'Q', GPS_L5_FREQUENCY)),
    (GPS_L5_IQ, sig(Gps, 5, 'X', GPS_L5_FREQUENCY)),
    (GLO_L1_CA, fdma(1, 'C', GLO_L1_FREQUENCY_0, GLO_L1_FREQ_STEP)),
    (GLO_L1_P, fdma(1, 'P', GLO_L1_FREQUENCY_0, GLO_L1_FREQ_STEP)),
    (GLO_L2_CA, fdma(2, 'C', GLO_L2_FREQUENCY_0, GLO_L2_FREQ_STEP)),
    (GLO_L2_P, fdma(2, 'P', GLO_L2_FREQUENCY_0, GLO_L2_FREQ_STEP)),
    (GLO_L3_IQ, sig(Glonass, 3, 'X', GLO_L3_FREQUENCY)),
    (GAL_E1A, sig(Galileo, 1, 'A', GAL_E1_FREQUENCY)),
    (GAL_E1B, sig(Galileo, 1, 'B', GAL_E1_FREQUENCY)),
    (GAL_E1C, sig(Galileo, 1, 'C', GAL_E1_FREQUENCY)),
    (GAL_E1BC, sig(Galileo, 1, 'X', GAL_E1_FREQUENCY)),
    (GAL_E1ABC, sig(Galileo, 1, 'Z', GAL_E1_FREQUENCY)),
    (GAL_E5A_Q, sig(Galileo, 5, 'Q', GAL_E5A_FREQUENCY)),
    (GAL_E5A_IQ, sig(Galileo, 5, 'X', GAL_E5A_FREQUENCY)),
    (GAL_E5B_Q, sig(Galileo, 7, 'Q', GAL_E5B_FREQUENCY)),
    (GAL_E5B_I, sig(Galileo, 7, 'I', GAL_E5B_FREQUENCY)),
    (GAL_E5B_IQ, sig(Galileo, 7, 'X', GAL_E5B_FREQUENCY)),
    (GAL_ALTBOC_Q, sig(Galileo, 8, 'Q', GAL_E5_FREQUENCY)),
    (QZSS_L1CA, sig(Qzss, 1, 'C', QZSS_L1_FREQUENCY)),
    (QZSS_L1C_DP, sig(Qzss, 1, 'X', QZSS_L1_FREQUENCY)),
    (QZSS_L1SAIF, sig(Qzss, 1, 'Z', QZSS_L1_FREQUENCY)),
    (QZSS_L2C_M, sig(Qzss, 2, 'S', QZSS_L2_FREQUENCY)),
    (QZSS_L2C_L, sig(Qzss, 2, 'L', QZSS_L2_FREQUENCY)),
    (QZSS_L2C_ML, sig(Qzss, 2, 'X', QZSS_L2_FREQUENCY)),
    (QZSS_L5Q, sig(Qzss, 5, 'Q', QZSS_L5_FREQUENCY)),
    (QZSS_L5_IQ, sig(Qzss, 5, 'X', QZSS_L5_FREQUENCY)),
    (SBAS_L1CA, sig(Sbas, 1, 'C', SBAS_L1_FREQUENCY)),
    (SBAS_L5I, sig(Sbas, 5, 'I', SBAS_L5_FREQUENCY)),
    (BDS_B1D1, sig(Bds, 1, 'I', BDS_B1_FREQUENCY)),
    (BDS_B2D1, sig(Bds, 7, 'I', BDS_B2_FREQUENCY)),
    (BDS_B1D2, sig(Bds, 1, 'I', BDS_B1_FREQUENCY)),
    (BDS_B2D2, sig(Bds, 7, 'I', BDS_B2_FREQUENCY)),
    (BDS_B3D1, sig(Bds, 6, 'I', BDS_B3_FREQUENCY)),
    (BDS_B3D2, sig(Bds, 6, 'I', BDS_B3_FREQUENCY)),
    (OMNISTAR, sig(Sbas, 1, 'C', SBAS_L1_FREQUENCY)),
];

impl RawSignal {
    pub fn all() -> impl Iterator<Item = RawSignal> {
        TABLE.iter().map(|(signal, _)| *signal)
    }

    pub fn for_index(index: usize) -> Option<RawSignal> {
        TABLE.get(index).map(|(signal, _)| *signal)
    }

    fn info(self) -> SignalInfo {
        TABLE[self as usize].1
    }

    pub fn system(self) -> SatSystem {
        self.info().system
    }

    /// Observation attribute letter as defined by RINEX 3.
    pub fn attr(self) -> char {
        self.info().attr
    }

    pub fn nominal_band(self) -> u8 {
        self.info().band
    }

    /// 1-based position of the nominal band in [`BANDS`]. Bands outside the
    /// list (GLONASS L3) and the unknown band both map to the last slot.
    pub fn band_index(self) -> usize {
        let band = self.nominal_band();
        BANDS[..BANDS.len() - 1]
            .iter()
            .position(|b| *b == band)
            .map_or(BANDS.len(), |i| i + 1)
    }

    /// Carrier frequency for the base channel [Hz].
    pub fn base_frequency(self) -> i64 {
        self.info().frequency
    }

    /// Per-channel frequency step; non-zero only for GLONASS FDMA signals.
    pub fn frequency_step(self) -> i64 {
        self.info().frequency_step
    }

    pub fn is_fdma(self) -> bool {
        self.frequency_step() != 0
    }

    pub fn frequency(self, channel: i32) -> f64 {
        let info = self.info();
        (info.frequency + channel as i64 * info.frequency_step) as f64
    }

    pub fn wavelength(self, channel: i32) -> f64 {
        C / self.frequency(channel)
    }

    pub fn is_p_code(self) -> bool {
        matches!(
            self,
            GPS_L1_PY | GPS_L2_PY_DIRECT | GPS_L2_PY_CROSS | GPS_L2_PY_CORRELATED | GLO_L1_P | GLO_L2_P
        )
    }

    pub fn is_ca_code(self) -> bool {
        matches!(
            self,
            GPS_L1_CA
                | GPS_L2_C
                | GPS_L2C_L
                | GPS_L2C_M
                | GPS_L2C_ML
                | GLO_L1_CA
                | GLO_L2_CA
                | GAL_E1A
                | GAL_E1B
                | GAL_E1C
                | GAL_E1BC
                | GAL_E1ABC
                | SBAS_L1CA
        )
    }

    /// Band digit plus attribute, e.g. `1C`; prefix with `C`/`L`/`D`/`S`
    /// to get a RINEX 3 observation code.
    pub fn rinex_code(self) -> String {
        format!("{}{}", self.nominal_band(), self.attr())
    }

    /// First signal in declaration order matching a RINEX triple.
    pub fn find(system: SatSystem, band: u8, attr: char) -> Option<RawSignal> {
        Self::all().find(|s| s.system() == system && s.nominal_band() == band && s.attr() == attr)
    }
}

impl fmt::Display for RawSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}
