//! Physical constants and carrier frequencies. Frequencies are in Hz,
//! wavelengths in metres.

/// Earth gravitational constant (GPS) [m^3/s^2]
pub const MU_GPS: f64 = 3.986005e14;
/// Earth angular velocity (GPS) [rad/s]
pub const OMEGA_DOT_E: f64 = 7.2921151467e-5;
/// Speed of light [m/s]
pub const C: f64 = 299_792_458.0;
/// Relativistic clock correction constant -2*sqrt(mu)/c^2 [s/m^(1/2)]
pub const F: f64 = -4.442807633393060e-10;

/// Earth gravitational constant (GLONASS) [m^3/s^2]
pub const MU_GLO: f64 = 3.986004418e14;
/// 2nd zonal harmonic of geopotential (GLONASS)
pub const C_20: f64 = 1.08262575e-3;
/// Lunar gravitational constant (GLONASS) [m^3/s^2]
pub const MU_L: f64 = 4.902835e3;
/// Solar gravitational constant (GLONASS) [m^3/s^2]
pub const MU_S: f64 = 1.325263e11;
/// Earth equatorial radius (GLONASS) [m]
pub const A_E: f64 = 6.378136e6;
/// Earth angular velocity (GLONASS) [rad/s]
pub const OMEGA_EARTH: f64 = 7.292115e-5;

pub const GPS_L1_FREQUENCY: i64 = 1_575_420_000;
pub const GPS_L2_FREQUENCY: i64 = 1_227_600_000;
pub const GPS_L5_FREQUENCY: i64 = 1_176_450_000;

/// GLONASS L1 frequency of channel 0
pub const GLO_L1_FREQUENCY_0: i64 = 1_602_000_000;
pub const GLO_L1_FREQ_STEP: i64 = 562_500;
pub const GLO_L1_FREQUENCY_MIN: i64 = GLO_L1_FREQUENCY_0 - 7 * GLO_L1_FREQ_STEP;
/// GLONASS L2 frequency of channel 0
pub const GLO_L2_FREQUENCY_0: i64 = 1_246_000_000;
pub const GLO_L2_FREQ_STEP: i64 = 437_500;
pub const GLO_L2_FREQUENCY_MIN: i64 = GLO_L2_FREQUENCY_0 - 7 * GLO_L2_FREQ_STEP;
pub const GLO_L3_FREQUENCY: i64 = 1_202_025_000;

pub const GAL_E1_FREQUENCY: i64 = 1_575_420_000;
pub const GAL_E2_FREQUENCY: i64 = 1_278_750_000;
pub const GAL_E5_FREQUENCY: i64 = 1_191_795_000;
pub const GAL_E5A_FREQUENCY: i64 = 1_176_450_000;
pub const GAL_E5B_FREQUENCY: i64 = 1_207_140_000;

pub const QZSS_L1_FREQUENCY: i64 = 1_575_420_000;
pub const QZSS_L2_FREQUENCY: i64 = 1_227_600_000;
pub const QZSS_L5_FREQUENCY: i64 = 1_176_450_000;
pub const QZSS_LEX_FREQUENCY: i64 = 1_278_750_000;

pub const BDS_B1_FREQUENCY: i64 = 1_561_098_000;
pub const BDS_B2_FREQUENCY: i64 = 1_207_140_000;
pub const BDS_B3_FREQUENCY: i64 = 1_268_520_000;

pub const SBAS_L1_FREQUENCY: i64 = 1_575_420_000;
pub const SBAS_L5_FREQUENCY: i64 = 1_176_450_000;

pub const GPS_L1_WAVELENGTH: f64 = C / GPS_L1_FREQUENCY as f64;
pub const GPS_L2_WAVELENGTH: f64 = C / GPS_L2_FREQUENCY as f64;
pub const GPS_L5_WAVELENGTH: f64 = C / GPS_L5_FREQUENCY as f64;
pub const GAL_E1_WAVELENGTH: f64 = C / GAL_E1_FREQUENCY as f64;
pub const GAL_E2_WAVELENGTH: f64 = C / GAL_E2_FREQUENCY as f64;
pub const GAL_E5_WAVELENGTH: f64 = C / GAL_E5_FREQUENCY as f64;
pub const GAL_E5A_WAVELENGTH: f64 = C / GAL_E5A_FREQUENCY as f64;
pub const GAL_E5B_WAVELENGTH: f64 = C / GAL_E5B_FREQUENCY as f64;
pub const QZSS_L1_WAVELENGTH: f64 = C / QZSS_L1_FREQUENCY as f64;
pub const QZSS_L2_WAVELENGTH: f64 = C / QZSS_L2_FREQUENCY as f64;
pub const QZSS_L5_WAVELENGTH: f64 = C / QZSS_L5_FREQUENCY as f64;
pub const QZSS_LEX_WAVELENGTH: f64 = C / QZSS_LEX_FREQUENCY as f64;
pub const BDS_B1_WAVELENGTH: f64 = C / BDS_B1_FREQUENCY as f64;
pub const BDS_B2_WAVELENGTH: f64 = C / BDS_B2_FREQUENCY as f64;
pub const BDS_B3_WAVELENGTH: f64 = C / BDS_B3_FREQUENCY as f64;

/// GLONASS L1 frequency for a relative channel number (-7..+6).
pub const fn glo_freq_l1(channel: i32) -> i64 {
    GLO_L1_FREQUENCY_0 + channel as i64 * GLO_L1_FREQ_STEP
}

/// GLONASS L2 frequency for a relative channel number (-7..+6).
pub const fn glo_freq_l2(channel: i32) -> i64 {
    GLO_L2_FREQUENCY_0 + channel as i64 * GLO_L2_FREQ_STEP
}

pub fn glo_wave_l1(channel: i32) -> f64 {
    C / glo_freq_l1(channel) as f64
}

pub fn glo_wave_l2(channel: i32) -> f64 {
    C / glo_freq_l2(channel) as f64
}
