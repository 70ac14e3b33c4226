use serde::Serialize;

/// Degrees, minutes and seconds of an angle. Components keep the sign of
/// the angle they came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dms {
    pub degrees: i32,
    pub minutes: i32,
    pub seconds: f64,
}

pub fn dms_to_deg(degrees: i32, minutes: i32, seconds: f64) -> f64 {
    degrees as f64 + (minutes as f64 + seconds / 60.0) / 60.0
}

pub fn deg_to_dms(deg: f64) -> Dms {
    let degrees = deg.trunc();
    let rest = (deg - degrees) * 60.0;
    let minutes = rest.trunc();
    Dms {
        degrees: degrees as i32,
        minutes: minutes as i32,
        seconds: (rest - minutes) * 60.0,
    }
}
