pub mod angles;
pub mod datetime;
pub mod glonass;
pub mod gps_time;
pub mod pattern;

pub use crate::utils::error::Result;
pub use datetime::Datetime;
pub use gps_time::TimeParts;
