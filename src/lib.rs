pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::Settings;

pub use crate::core::{datetime::Datetime, gps_time};
pub use domain::{RawSignal, SatSystem};
pub use utils::error::{GnssError, Result};
