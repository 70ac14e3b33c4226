// Domain layer: satellite systems, signals and the constants they are built from.

pub mod constants;
pub mod sat_system;
pub mod signal;

pub use sat_system::SatSystem;
pub use signal::RawSignal;
