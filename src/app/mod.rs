pub mod report;

pub use report::{Rendering, TimeReport, TimeScale};
