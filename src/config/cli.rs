use crate::app::TimeScale;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "gnss-kit")]
#[command(about = "GNSS time scale conversions and signal tables")]
pub struct CliConfig {
    /// Path to TOML settings file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show a time in every supported scale
    Time {
        /// Milliseconds on the chosen scale
        #[arg(allow_hyphen_values = true)]
        value: i64,

        #[arg(long, value_enum, default_value = "gps")]
        scale: TimeScale,

        /// Zone offset hours for the calendar rendering
        #[arg(long, allow_hyphen_values = true)]
        offset_hours: Option<i32>,

        /// Zone offset minutes for the calendar rendering
        #[arg(long, allow_hyphen_values = true)]
        offset_minutes: Option<i32>,
    },
    /// Show the current time in every supported scale
    Now,
    /// List known leap seconds
    Leaps,
    /// List satellite systems
    Systems,
    /// List raw signals
    Signals {
        /// RINEX system codes to include, e.g. "GR", or "*" for all
        #[arg(long)]
        systems: Option<String>,
    },
    /// Show the frequency channel of a GLONASS slot
    GloChannel { slot: u32 },
    /// Parse a date-time with a pattern and show it as GPS time
    Parse { pattern: String, text: String },
}
