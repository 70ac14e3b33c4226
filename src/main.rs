use anyhow::Context;
use clap::Parser;
use gnss_kit::app::{report, Rendering, TimeReport};
use gnss_kit::config::Command;
use gnss_kit::utils::error::ErrorSeverity;
use gnss_kit::utils::{logger, validation::Validate};
use gnss_kit::{gps_time, CliConfig, Datetime, GnssError, SatSystem, Settings};
use serde::Serialize;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    let settings = match load_settings(&config) {
        Ok(settings) => settings,
        Err(e) => exit_with(e),
    };

    if let Err(e) = run(&config, &settings) {
        match e.downcast::<GnssError>() {
            Ok(e) => exit_with(e),
            Err(other) => return Err(other),
        }
    }

    Ok(())
}

fn load_settings(config: &CliConfig) -> Result<Settings, GnssError> {
    let settings = match &config.config {
        Some(path) => {
            tracing::info!("Loading settings from: {}", path);
            Settings::from_file(path)?
        }
        None => Settings::default(),
    };
    settings.validate()?;
    Ok(settings)
}

fn exit_with(e: GnssError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn run(config: &CliConfig, settings: &Settings) -> anyhow::Result<()> {
    let json = config.json || settings.json();
    let (default_hours, default_minutes) = settings.offset();

    match &config.command {
        Command::Time {
            value,
            scale,
            offset_hours,
            offset_minutes,
        } => {
            let rendering = Rendering {
                pattern: settings.pattern().to_string(),
                offset_hours: offset_hours.unwrap_or(default_hours),
                offset_minutes: offset_minutes.unwrap_or(default_minutes),
            };
            let report = TimeReport::build(scale.to_gps(*value)?, &rendering)?;
            emit(json, &report, TimeReport::to_string)?;
        }
        Command::Now => {
            let rendering = Rendering {
                pattern: settings.pattern().to_string(),
                offset_hours: default_hours,
                offset_minutes: default_minutes,
            };
            let report = TimeReport::build(gps_time::gps_now(), &rendering)?;
            emit(json, &report, TimeReport::to_string)?;
        }
        Command::Leaps => {
            let table = report::leap_table()?;
            emit(json, &table, |rows| {
                rows.iter()
                    .map(|r| format!("{:>2}  {}  {:>14} ms\n", r.count, r.date, r.gps_ms))
                    .collect()
            })?;
        }
        Command::Systems => {
            let table = report::system_table();
            emit(json, &table, |rows| {
                rows.iter()
                    .map(|r| {
                        format!(
                            "{}  {}  ids {:>3}..{:<3}  {:>2} sats\n",
                            r.code, r.name, r.min_id, r.max_id, r.num_sats
                        )
                    })
                    .collect()
            })?;
        }
        Command::Signals { systems } => {
            let codes = systems.as_deref().unwrap_or(&settings.filter.systems);
            gnss_kit::utils::validation::validate_system_codes("--systems", codes)?;
            let table = report::signal_table(&SatSystem::from_one_char_string(codes));
            emit(json, &table, |rows| {
                rows.iter()
                    .map(|r| {
                        format!(
                            "{:<22} {}  {}  {:>14.0} Hz  {:.6} m  {}\n",
                            r.signal.to_string(),
                            r.system,
                            r.rinex,
                            r.frequency_hz,
                            r.wavelength_m,
                            r.code.unwrap_or("-")
                        )
                    })
                    .collect()
            })?;
        }
        Command::GloChannel { slot } => {
            let channel = report::glo_channel(*slot)?;
            emit(json, &channel, |c| {
                format!(
                    "slot {} -> channel {:+}  L1 {} Hz  L2 {} Hz\n",
                    c.slot, c.channel, c.l1_hz, c.l2_hz
                )
            })?;
        }
        Command::Parse { pattern, text } => {
            let dt = Datetime::parse(pattern, text)?;
            let gps_ms = gps_time::unix_to_gps(dt.unix_millis());
            let rendering = Rendering {
                pattern: settings.pattern().to_string(),
                offset_hours: default_hours,
                offset_minutes: default_minutes,
            };
            let report = TimeReport::build(gps_ms, &rendering)?;
            emit(json, &report, TimeReport::to_string)?;
        }
    }

    Ok(())
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl Fn(&T) -> String) -> anyhow::Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(GnssError::from)
            .context("Failed to render JSON output")?;
        println!("{}", rendered);
    } else {
        print!("{}", text(value));
    }
    Ok(())
}
