//! Logger initialisation.
//!
//! Non-error messages go to stdout and errors/warnings to stderr, coloured
//! when the stream is a terminal.  When a log directory is given, plain-text
//! copies are written to `usim2asim_info.log` and `usim2asim_error.log`.

use std::env;
use std::fmt::{Arguments, Display};
use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;

use anyhow::{bail, Result};
use chrono::Local;
use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record};

pub use ua_pipeline::DEFAULT_LOG_LEVEL;

/// Overrides the configured level when set.
pub const LOG_LEVEL_ENV: &str = "USIM2ASIM_LOG_LEVEL";

const LOG_INFO_FILE_NAME: &str = "usim2asim_info.log";
const LOG_ERROR_FILE_NAME: &str = "usim2asim_error.log";

/// `off`, `error`, `warn`, `info`, `debug` or `trace`, in any case.
pub fn parse_level(level: &str) -> Result<LevelFilter> {
    Ok(match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        unknown => bail!("Unknown log level: {unknown}"),
    })
}

/// The level to use: the environment variable, else the configured level,
/// else [`DEFAULT_LOG_LEVEL`].
pub fn resolve_level(from_env: Option<String>, from_config: Option<&str>) -> Result<LevelFilter> {
    let level = from_env.unwrap_or_else(|| from_config.unwrap_or(DEFAULT_LOG_LEVEL).to_owned());
    parse_level(&level)
}

/// Install the global logger.  Fails if a logger is already installed.
pub fn init(level_from_config: Option<&str>, log_dir: Option<&Path>) -> Result<()> {
    let log_level = resolve_level(env::var(LOG_LEVEL_ENV).ok(), level_from_config)?;

    let colours = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Blue)
        .trace(Color::Magenta);
    let use_colour_stdout = std::io::stdout().is_terminal();
    let use_colour_stderr = std::io::stderr().is_terminal();

    let mut dispatch = Dispatch::new()
        .chain(
            Dispatch::new()
                .filter(|metadata| metadata.level() > LevelFilter::Warn)
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stdout, &colours);
                })
                .level(log_level)
                .chain(std::io::stdout()),
        )
        .chain(
            Dispatch::new()
                .format(move |out, message, record| {
                    write_log_colour(out, message, record, use_colour_stderr, &colours);
                })
                .level(log_level.min(LevelFilter::Warn))
                .chain(std::io::stderr()),
        );

    if let Some(dir) = log_dir {
        let new_log_file = |name| {
            OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(dir.join(name))
        };
        dispatch = dispatch
            .chain(
                Dispatch::new()
                    .filter(|metadata| metadata.level() > LevelFilter::Warn)
                    .format(write_log_plain)
                    .level(log_level.max(LevelFilter::Info))
                    .chain(new_log_file(LOG_INFO_FILE_NAME)?),
            )
            .chain(
                Dispatch::new()
                    .format(write_log_plain)
                    .level(LevelFilter::Warn)
                    .chain(new_log_file(LOG_ERROR_FILE_NAME)?),
            );
    }

    dispatch.apply()?;
    Ok(())
}

fn write_log<T: Display>(out: FormatCallback, level: T, target: &str, message: &Arguments) {
    let timestamp = Local::now().format("%H:%M:%S");
    out.finish(format_args!("[{timestamp} {level} {target}] {message}"));
}

fn write_log_plain(out: FormatCallback, message: &Arguments, record: &Record) {
    write_log(out, record.level(), record.target(), message);
}

fn write_log_colour(
    out: FormatCallback,
    message: &Arguments,
    record: &Record,
    use_colour: bool,
    colours: &ColoredLevelConfig,
) {
    if use_colour {
        write_log(out, colours.color(record.level()), record.target(), message);
    } else {
        write_log_plain(out, message, record);
    }
}
