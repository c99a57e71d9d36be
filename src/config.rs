//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::{
    state::Settings,
    validation::{validate, SettingField, ValidationError},
};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "interval-timer")]
#[command(about = "A state-managed HTTP server driving workout/rest interval cycles")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Workout duration in seconds
    #[arg(short, long, default_value_t = Settings::DEFAULT_WORKOUT_SECONDS as i64, allow_negative_numbers = true)]
    pub workout: i64,

    /// Rest duration in seconds
    #[arg(short, long, default_value_t = Settings::DEFAULT_REST_SECONDS as i64, allow_negative_numbers = true)]
    pub rest: i64,

    /// Number of repetitions
    #[arg(short = 'n', long, default_value_t = Settings::DEFAULT_REPETITIONS as i64, allow_negative_numbers = true)]
    pub repetitions: i64,

    /// Do not keep the screen awake while running
    #[arg(long)]
    pub no_wake_lock: bool,

    /// Seconds between checks that the wake lock is still held
    #[arg(long, default_value = "15")]
    pub wake_check_secs: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial settings, checked against the same domains as user edits
    pub fn settings(&self) -> Result<Settings, ValidationError> {
        Ok(Settings::new(
            validate(SettingField::WorkoutDuration, self.workout)?,
            validate(SettingField::RestDuration, self.rest)?,
            validate(SettingField::RepetitionCount, self.repetitions)?,
        ))
    }

    /// Interval between wake lock health checks
    pub fn wake_check_interval(&self) -> Duration {
        Duration::from_secs(self.wake_check_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["interval-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.settings().unwrap(), Settings::default());
        assert_eq!(config.log_level(), "info");
        assert!(!config.no_wake_lock);
    }

    #[test]
    fn test_custom_settings() {
        let config = Config::try_parse_from([
            "interval-timer", "-w", "45", "-r", "0", "-n", "3", "--verbose",
        ])
        .unwrap();
        assert_eq!(config.settings().unwrap(), Settings::new(45, 0, 3));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_out_of_range_settings_rejected() {
        let config = Config::try_parse_from(["interval-timer", "--rest", "601"]).unwrap();
        let err = config.settings().unwrap_err();
        assert_eq!(err.field, SettingField::RestDuration);

        let config = Config::try_parse_from(["interval-timer", "--workout", "-5"]).unwrap();
        assert_eq!(config.settings().unwrap_err().field, SettingField::WorkoutDuration);
    }
}
