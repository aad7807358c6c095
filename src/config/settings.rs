//! Configuration settings for studyfocus.
//!
//! Settings are loaded from `~/.studyfocus/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::StudyError;
use crate::timer::{
    BreakPolicy, TimerState, DEFAULT_BREAK_MINUTES, DEFAULT_FOCUS_MINUTES, MAX_COUNTDOWN_SECS,
};
use crate::timer::policy::{DEFAULT_LONG_BREAK_INTERVAL, DEFAULT_LONG_BREAK_MINUTES};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Timer settings.
    pub timer: TimerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply this setting to the `colored` crate.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Timer settings.
///
/// The durations seed a timer that has never been saved; afterwards the
/// saved timer's own durations are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    /// Focus interval length in minutes.
    #[serde(default = "default_focus_minutes")]
    pub focus_minutes: u32,
    /// Short break length in minutes.
    #[serde(default = "default_short_break")]
    pub short_break_minutes: u32,
    /// Long break length in minutes.
    #[serde(default = "default_long_break")]
    pub long_break_minutes: u32,
    /// Completed focus intervals per long break.
    #[serde(default = "default_long_break_interval")]
    pub long_break_interval: u32,
    /// Start the break as soon as a focus interval completes.
    #[serde(default = "default_true")]
    pub auto_start_break: bool,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default log filter when neither `RUST_LOG` nor `-v` is given.
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

const fn default_focus_minutes() -> u32 {
    DEFAULT_FOCUS_MINUTES
}

const fn default_short_break() -> u32 {
    DEFAULT_BREAK_MINUTES
}

const fn default_long_break() -> u32 {
    DEFAULT_LONG_BREAK_MINUTES
}

const fn default_long_break_interval() -> u32 {
    DEFAULT_LONG_BREAK_INTERVAL
}

const fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            focus_minutes: default_focus_minutes(),
            short_break_minutes: default_short_break(),
            long_break_minutes: default_long_break(),
            long_break_interval: default_long_break_interval(),
            auto_start_break: default_true(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl TimerConfig {
    /// Idle timer state used when none has been saved yet.
    #[must_use]
    pub fn fresh_state(&self) -> TimerState {
        TimerState::with_durations(self.focus_minutes, self.short_break_minutes)
    }

    /// Long-break cadence.
    #[must_use]
    pub const fn break_policy(&self) -> BreakPolicy {
        BreakPolicy {
            long_break_minutes: self.long_break_minutes,
            long_break_interval: self.long_break_interval,
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, StudyError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            StudyError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            StudyError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        let max_long_break = MAX_COUNTDOWN_SECS / 60;
        if !(1..=max_long_break).contains(&u64::from(config.timer.long_break_minutes)) {
            return Err(StudyError::Config(format!(
                "timer.long_break_minutes must be between 1 and {max_long_break} in {}",
                path.display()
            )));
        }

        Ok(config)
    }
}
