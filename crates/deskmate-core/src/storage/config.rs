//! TOML-based application configuration.
//!
//! Stores the default countdown length and the Pomodoro durations.
//! Configuration is stored at `~/.config/deskmate/config.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::timer::PomodoroDurations;

/// Plain countdown configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Minutes used when a countdown is started without an explicit value.
    #[serde(default = "default_timer_minutes")]
    pub default_minutes: u64,
}

/// Pomodoro configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PomodoroConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_break_minutes")]
    pub break_minutes: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/deskmate/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub pomodoro: PomodoroConfig,
}

impl Config {
    /// Load from the default location, falling back to defaults when the
    /// file is missing or malformed.
    pub fn load() -> Self {
        match data_dir() {
            Ok(dir) => Self::load_from(&dir.join("config.toml")),
            Err(_) => Self::default(),
        }
    }

    /// Load from an explicit path (tests point this at a temp dir).
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&data_dir()?.join("config.toml"))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Configured Pomodoro durations in seconds.
    pub fn durations(&self) -> PomodoroDurations {
        PomodoroDurations {
            work_secs: self.pomodoro.work_minutes.saturating_mul(60),
            break_secs: self.pomodoro.break_minutes.saturating_mul(60),
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_minutes: default_timer_minutes(),
        }
    }
}

impl Default for PomodoroConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            break_minutes: default_break_minutes(),
        }
    }
}

fn default_timer_minutes() -> u64 {
    10
}

fn default_work_minutes() -> u64 {
    25
}

fn default_break_minutes() -> u64 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_split() {
        let config = Config::default();
        assert_eq!(config.timer.default_minutes, 10);
        assert_eq!(config.durations().work_secs, 25 * 60);
        assert_eq!(config.durations().break_secs, 5 * 60);
    }

    #[test]
    fn absurd_minute_values_saturate_instead_of_overflowing() {
        let mut config = Config::default();
        config.pomodoro.work_minutes = u64::MAX;
        config.pomodoro.break_minutes = u64::MAX;
        let durations = config.durations();
        assert_eq!(durations.work_secs, u64::MAX);
        assert_eq!(durations.break_secs, u64::MAX);
    }

    #[test]
    fn round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.pomodoro.work_minutes = 50;
        config.timer.default_minutes = 15;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.pomodoro.work_minutes, 50);
        assert_eq!(loaded.pomodoro.break_minutes, 5);
        assert_eq!(loaded.timer.default_minutes, 15);
    }

    #[test]
    fn missing_or_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = Config::load_from(&dir.path().join("nope.toml"));
        assert_eq!(missing.pomodoro.work_minutes, 25);

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "not [valid toml").unwrap();
        let malformed = Config::load_from(&path);
        assert_eq!(malformed.pomodoro.break_minutes, 5);
    }
}
