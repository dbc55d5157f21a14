//! Runtime configuration.
//!
//! Everything has a default matching the app's observable timings; any field
//! can be overridden through `MOODMATE_*` environment variables or a `.env`
//! file next to the binary.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use validator::Validate;

use crate::error::AppError;

pub const DEFAULT_REPLY_DELAY_MS: u64 = 1500;
pub const DEFAULT_CRISIS_DELAY_MS: u64 = 1000;
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 1000;
pub const DEFAULT_BREATHING_PHASE_MS: u64 = 4000;
pub const DEFAULT_MEDITATION_TICK_MS: u64 = 1000;

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// Bunyan-style JSON lines
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" | "bunyan" => Ok(LogFormat::Json),
            other => Err(AppError::Config(format!("Unknown log format '{}'", other))),
        }
    }
}

/// Configuration for the companion and the timed widgets.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompanionConfig {
    /// Locale code used to pick the response table (e.g. `en`, `hi`, `te`).
    #[validate(length(min = 1))]
    pub locale: String,
    /// Optional JSON file replacing the built-in keyword table.
    pub keywords_path: Option<PathBuf>,
    /// Optional JSON file replacing the built-in response catalog.
    pub responses_path: Option<PathBuf>,
    /// "Thinking" delay before a normal reply is shown.
    #[validate(range(min = 1, max = 60000))]
    pub reply_delay_ms: u64,
    /// "Thinking" delay before the crisis reply is shown.
    #[validate(range(min = 1, max = 60000))]
    pub crisis_delay_ms: u64,
    /// How long a mismatched memory pair stays face up.
    #[validate(range(min = 1, max = 60000))]
    pub mismatch_delay_ms: u64,
    /// Length of each breathing phase.
    #[validate(range(min = 1, max = 60000))]
    pub breathing_phase_ms: u64,
    /// Meditation countdown tick.
    #[validate(range(min = 1, max = 60000))]
    pub meditation_tick_ms: u64,
    /// Seed for every random choice. Unset means OS entropy.
    pub rng_seed: Option<u64>,
    pub log_format: LogFormat,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            keywords_path: None,
            responses_path: None,
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
            crisis_delay_ms: DEFAULT_CRISIS_DELAY_MS,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            breathing_phase_ms: DEFAULT_BREATHING_PHASE_MS,
            meditation_tick_ms: DEFAULT_MEDITATION_TICK_MS,
            rng_seed: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl CompanionConfig {
    /// Build the configuration from `MOODMATE_*` environment variables.
    ///
    /// A `.env` file is loaded first when present. Unset variables keep their
    /// defaults; unparsable ones are reported as [`AppError::Config`].
    pub fn from_env() -> Result<Self, AppError> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {:?}", path);
        }

        let mut config = Self::default();

        if let Some(locale) = read_var("MOODMATE_LOCALE") {
            config.locale = locale;
        }
        config.keywords_path = read_var("MOODMATE_KEYWORDS_PATH").map(PathBuf::from);
        config.responses_path = read_var("MOODMATE_RESPONSES_PATH").map(PathBuf::from);

        if let Some(v) = parse_var("MOODMATE_REPLY_DELAY_MS")? {
            config.reply_delay_ms = v;
        }
        if let Some(v) = parse_var("MOODMATE_CRISIS_DELAY_MS")? {
            config.crisis_delay_ms = v;
        }
        if let Some(v) = parse_var("MOODMATE_MISMATCH_DELAY_MS")? {
            config.mismatch_delay_ms = v;
        }
        if let Some(v) = parse_var("MOODMATE_BREATHING_PHASE_MS")? {
            config.breathing_phase_ms = v;
        }
        if let Some(v) = parse_var("MOODMATE_MEDITATION_TICK_MS")? {
            config.meditation_tick_ms = v;
        }
        config.rng_seed = parse_var("MOODMATE_RNG_SEED")?;
        if let Some(v) = parse_var("MOODMATE_LOG_FORMAT")? {
            config.log_format = v;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn chat_timing(&self) -> ChatTiming {
        ChatTiming {
            reply_delay: Duration::from_millis(self.reply_delay_ms),
            crisis_delay: Duration::from_millis(self.crisis_delay_ms),
        }
    }

    pub fn mismatch_delay(&self) -> Duration {
        Duration::from_millis(self.mismatch_delay_ms)
    }

    pub fn breathing_phase(&self) -> Duration {
        Duration::from_millis(self.breathing_phase_ms)
    }

    pub fn meditation_tick(&self) -> Duration {
        Duration::from_millis(self.meditation_tick_ms)
    }
}

/// Simulated composition time before a bot reply appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatTiming {
    pub reply_delay: Duration,
    pub crisis_delay: Duration,
}

impl Default for ChatTiming {
    fn default() -> Self {
        Self {
            reply_delay: Duration::from_millis(DEFAULT_REPLY_DELAY_MS),
            crisis_delay: Duration::from_millis(DEFAULT_CRISIS_DELAY_MS),
        }
    }
}

fn read_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_var<T>(key: &str) -> Result<Option<T>, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match read_var(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::Config(format!("{} has invalid value '{}': {}", key, raw, e))),
        None => Ok(None),
    }
}
