use crate::level::Level;
use crate::pack::Pack;
use chrono::{Local, SecondsFormat, Utc};
use lazy_static::lazy_static;

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

lazy_static! {
    // Read once, the first time a logger is configured from the environment.
    static ref ENV_LOG_LEVEL: Option<String> = std::env::var(LOG_LEVEL_ENV).ok();
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2024-01-01T12:00:00.000Z`
    Utc,
    /// Same precision as `Utc`, in local time with its offset.
    Local,
    /// For tests.
    Redacted,
}

impl TimestampFormat {
    pub fn now(self) -> String {
        match self {
            TimestampFormat::Utc => Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Local => Local::now().to_rfc3339_opts(SecondsFormat::Millis, false),
            TimestampFormat::Redacted => "<REDACTED>".to_string(),
        }
    }
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::Utc
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub level: Level,
    pub pack: Pack,
    pub timestamp_format: TimestampFormat,
}

impl Config {
    /// Threshold from `LOG_LEVEL`, regular pack, UTC timestamps.
    pub fn from_env() -> Self {
        Self {
            level: parse_level(ENV_LOG_LEVEL.as_deref()),
            ..Self::default()
        }
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn pack(mut self, pack: Pack) -> Self {
        self.pack = pack;
        self
    }

    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: Level::Log,
            pack: Pack::regular(),
            timestamp_format: TimestampFormat::default(),
        }
    }
}

/// Unset means everything is logged, anything unrecognized means `log`.
pub fn parse_level(value: Option<&str>) -> Level {
    match value {
        None => Level::Trace,
        Some(value) => value.parse().unwrap_or(Level::Log),
    }
}
