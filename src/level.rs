use std::fmt;
use std::str::FromStr;

/// Log levels ordered by verbosity. `Error` is always the loudest and
/// `Trace` the chattiest; a logger emits everything up to its threshold.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Hash)]
pub enum Level {
    Error = 1,
    Warn = 2,
    Info = 3,
    Log = 4,
    Trace = 5,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Log,
        Level::Trace,
    ];

    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Log => "log",
            Level::Trace => "trace",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Level::ALL
            .iter()
            .copied()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| anyhow::anyhow!("unrecognized log level `{}`", s))
    }
}

/// Threshold check, fixed when the logger is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelGate {
    threshold: Level,
}

impl LevelGate {
    pub fn new(threshold: Level) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> Level {
        self.threshold
    }

    pub fn allows(&self, level: Level) -> bool {
        self.threshold.rank() >= level.rank()
    }
}
