use crate::level::Level;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEntry {
    pub level: Level,
    pub started_at: Instant,
}

impl TimerEntry {
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

/// Running timers of one logger, keyed by label. Ending a timer removes it.
#[derive(Debug, Default)]
pub struct TimeLabels {
    labels: HashMap<String, TimerEntry>,
}

impl TimeLabels {
    /// Starts (or restarts) `label`.
    pub fn start(&mut self, label: &str, level: Level) -> TimerEntry {
        let entry = TimerEntry {
            level,
            started_at: Instant::now(),
        };
        self.labels.insert(label.to_owned(), entry);
        entry
    }

    pub fn get(&self, label: &str) -> Option<TimerEntry> {
        self.labels.get(label).copied()
    }

    pub fn end(&mut self, label: &str) -> Option<TimerEntry> {
        self.labels.remove(label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPhase {
    Started,
    Running(Duration),
    Ended(Duration),
}

/// The `[ LABEL: ... ]` segment of a line emitted by a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelBlock {
    pub label: String,
    pub phase: LabelPhase,
}

impl LabelBlock {
    pub fn new<S: Into<String>>(label: S, phase: LabelPhase) -> Self {
        Self {
            label: label.into(),
            phase,
        }
    }
}

impl fmt::Display for LabelBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ LABEL: {} ", self.label)?;
        match self.phase {
            LabelPhase::Started => write!(f, "STARTED TRACKING")?,
            LabelPhase::Running(d) => write!(f, "TIME FROM START: {}", format_elapsed(d))?,
            LabelPhase::Ended(d) => write!(f, "ENDED AFTER {}", format_elapsed(d))?,
        }
        write!(f, " ]")
    }
}

/// `mm:ss.mmm`. Minutes don't wrap at 60 and milliseconds aren't padded,
/// so 1h 2m 3.045s is `62:03.45`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let total_secs = millis / 1000;
    format!(
        "{:02}:{:02}.{}",
        total_secs / 60,
        total_secs % 60,
        millis % 1000
    )
}
