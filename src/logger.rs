use crate::config::{Config, TimestampFormat};
use crate::data::{DataValue, Message};
use crate::drains::{Drain, StdoutDrain};
use crate::inspect::inspect;
use crate::level::{Level, LevelGate};
use crate::pack::Pack;
use crate::timer::{LabelBlock, LabelPhase, TimeLabels};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Leveled logger for one named subsystem.
///
/// Clones share the same timers and drain, so a clone can be moved into a
/// background task.
#[derive(Clone)]
pub struct Logger(Arc<LoggerInternal>);

struct LoggerInternal {
    context: String,
    pack: Pack,
    gate: LevelGate,
    timestamp_format: TimestampFormat,
    time_labels: RwLock<TimeLabels>,
    drain: RwLock<Arc<dyn Drain>>,
}

impl Logger {
    /// Logger configured from `LOG_LEVEL`, printing to STDOUT.
    pub fn new<S: Into<String>>(context: S) -> Self {
        Self::with_config(context, Config::from_env())
    }

    pub fn with_config<S: Into<String>>(context: S, config: Config) -> Self {
        Logger(Arc::new(LoggerInternal {
            context: context.into(),
            pack: config.pack,
            gate: LevelGate::new(config.level),
            timestamp_format: config.timestamp_format,
            time_labels: RwLock::new(TimeLabels::default()),
            drain: RwLock::new(Arc::new(StdoutDrain::new())),
        }))
    }

    pub fn set_drain(&self, drain: Arc<dyn Drain>) {
        *write_lock(&self.0.drain) = drain;
    }

    pub fn context(&self) -> &str {
        &self.0.context
    }

    pub fn threshold(&self) -> Level {
        self.0.gate.threshold()
    }

    pub fn pack(&self) -> &Pack {
        &self.0.pack
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.0.gate.allows(level)
    }

    pub fn error<M: Into<Message>>(&self, message: M) {
        self.emit(Level::Error, None, message.into());
    }

    pub fn warn<M: Into<Message>>(&self, message: M) {
        self.emit(Level::Warn, None, message.into());
    }

    pub fn info<M: Into<Message>>(&self, message: M) {
        self.emit(Level::Info, None, message.into());
    }

    pub fn log<M: Into<Message>>(&self, message: M) {
        self.emit(Level::Log, None, message.into());
    }

    pub fn trace<M: Into<Message>>(&self, message: M) {
        self.emit(Level::Trace, None, message.into());
    }

    pub fn at<M: Into<Message>>(&self, level: Level, message: M) {
        self.emit(level, None, message.into());
    }

    /// Start timing `label`. `level` picks the level every line of this
    /// timer is logged at; if it isn't a level name it's logged as the
    /// first message part instead and `info` is used.
    pub fn time<M: Into<Message>>(&self, label: &str, level: &str, message: M) {
        let mut message = message.into();
        let level = match level.parse::<Level>() {
            Ok(level) => level,
            Err(_) => {
                message.prepend(level);
                Level::Info
            }
        };
        self.time_with_level(label, level, message);
    }

    pub fn time_with_level<M: Into<Message>>(&self, label: &str, level: Level, message: M) {
        write_lock(&self.0.time_labels).start(label, level);
        let block = LabelBlock::new(label, LabelPhase::Started);
        self.emit(level, Some(block), message.into());
    }

    /// Log the time elapsed since `label` started. Does nothing if the
    /// timer isn't running.
    pub fn time_log<M: Into<Message>>(&self, label: &str, message: M) {
        let entry = read_lock(&self.0.time_labels).get(label);
        if let Some(entry) = entry {
            let block = LabelBlock::new(label, LabelPhase::Running(entry.elapsed()));
            self.emit(entry.level, Some(block), message.into());
        }
    }

    /// Stop timing `label` and log the total. Does nothing if the timer
    /// isn't running.
    pub fn time_end<M: Into<Message>>(&self, label: &str, message: M) {
        let entry = write_lock(&self.0.time_labels).end(label);
        if let Some(entry) = entry {
            let block = LabelBlock::new(label, LabelPhase::Ended(entry.elapsed()));
            self.emit(entry.level, Some(block), message.into());
        }
    }

    pub fn is_timing(&self, label: &str) -> bool {
        read_lock(&self.0.time_labels).contains(label)
    }

    fn emit(&self, level: Level, block: Option<LabelBlock>, message: Message) {
        if !self.enabled(level) {
            return;
        }

        let line = make_line(
            &self.0.context,
            self.0.timestamp_format,
            block.as_ref(),
            &message,
        );
        let styled = self.0.pack.style(level).apply(&line);
        let drain = read_lock(&self.0.drain).clone();
        drain.write(styled.as_bytes()).ok();
    }
}

pub fn make_line(
    context: &str,
    timestamp_format: TimestampFormat,
    block: Option<&LabelBlock>,
    message: &Message,
) -> String {
    let mut segments = vec![
        format!("[TIMESTAMP: {}]", timestamp_format.now()),
        format!("[{}]", context.to_uppercase()),
    ];

    if let Some(block) = block {
        segments.push(block.to_string());
    }

    for part in message.parts().iter().filter(|part| part.is_truthy()) {
        segments.push(render_part(part));
    }

    let mut line = segments.join(" ");
    line.push('\n');
    line
}

fn render_part(part: &DataValue) -> String {
    if part.is_structured() {
        format!("\n{}", inspect(part))
    } else {
        part.to_string()
    }
}

fn read_lock<T: ?Sized>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock<T: ?Sized>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
