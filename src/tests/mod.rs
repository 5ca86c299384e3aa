mod request_test;

use crate::config::{Config, TimestampFormat};
use crate::drains::StringDrain;
use crate::level::Level;
use crate::logger::Logger;
use std::sync::Arc;

fn setup(context: &str, level: Level) -> (Logger, StringDrain) {
    let drain = StringDrain::new();
    let logger = Logger::with_config(
        context,
        Config::default()
            .level(level)
            .timestamp_format(TimestampFormat::Redacted),
    );
    logger.set_drain(Arc::new(drain.clone()));
    (logger, drain)
}
