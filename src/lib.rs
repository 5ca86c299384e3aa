/*!
# tlog - styled, leveled and timed logging

**tlog** prints log lines for long-running services. Every line carries a
timestamp and the name of the subsystem that logged it, and is colored
according to its level.

Levels, from loudest to chattiest, are `error`, `warn`, `info`, `log` and
`trace`. The threshold is read from the `LOG_LEVEL` environment variable.

Labeled timers measure how long something takes across several calls:
`time` starts one, `time_log` reports the elapsed time so far and
`time_end` reports the total and forgets the label.

`Logger::track_request` builds a tracker that times a request, logs a
heartbeat every two seconds while it is in flight and logs the total once
the response is finished.

Example

```
use tlog::{msg, Logger};

let logger = Logger::new("db");
logger.info("connected");
logger.time("migration", "warn", "running migrations");
logger.time_log("migration", msg!["applied", 3, "of", 10]);
logger.time_end("migration", ());
```
 */
#![allow(clippy::new_without_default)]

pub mod config;
pub mod data;
pub mod drains;
pub mod inspect;
pub mod level;
pub mod logger;
pub mod middleware;
pub mod pack;
pub mod registry;
pub mod style;
pub mod timer;
pub mod uniq_id;
pub mod utils;

#[cfg(test)]
mod tests;

pub use config::{Config, TimestampFormat};
pub use data::{DataValue, Message, SharedValue};
pub use drains::{Drain, StdoutDrain, StringDrain};
pub use level::{Level, LevelGate};
pub use logger::Logger;
pub use middleware::{completion, Completion, Finished, Request, RequestParts, TrackRequest};
pub use pack::Pack;
pub use registry::{Style, StyleCode};
pub use style::StyleChain;
pub use uniq_id::{IdGenerator, UniqID};
