//! Request instrumentation: a timer per request, a heartbeat line while the
//! request is in flight and a final line with the total once it finishes.

use crate::data::DataValue;
use crate::level::Level;
use crate::logger::Logger;
use crate::uniq_id::{IdGenerator, SequentialIds};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

pub const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(2000);
pub const HEARTBEAT_MESSAGE: &str = "request is still processing";

/// The parts of an incoming request the tracker looks at.
pub trait Request {
    fn path(&self) -> &str;
    fn method(&self) -> &str;
    fn header(&self, name: &str) -> Option<&str>;
}

/// Minimal owned request, handy when the framework's own request type
/// can't implement [`Request`] directly.
#[derive(Debug, Clone, Default)]
pub struct RequestParts {
    pub path: String,
    pub method: String,
    pub headers: BTreeMap<String, String>,
}

impl RequestParts {
    pub fn new<P: Into<String>, M: Into<String>>(method: M, path: P) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl Request for RequestParts {
    fn path(&self) -> &str {
        &self.path
    }

    fn method(&self) -> &str {
        &self.method
    }

    // Header names are case-insensitive.
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Response side of a tracked request. Call `finish` once the response is
/// sent. Dropping it without finishing counts as finished too, so a request
/// that errors out or gets cancelled still ends its timer.
#[derive(Debug)]
pub struct Completion(oneshot::Sender<()>);

impl Completion {
    pub fn finish(self) {
        self.0.send(()).ok();
    }
}

/// Handed to [`TrackRequest::handle`], resolves when the paired
/// [`Completion`] finishes or is dropped.
#[derive(Debug)]
pub struct Finished(oneshot::Receiver<()>);

impl Finished {
    pub async fn wait(self) {
        self.0.await.ok();
    }
}

pub fn completion() -> (Completion, Finished) {
    let (tx, rx) = oneshot::channel();
    (Completion(tx), Finished(rx))
}

/// Repeating `time_log` for one label. Stops when dropped.
struct Heartbeat(JoinHandle<()>);

impl Heartbeat {
    fn start(handle: &Handle, logger: Logger, label: String, period: Duration) -> Self {
        let first = Instant::now() + period;
        Heartbeat(handle.spawn(async move {
            // A stalled runtime gets one late heartbeat, not a burst of them.
            let mut ticker = tokio::time::interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                logger.time_log(&label, HEARTBEAT_MESSAGE);
            }
        }))
    }
}

impl Drop for Heartbeat {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// A request whose timer is running. Dropping it stops the heartbeat and
/// ends the timer, whether the response finished or the runtime went away.
struct InFlight {
    logger: Logger,
    label: String,
    context: DataValue,
    heartbeat: Heartbeat,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.heartbeat.0.abort();
        let context = std::mem::replace(&mut self.context, DataValue::None);
        self.logger.time_end(&self.label, context);
    }
}

/// Per-router request tracker, built with [`Logger::track_request`].
#[derive(Clone)]
pub struct TrackRequest {
    logger: Logger,
    router: String,
    headers_tracked: Vec<String>,
    level: Level,
    ids: Arc<dyn IdGenerator>,
    heartbeat_interval: Duration,
}

impl Logger {
    pub fn track_request<S: Into<String>>(&self, router: S) -> TrackRequest {
        TrackRequest {
            logger: self.clone(),
            router: router.into(),
            headers_tracked: vec![],
            level: Level::Info,
            ids: Arc::new(SequentialIds),
            heartbeat_interval: HEARTBEAT_INTERVAL,
        }
    }
}

impl TrackRequest {
    /// Headers copied into the request context, in this order.
    pub fn headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers_tracked = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn id_generator(mut self, ids: Arc<dyn IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval = interval;
        self
    }

    /// `{ router, url, method }`, plus `headers` when any are tracked.
    pub fn context<R: Request + ?Sized>(&self, request: &R) -> DataValue {
        let mut context = DataValue::object(vec![
            ("router", self.router.as_str()),
            ("url", request.path()),
            ("method", request.method()),
        ]);

        if !self.headers_tracked.is_empty() {
            let headers = DataValue::object(
                self.headers_tracked
                    .iter()
                    .map(|name| (name.as_str(), request.header(name))),
            );
            context.insert("headers", headers);
        }

        context
    }

    /// Start tracking `request` and hand over to `next` right away.
    ///
    /// Needs to be called from within a tokio runtime, otherwise the
    /// request is not tracked and only `next` runs.
    pub fn handle<R, N, T>(&self, request: &R, finished: Finished, next: N) -> T
    where
        R: Request + ?Sized,
        N: FnOnce() -> T,
    {
        if let Ok(handle) = Handle::try_current() {
            self.track(&handle, request, finished);
        }
        next()
    }

    fn track<R: Request + ?Sized>(&self, handle: &Handle, request: &R, finished: Finished) {
        let id = self.ids.next_id();
        let context = self.context(request);

        self.logger.time_with_level(&id, self.level, context.clone());

        let heartbeat = Heartbeat::start(
            handle,
            self.logger.clone(),
            id.clone(),
            self.heartbeat_interval,
        );
        let in_flight = InFlight {
            logger: self.logger.clone(),
            label: id,
            context,
            heartbeat,
        };
        handle.spawn(async move {
            finished.wait().await;
            drop(in_flight);
        });
    }
}
