use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

lazy_static::lazy_static! {
    static ref INCREMENTAL_UNIQ_ID: AtomicU64 = AtomicU64::new(0);
}

/// Process-wide incrementing id, unique for the lifetime of the process.
#[derive(Clone, Copy, Hash, PartialOrd, PartialEq, Ord, Eq, Debug)]
pub struct UniqID(u64);

impl UniqID {
    pub fn new() -> Self {
        UniqID(INCREMENTAL_UNIQ_ID.fetch_add(1, Ordering::SeqCst))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UniqID {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Names concurrent request timers. Ids must not repeat while a request
/// with the same id is still in flight.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// Default generator backed by [`UniqID`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialIds;

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        format!("request-{}", UniqID::new())
    }
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn next_id(&self) -> String {
        self()
    }
}
