pub mod stdout;
pub mod string;

use anyhow::Result;

pub use stdout::StdoutDrain;
pub use string::StringDrain;

/// Where finished, styled lines end up.
pub trait Drain: Send + Sync {
    fn write(&self, bytes: &[u8]) -> Result<()>;
}
