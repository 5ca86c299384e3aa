use super::Drain;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes every line to STDOUT as is, escape codes included.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutDrain {}

impl StdoutDrain {
    pub fn new() -> Self {
        Self {}
    }
}

impl Drain for StdoutDrain {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        lock.write_all(bytes).context("failed to write log line to STDOUT")?;
        lock.flush().context("failed to flush STDOUT")?;
        Ok(())
    }
}
