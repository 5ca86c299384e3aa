use anyhow::Result;
use std::sync::{Arc, Mutex};
use tlog::utils::strip_ansi;
use tlog::Drain;

/// Keeps every write separately so tests can count emitted lines.
#[derive(Clone)]
pub struct TestDrain {
    pub writes: Arc<Mutex<Vec<String>>>,
    pub strip_ansi: bool,
}

impl TestDrain {
    pub fn new() -> Self {
        Self {
            writes: Arc::new(Mutex::new(vec![])),
            strip_ansi: true,
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().expect("poisoned lock").clone()
    }

    pub fn clear(&self) {
        self.writes.lock().expect("poisoned lock").clear();
    }

    pub fn count_containing(&self, needle: &str) -> usize {
        self.writes()
            .iter()
            .filter(|write| write.contains(needle))
            .count()
    }
}

impl Drain for TestDrain {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        let mut result = String::from_utf8(bytes.to_vec())?;
        if self.strip_ansi {
            result = strip_ansi(&result);
        }
        self.writes.lock().expect("poisoned lock").push(result);
        Ok(())
    }
}

impl std::fmt::Display for TestDrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let writes = self.writes.lock().expect("poisoned lock");
        write!(f, "{}", writes.concat())
    }
}
