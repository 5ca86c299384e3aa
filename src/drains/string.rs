use super::Drain;
use crate::utils::strip_ansi;
use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard};

// Similar to STDOUT drain, but instead logs everything into a string
// that it owns that can later be inspected/dumped.
#[derive(Clone)]
pub struct StringDrain {
    output: Arc<Mutex<String>>,
    strip_ansi: bool,
}

impl StringDrain {
    /// Keeps the text only, escape codes are stripped.
    pub fn new() -> Self {
        Self {
            output: Arc::new(Mutex::new(String::new())),
            strip_ansi: true,
        }
    }

    /// Keeps lines exactly as they would hit the terminal.
    pub fn raw() -> Self {
        Self {
            output: Arc::new(Mutex::new(String::new())),
            strip_ansi: false,
        }
    }

    fn output(&self) -> MutexGuard<'_, String> {
        match self.output.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.output().lines().map(str::to_owned).collect()
    }

    pub fn take(&self) -> String {
        std::mem::take(&mut *self.output())
    }

    pub fn is_empty(&self) -> bool {
        self.output().is_empty()
    }
}

impl Default for StringDrain {
    fn default() -> Self {
        Self::new()
    }
}

impl Drain for StringDrain {
    fn write(&self, bytes: &[u8]) -> Result<()> {
        let mut text = String::from_utf8_lossy(bytes).into_owned();
        if self.strip_ansi {
            text = strip_ansi(&text);
        }
        self.output().push_str(&text);
        Ok(())
    }
}

impl std::fmt::Display for StringDrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &*self.output())
    }
}
