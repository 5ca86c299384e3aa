use crate::level::Level;
use crate::style::StyleChain;
use lazy_static::lazy_static;
use std::collections::BTreeMap;

pub const DEFAULT_PACK: &str = "regular";

lazy_static! {
    static ref PACKS: BTreeMap<&'static str, Pack> = {
        let mut packs = BTreeMap::new();
        packs.insert(DEFAULT_PACK, Pack::regular());
        packs
    };
}

/// Dotted style path used for each level, e.g. `error => "red.bold"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pack {
    paths: BTreeMap<Level, String>,
}

impl Pack {
    pub fn regular() -> Self {
        let mut paths = BTreeMap::new();
        paths.insert(Level::Error, "red.bold".to_string());
        paths.insert(Level::Warn, "blue.bold".to_string());
        paths.insert(Level::Info, "green.bold".to_string());
        paths.insert(Level::Log, "black".to_string());
        paths.insert(Level::Trace, "brightBlue".to_string());
        Self { paths }
    }

    /// Unknown names fall back to the `regular` pack.
    pub fn named(name: &str) -> Self {
        PACKS.get(name).cloned().unwrap_or_else(Pack::regular)
    }

    pub fn with_path<S: Into<String>>(mut self, level: Level, path: S) -> Self {
        self.paths.insert(level, path.into());
        self
    }

    pub fn path(&self, level: Level) -> &str {
        self.paths.get(&level).map(String::as_str).unwrap_or("")
    }

    pub fn style(&self, level: Level) -> StyleChain {
        StyleChain::from_path(self.path(level))
    }
}

impl Default for Pack {
    fn default() -> Self {
        Pack::regular()
    }
}
