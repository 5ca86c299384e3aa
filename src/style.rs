use crate::registry::{self, Style, StyleCode, RESET};

/// Queue of styles waiting to be applied to a piece of text.
///
/// Chains are plain values: `with` returns a new chain and `apply` never
/// mutates, so two chains can't interleave their codes. Only the first
/// queued code is used when applying, `red.bold` renders as plain red.
/// Later codes are still recorded and can be inspected with `pending`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleChain {
    pending: Vec<StyleCode>,
}

impl StyleChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dotted path such as `"red.bold"`. Unknown segments are skipped.
    pub fn from_path(path: &str) -> Self {
        path.split('.')
            .filter(|segment| !segment.is_empty())
            .fold(Self::new(), |chain, segment| chain.with_name(segment))
    }

    pub fn with(&self, style: Style) -> Self {
        self.with_code(style.code())
    }

    pub fn with_name(&self, name: &str) -> Self {
        match registry::lookup(name) {
            Some(code) => self.with_code(code),
            None => self.clone(),
        }
    }

    fn with_code(&self, code: StyleCode) -> Self {
        let mut pending = self.pending.clone();
        pending.push(code);
        Self { pending }
    }

    pub fn pending(&self) -> &[StyleCode] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len() + 16);
        match self.pending.first() {
            Some(code) => {
                result.push_str(&code.open_sequence());
                result.push_str(text);
                result.push_str(&code.close_sequence());
            }
            None => result.push_str(text),
        }
        result.push_str(&RESET.close_sequence());
        result
    }

    pub fn clear(self) -> Self {
        Self::default()
    }
}
