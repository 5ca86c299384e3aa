use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// A single part of a log message.
///
/// Scalars are printed as they are, `List`, `Object` and `Shared` values
/// are dumped structurally on their own line (see `crate::inspect`), and
/// so is `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// Absent value, dropped from log lines.
    None,
    /// Explicit null. Dumped on its own line like other non-scalars.
    Null,
    List(Vec<DataValue>),
    /// Key/value pairs, kept in insertion order.
    Object(Vec<(String, DataValue)>),
    Shared(SharedValue),
}

impl DataValue {
    pub fn object<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<DataValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        DataValue::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<DataValue>,
        I: IntoIterator<Item = V>,
    {
        DataValue::List(items.into_iter().map(Into::into).collect())
    }

    /// Look up a key of an `Object`. Anything else has no keys.
    pub fn get(&self, key: &str) -> Option<&DataValue> {
        match self {
            DataValue::Object(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Insert into an `Object`, replacing an existing key in place.
    /// Non-object values are turned into an empty object first.
    pub fn insert<K: Into<String>, V: Into<DataValue>>(&mut self, key: K, value: V) {
        if !matches!(self, DataValue::Object(_)) {
            *self = DataValue::Object(vec![]);
        }
        if let DataValue::Object(entries) = self {
            let key = key.into();
            let value = value.into();
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some(entry) => entry.1 = value,
                None => entries.push((key, value)),
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            DataValue::Null | DataValue::List(_) | DataValue::Object(_) | DataValue::Shared(_)
        )
    }

    /// Falsy parts are dropped from log lines: empty strings, zero, NaN,
    /// `false` and `None`.
    pub fn is_truthy(&self) -> bool {
        match self {
            DataValue::String(s) => !s.is_empty(),
            DataValue::Int(i) => *i != 0,
            DataValue::Float(f) => *f != 0.0 && !f.is_nan(),
            DataValue::Bool(b) => *b,
            DataValue::None => false,
            DataValue::Null
            | DataValue::List(_)
            | DataValue::Object(_)
            | DataValue::Shared(_) => true,
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::String(string) => write!(f, "{}", string),
            DataValue::Int(i) => write!(f, "{}", i),
            DataValue::Float(float) => write!(f, "{}", format_float(*float)),
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::None => Ok(()),
            DataValue::Null => write!(f, "null"),
            structured => write!(f, "{}", crate::inspect::inspect(structured)),
        }
    }
}

pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        format!("{}", value)
    }
}

/// Reference-counted, mutable value. Cloning shares the same cell, so a
/// shared value can end up containing itself.
#[derive(Clone)]
pub struct SharedValue(Arc<Mutex<DataValue>>);

impl SharedValue {
    pub fn new<V: Into<DataValue>>(value: V) -> Self {
        SharedValue(Arc::new(Mutex::new(value.into())))
    }

    pub fn lock(&self) -> MutexGuard<'_, DataValue> {
        match self.0.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub fn set<V: Into<DataValue>>(&self, value: V) {
        *self.lock() = value.into();
    }

    pub fn insert<K: Into<String>, V: Into<DataValue>>(&self, key: K, value: V) {
        self.lock().insert(key, value);
    }

    /// Identity of the underlying cell.
    pub fn id(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }
}

impl PartialEq for SharedValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

// The cell may contain itself, don't recurse into it.
impl fmt::Debug for SharedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedValue({:#x})", self.id())
    }
}

/// Ordered message parts passed to every log method.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message(Vec<DataValue>);

impl Message {
    pub fn new(parts: Vec<DataValue>) -> Self {
        Message(parts)
    }

    pub fn empty() -> Self {
        Message(vec![])
    }

    pub fn parts(&self) -> &[DataValue] {
        &self.0
    }

    pub fn prepend<V: Into<DataValue>>(&mut self, part: V) {
        self.0.insert(0, part.into());
    }

    pub fn push<V: Into<DataValue>>(&mut self, part: V) {
        self.0.push(part.into());
    }
}

/// Build a [`Message`] out of anything convertible to a [`DataValue`].
///
/// ```
/// let message = tlog::msg!["took", 42, "ms"];
/// assert_eq!(message.parts().len(), 3);
/// ```
#[macro_export]
macro_rules! msg {
    () => {
        $crate::data::Message::empty()
    };
    ( $( $part:expr ),+ $(,)? ) => {
        $crate::data::Message::new(vec![ $( $crate::data::DataValue::from($part) ),+ ])
    };
}

impl From<()> for Message {
    fn from(_: ()) -> Self {
        Message::empty()
    }
}

impl<T: Into<DataValue>> From<T> for Message {
    fn from(part: T) -> Self {
        Message(vec![part.into()])
    }
}

impl<'a> From<&'a str> for DataValue {
    fn from(v: &'a str) -> Self {
        DataValue::String(v.to_owned())
    }
}

impl<'a> From<&'a String> for DataValue {
    fn from(v: &'a String) -> Self {
        DataValue::String(v.clone())
    }
}

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        DataValue::String(v)
    }
}

impl From<bool> for DataValue {
    fn from(v: bool) -> Self {
        DataValue::Bool(v)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl From<f32> for DataValue {
    fn from(value: f32) -> Self {
        DataValue::Float(value as f64)
    }
}

impl<T: Into<DataValue>> From<Option<T>> for DataValue {
    fn from(maybe_value: Option<T>) -> Self {
        match maybe_value {
            Some(v) => v.into(),
            None => DataValue::None,
        }
    }
}

impl<T: Into<DataValue>> From<Vec<T>> for DataValue {
    fn from(items: Vec<T>) -> Self {
        DataValue::list(items)
    }
}

impl From<SharedValue> for DataValue {
    fn from(shared: SharedValue) -> Self {
        DataValue::Shared(shared)
    }
}

impl From<serde_json::Value> for DataValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => DataValue::Null,
            Value::Bool(b) => DataValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DataValue::Int(i),
                None => DataValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => DataValue::String(s),
            Value::Array(items) => DataValue::list(items),
            Value::Object(map) => DataValue::object(map),
        }
    }
}

macro_rules! from_int_types {
    ( $( $t:ty ),* ) => {
        $(
            impl From<$t> for DataValue {
                fn from(value: $t) -> Self {
                    DataValue::Int(value as i64)
                }
            }
        )*
    };
}

from_int_types!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
