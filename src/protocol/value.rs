//! Runtime field values

use std::slice;

use super::Message;

/// Value held by a message field, an array element or a map entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Unset; written as zero or the empty string
    #[default]
    Null,
    /// Signed 8-bit integer
    I8(i8),
    /// Signed 16-bit integer
    I16(i16),
    /// Signed 32-bit integer
    I32(i32),
    /// Unsigned 8-bit integer
    U8(u8),
    /// Unsigned 16-bit integer
    U16(u16),
    /// Unsigned 32-bit integer
    U32(u32),
    /// 32-bit float
    F32(f32),
    /// 64-bit float
    F64(f64),
    /// UTF-8 string
    String(String),
    /// Ordered sequence
    Array(Vec<Value>),
    /// Insertion-ordered mapping
    Map(StreamMap),
    /// Nested message
    Message(Box<Message>),
}

impl Value {
    /// Check if this value is a number
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            Self::I8(_)
                | Self::I16(_)
                | Self::I32(_)
                | Self::U8(_)
                | Self::U16(_)
                | Self::U32(_)
                | Self::F32(_)
                | Self::F64(_)
        )
    }

    /// Integer view of a numeric value; floats truncate toward zero, NaN and infinities are zero.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::I8(v) => Some(i64::from(v)),
            Self::I16(v) => Some(i64::from(v)),
            Self::I32(v) => Some(i64::from(v)),
            Self::U8(v) => Some(i64::from(v)),
            Self::U16(v) => Some(i64::from(v)),
            Self::U32(v) => Some(i64::from(v)),
            #[allow(clippy::cast_possible_truncation)]
            Self::F32(v) => Some(if v.is_finite() { v as i64 } else { 0 }),
            #[allow(clippy::cast_possible_truncation)]
            Self::F64(v) => Some(if v.is_finite() { v as i64 } else { 0 }),
            _ => None,
        }
    }

    /// Floating point view of a numeric value
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::F32(v) => Some(f64::from(v)),
            Self::F64(v) => Some(v),
            #[allow(clippy::cast_precision_loss)]
            _ => self.as_i64().map(|v| v as f64),
        }
    }

    /// String slice, if this is a string
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Elements, if this is an array
    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Self::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Mapping, if this is a map
    #[must_use]
    pub fn as_map(&self) -> Option<&StreamMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Nested message, if this is one
    #[must_use]
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Self::Message(message) => Some(&**message),
            _ => None,
        }
    }

    /// Mutable nested message, if this is one
    pub fn as_message_mut(&mut self) -> Option<&mut Message> {
        match self {
            Self::Message(message) => Some(&mut **message),
            _ => None,
        }
    }

    /// Short name of the variant for diagnostics
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Map(_) => "map",
            Self::Message(_) => "message",
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    f32 => F32,
    f64 => F64,
    String => String,
    Vec<Value> => Array,
    StreamMap => Map,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Message> for Value {
    fn from(v: Message) -> Self {
        Self::Message(Box::new(v))
    }
}

/// Map key: a raw `u32` or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapKey {
    /// Integer key
    U32(u32),
    /// String key
    String(String),
}

impl From<u32> for MapKey {
    fn from(v: u32) -> Self {
        Self::U32(v)
    }
}

impl From<&str> for MapKey {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for MapKey {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// Mapping that iterates in insertion order, the order pairs go on the wire.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StreamMap {
    entries: Vec<(MapKey, Value)>,
}

impl StreamMap {
    /// Create an empty map
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create an empty map with room for `capacity` pairs
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Insert a pair; an existing key keeps its position and returns the old value.
    pub fn insert(&mut self, key: impl Into<MapKey>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            return Some(std::mem::replace(slot, value));
        }
        self.entries.push((key, value));
        None
    }

    /// Look up a value by key
    #[must_use]
    pub fn get(&self, key: &MapKey) -> Option<&Value> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Remove a pair, preserving the order of the rest
    pub fn remove(&mut self, key: &MapKey) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove all pairs
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Pairs in insertion order
    pub fn iter(&self) -> slice::Iter<'_, (MapKey, Value)> {
        self.entries.iter()
    }
}

impl<'a> IntoIterator for &'a StreamMap {
    type Item = &'a (MapKey, Value);
    type IntoIter = slice::Iter<'a, (MapKey, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<MapKey>, V: Into<Value>> FromIterator<(K, V)> for StreamMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
