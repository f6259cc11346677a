//! Field kinds declared on a schema

use std::fmt;
use std::sync::Arc;

use super::Schema;

/// Fixed-width numeric kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarKind {
    /// Signed 8-bit integer
    I8,
    /// Signed 16-bit integer
    I16,
    /// Signed 32-bit integer
    I32,
    /// Unsigned 8-bit integer
    U8,
    /// Unsigned 16-bit integer
    U16,
    /// Unsigned 32-bit integer
    U32,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
}

impl ScalarKind {
    /// Encoded width in bytes
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::I8 | Self::U8 => 1,
            Self::I16 | Self::U16 => 2,
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::F64 => 8,
        }
    }

    /// Check if this is a floating point kind
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::F32 => "f32",
            Self::F64 => "f64",
        };
        write!(f, "{name}")
    }
}

/// Key encoding of a map field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MapKeyKind {
    /// Raw 4-byte unsigned integer
    U32,
    /// Length-prefixed UTF-8 string
    String,
}

impl fmt::Display for MapKeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::U32 => write!(f, "u32"),
            Self::String => write!(f, "string"),
        }
    }
}

/// Kind of a single value: a whole field, an array element or a map value.
#[derive(Debug, Clone)]
pub enum ElementKind {
    /// Fixed-width number
    Scalar(ScalarKind),
    /// Length-prefixed string
    String,
    /// Nested message, encoded without framing
    Message(Arc<Schema>),
}

impl PartialEq for ElementKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::String, Self::String) => true,
            (Self::Message(a), Self::Message(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::String => write!(f, "string"),
            Self::Message(schema) => write!(f, "message {}", schema.name()),
        }
    }
}

impl From<ScalarKind> for ElementKind {
    fn from(kind: ScalarKind) -> Self {
        Self::Scalar(kind)
    }
}

impl From<Arc<Schema>> for ElementKind {
    fn from(schema: Arc<Schema>) -> Self {
        Self::Message(schema)
    }
}

/// Declared kind of a schema field, fixed at registration time.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single value
    Value(ElementKind),
    /// Homogeneous sequence: `[count: u32][elements]`
    Array(ElementKind),
    /// Keyed mapping: `[count: u32][(key, value) pairs]`
    Map(MapKeyKind, ElementKind),
}

impl FieldKind {
    /// Scalar field
    #[must_use]
    pub const fn scalar(kind: ScalarKind) -> Self {
        Self::Value(ElementKind::Scalar(kind))
    }

    /// String field
    #[must_use]
    pub const fn string() -> Self {
        Self::Value(ElementKind::String)
    }

    /// Nested message field
    #[must_use]
    pub fn message(schema: &Arc<Schema>) -> Self {
        Self::Value(ElementKind::Message(Arc::clone(schema)))
    }

    /// Array field
    pub fn array(element: impl Into<ElementKind>) -> Self {
        Self::Array(element.into())
    }

    /// Map field
    pub fn map(key: MapKeyKind, value: impl Into<ElementKind>) -> Self {
        Self::Map(key, value.into())
    }

    /// Kind of the field itself, or of the container's elements
    #[must_use]
    pub const fn element_kind(&self) -> &ElementKind {
        match self {
            Self::Value(kind) | Self::Array(kind) | Self::Map(_, kind) => kind,
        }
    }

    /// Declared key kind for map fields
    #[must_use]
    pub const fn map_key_kind(&self) -> Option<MapKeyKind> {
        match self {
            Self::Map(key, _) => Some(*key),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(kind) => write!(f, "{kind}"),
            Self::Array(kind) => write!(f, "array<{kind}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
        }
    }
}
