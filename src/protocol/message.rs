//! Message instances

use std::sync::Arc;

use bytes::Bytes;

use super::header::{MAIN_CMD, SUB_CMD};
use super::{
    Codec, ElementKind, Error, FieldKind, MessageHeader, Result, Schema, StreamMap, Value, scalar,
};

/// A message: one value slot per schema field plus the last wire buffer.
///
/// The buffer is replaced wholesale by every encode or decode, so an
/// instance can be reused for any number of round-trips.
#[derive(Debug, Clone)]
pub struct Message {
    schema: Arc<Schema>,
    values: Vec<Value>,
    buffer: Bytes,
}

impl Message {
    /// Create a message with every field at its default value
    #[must_use]
    pub fn new(schema: &Arc<Schema>) -> Self {
        let values = schema.fields().map(|f| default_value(f.kind())).collect();
        Self {
            schema: Arc::clone(schema),
            values,
            buffer: Bytes::new(),
        }
    }

    /// Create a message with its command codes set
    pub fn with_cmd(schema: &Arc<Schema>, main_cmd: i32, sub_cmd: i32) -> Result<Self> {
        let mut message = Self::new(schema);
        message.set_main_cmd(main_cmd)?;
        message.set_sub_cmd(sub_cmd)?;
        Ok(message)
    }

    /// Get schema
    #[must_use]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Value stored under `storage`
    #[must_use]
    pub fn get(&self, storage: &str) -> Option<&Value> {
        self.schema.position(storage).map(|i| &self.values[i])
    }

    /// Mutable value stored under `storage`
    pub fn get_mut(&mut self, storage: &str) -> Option<&mut Value> {
        let index = self.schema.position(storage)?;
        Some(&mut self.values[index])
    }

    /// Replace the value stored under `storage`.
    ///
    /// The value is not checked against the declared kind here; a mismatch
    /// surfaces as [`Error::InvalidMember`] when the message is encoded.
    pub fn set(&mut self, storage: &str, value: impl Into<Value>) -> Result<()> {
        let slot = self.get_mut(storage).ok_or_else(|| Error::UnknownField {
            field: storage.to_owned(),
        })?;
        *slot = value.into();
        Ok(())
    }

    /// Integer field as `i32`
    #[must_use]
    pub fn get_i32(&self, storage: &str) -> Option<i32> {
        self.get(storage)?
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
    }

    /// Integer field as `u32`
    #[must_use]
    pub fn get_u32(&self, storage: &str) -> Option<u32> {
        self.get(storage)?
            .as_i64()
            .and_then(|v| u32::try_from(v).ok())
    }

    /// Numeric field as `f64`
    #[must_use]
    pub fn get_f64(&self, storage: &str) -> Option<f64> {
        self.get(storage)?.as_f64()
    }

    /// String field
    #[must_use]
    pub fn get_str(&self, storage: &str) -> Option<&str> {
        self.get(storage)?.as_str()
    }

    /// Array field
    #[must_use]
    pub fn get_array(&self, storage: &str) -> Option<&[Value]> {
        self.get(storage)?.as_array()
    }

    /// Map field
    #[must_use]
    pub fn get_map(&self, storage: &str) -> Option<&StreamMap> {
        self.get(storage)?.as_map()
    }

    /// Nested message field
    #[must_use]
    pub fn get_message(&self, storage: &str) -> Option<&Message> {
        self.get(storage)?.as_message()
    }

    /// Mutable nested message field
    pub fn get_message_mut(&mut self, storage: &str) -> Option<&mut Message> {
        self.get_mut(storage)?.as_message_mut()
    }

    /// Get primary command code
    #[must_use]
    pub fn main_cmd(&self) -> i32 {
        self.get_i32(MAIN_CMD).unwrap_or(0)
    }

    /// Get secondary command code
    #[must_use]
    pub fn sub_cmd(&self) -> i32 {
        self.get_i32(SUB_CMD).unwrap_or(0)
    }

    /// Set primary command code
    pub fn set_main_cmd(&mut self, main_cmd: i32) -> Result<()> {
        self.set(MAIN_CMD, main_cmd)
    }

    /// Set secondary command code
    pub fn set_sub_cmd(&mut self, sub_cmd: i32) -> Result<()> {
        self.set(SUB_CMD, sub_cmd)
    }

    /// Command codes as a header
    #[must_use]
    pub fn header(&self) -> MessageHeader {
        MessageHeader::new(self.main_cmd(), self.sub_cmd())
    }

    /// Bytes produced by the last encode, or supplied to the last decode
    #[must_use]
    pub fn buffer(&self) -> &Bytes {
        &self.buffer
    }

    /// Encode with the default configuration and keep the result as the buffer
    pub fn encode(&mut self) -> Result<Bytes> {
        Codec::default().encode(self)
    }

    /// Decode `data` with the default configuration.
    ///
    /// Returns `false` if any field failed; fields before the failing one
    /// keep their decoded values.
    pub fn decode(&mut self, data: impl Into<Bytes>) -> bool {
        Codec::default().decode(self, data.into()).is_ok()
    }

    pub(crate) fn values(&self) -> &[Value] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    pub(crate) fn set_buffer(&mut self, buffer: Bytes) {
        self.buffer = buffer;
    }
}

impl PartialEq for Message {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.schema, &other.schema) && self.values == other.values
    }
}

/// Value of a freshly constructed field of `kind`.
pub(crate) fn default_value(kind: &FieldKind) -> Value {
    match kind {
        FieldKind::Value(element) => default_element(element),
        FieldKind::Array(_) => Value::Array(Vec::new()),
        FieldKind::Map(..) => Value::Map(StreamMap::new()),
    }
}

fn default_element(kind: &ElementKind) -> Value {
    match kind {
        ElementKind::Scalar(kind) => scalar::zero(*kind),
        ElementKind::String => Value::String(String::new()),
        ElementKind::Message(schema) => Value::from(Message::new(schema)),
    }
}
