//! Structural encoder/decoder
//!
//! Walks a message's schema in registration order. Encoding is two passes:
//! compute the exact size, then write every field into a buffer of that
//! size. Decoding replays the same order against a received frame.
//!
//! # Format
//!
//! ```text
//! scalar   [value: fixed width]
//! string   [length: u32] [utf8 bytes]
//! array    [count: u32] [element]*
//! map      [count: u32] ([key] [value])*
//! message  [field]*            (no framing)
//! ```

use std::sync::Arc;

use bytes::Bytes;
use tracing::{instrument, trace, warn};

use super::cursor::{Reader, Writer};
use super::metrics::Metrics;
use super::{
    CodecConfig, ElementKind, Error, FieldKind, LENGTH_PREFIX_SIZE, MapKey, MapKeyKind, Message,
    Result, Schema, StreamMap, Value, scalar, string,
};

/// Encoder/decoder bound to one configuration.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    /// Create a codec
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Get configuration
    #[must_use]
    pub const fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Exact number of bytes `message` encodes to.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidMember`] naming the first field whose value
    /// does not match its declared kind.
    pub fn encoded_size(&self, message: &Message) -> Result<usize> {
        message_size(message.schema(), message.values())
    }

    /// Encode `message`, store the result as its buffer and return it.
    ///
    /// # Errors
    ///
    /// Fails without writing anything if any field value does not match its
    /// declared kind. [`Error::BufferOverrun`] or [`Error::SizeMismatch`]
    /// mean the size and write passes disagree.
    #[instrument(level = "debug", skip_all, fields(schema = %message.schema().name()))]
    pub fn encode(&self, message: &mut Message) -> Result<Bytes> {
        let buffer = self.encode_to_bytes(message).inspect_err(|_| {
            Metrics::record_encode_failure();
        })?;
        Metrics::record_encode(buffer.len());
        message.set_buffer(buffer.clone());
        Ok(buffer)
    }

    /// Encode without touching the message's buffer
    pub fn encode_to_bytes(&self, message: &Message) -> Result<Bytes> {
        let size = self.encoded_size(message)?;
        let mut w = Writer::with_limit(size, self.config.endianness);
        write_message(&mut w, message.schema(), message.values())?;

        if w.offset() != size {
            return Err(Error::SizeMismatch {
                expected: size,
                written: w.offset(),
            });
        }

        trace!(bytes = size, "message encoded");
        Ok(w.freeze())
    }

    /// Decode `data` into `message`, replacing its buffer.
    ///
    /// # Errors
    ///
    /// Stops at the first field that fails and returns [`Error::Field`]
    /// naming it. Fields before it keep their decoded values.
    #[instrument(level = "debug", skip_all, fields(schema = %message.schema().name(), bytes = data.len()))]
    pub fn decode(&self, message: &mut Message, data: Bytes) -> Result<()> {
        let len = data.len();
        message.set_buffer(data.clone());

        let schema = Arc::clone(message.schema());
        let mut r = Reader::new(data, self.config.endianness);
        let result = read_message(&mut r, &schema, message.values_mut(), &self.config)
            .and_then(|()| self.check_trailing(&r));

        match result {
            Ok(()) => {
                Metrics::record_decode(len);
                trace!(consumed = r.offset(), "message decoded");
                Ok(())
            }
            Err(err) => {
                Metrics::record_decode_failure();
                Err(err)
            }
        }
    }

    fn check_trailing(&self, r: &Reader) -> Result<()> {
        if self.config.strict_length && r.remaining() > 0 {
            warn!(remaining = r.remaining(), "trailing bytes after last field");
            return Err(Error::TrailingBytes {
                remaining: r.remaining(),
            });
        }
        Ok(())
    }
}

/// Encode with the default configuration
pub fn encode(message: &mut Message) -> Result<Bytes> {
    Codec::default().encode(message)
}

/// Decode with the default configuration
pub fn decode(message: &mut Message, data: Bytes) -> Result<()> {
    Codec::default().decode(message, data)
}

fn invalid_member(field: &str, kind: &FieldKind, value: &Value) -> Error {
    warn!(
        field,
        expected = %kind,
        found = value.type_name(),
        "invalid serialize member"
    );
    Error::InvalidMember {
        field: field.to_owned(),
        expected: kind.to_string(),
    }
}

// Size pass

fn message_size(schema: &Schema, values: &[Value]) -> Result<usize> {
    let mut total = 0;
    for (field, value) in schema.fields().zip(values) {
        match field_size(field.kind(), value)? {
            Some(size) => total += size,
            None => return Err(invalid_member(field.storage(), field.kind(), value)),
        }
    }
    Ok(total)
}

fn field_size(kind: &FieldKind, value: &Value) -> Result<Option<usize>> {
    match (kind, value) {
        (FieldKind::Value(element), _) => element_size(element, value),
        (FieldKind::Array(element), Value::Array(items)) => {
            let mut total = LENGTH_PREFIX_SIZE;
            for item in items {
                match element_size(element, item)? {
                    Some(size) => total += size,
                    None => return Ok(None),
                }
            }
            Ok(Some(total))
        }
        (FieldKind::Map(key_kind, element), Value::Map(map)) => {
            let mut total = LENGTH_PREFIX_SIZE;
            for (key, item) in map {
                let (Some(key_bytes), Some(item_bytes)) =
                    (key_size(*key_kind, key), element_size(element, item)?)
                else {
                    return Ok(None);
                };
                total += key_bytes + item_bytes;
            }
            Ok(Some(total))
        }
        _ => Ok(None),
    }
}

fn element_size(kind: &ElementKind, value: &Value) -> Result<Option<usize>> {
    match (kind, value) {
        (ElementKind::Scalar(kind), Value::Null) => Ok(Some(scalar::size(*kind))),
        (ElementKind::Scalar(kind), v) if v.is_number() => Ok(Some(scalar::size(*kind))),
        (ElementKind::String, v) => Ok(string::value_size(v)),
        (ElementKind::Message(schema), Value::Message(nested))
            if Arc::ptr_eq(schema, nested.schema()) =>
        {
            message_size(schema, nested.values()).map(Some)
        }
        _ => Ok(None),
    }
}

fn key_size(kind: MapKeyKind, key: &MapKey) -> Option<usize> {
    match (kind, key) {
        (MapKeyKind::U32, MapKey::U32(_)) => Some(LENGTH_PREFIX_SIZE),
        (MapKeyKind::String, MapKey::String(s)) => Some(string::size(s)),
        _ => None,
    }
}

// Write pass

fn write_message(w: &mut Writer, schema: &Schema, values: &[Value]) -> Result<()> {
    for (field, value) in schema.fields().zip(values) {
        if !write_field(w, field.kind(), value)? {
            return Err(invalid_member(field.storage(), field.kind(), value));
        }
    }
    Ok(())
}

fn write_count(w: &mut Writer, len: usize) -> Result<()> {
    let count = u32::try_from(len).map_err(|_| Error::ContainerTooLarge {
        count: u32::MAX,
        max: u32::MAX,
    })?;
    w.put_u32(count)
}

fn write_field(w: &mut Writer, kind: &FieldKind, value: &Value) -> Result<bool> {
    match (kind, value) {
        (FieldKind::Value(element), _) => write_element(w, element, value),
        (FieldKind::Array(element), Value::Array(items)) => {
            write_count(w, items.len())?;
            for item in items {
                if !write_element(w, element, item)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (FieldKind::Map(key_kind, element), Value::Map(map)) => {
            write_count(w, map.len())?;
            for (key, item) in map {
                match (key_kind, key) {
                    (MapKeyKind::U32, MapKey::U32(k)) => w.put_u32(*k)?,
                    (MapKeyKind::String, MapKey::String(k)) => {
                        string::write(w, k)?;
                    }
                    _ => return Ok(false),
                }
                if !write_element(w, element, item)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn write_element(w: &mut Writer, kind: &ElementKind, value: &Value) -> Result<bool> {
    match (kind, value) {
        (ElementKind::Scalar(kind), _) => Ok(scalar::write(w, *kind, value)?.is_some()),
        (ElementKind::String, _) => Ok(string::write_value(w, value)?.is_some()),
        (ElementKind::Message(schema), Value::Message(nested))
            if Arc::ptr_eq(schema, nested.schema()) =>
        {
            write_message(w, schema, nested.values())?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

// Read pass

fn read_message(
    r: &mut Reader,
    schema: &Schema,
    values: &mut [Value],
    config: &CodecConfig,
) -> Result<()> {
    for (field, slot) in schema.fields().zip(values.iter_mut()) {
        if let Err(err) = read_field(r, field.kind(), slot, config) {
            warn!(field = field.storage(), error = %err, "invalid deserialize member");
            return Err(Error::Field {
                field: field.storage().to_owned(),
                source: Box::new(err),
            });
        }
    }
    Ok(())
}

fn read_count(r: &mut Reader, config: &CodecConfig) -> Result<u32> {
    let count = r.get_u32()?;
    if count > config.max_elements {
        return Err(Error::ContainerTooLarge {
            count,
            max: config.max_elements,
        });
    }
    Ok(count)
}

fn read_field(
    r: &mut Reader,
    kind: &FieldKind,
    slot: &mut Value,
    config: &CodecConfig,
) -> Result<()> {
    match kind {
        FieldKind::Value(element) => {
            *slot = read_element(r, element, config)?;
        }
        FieldKind::Array(element) => {
            *slot = Value::Array(Vec::new());
            let count = read_count(r, config)?;
            let mut items = Vec::with_capacity((count as usize).min(r.remaining()));
            for _ in 0..count {
                items.push(read_element(r, element, config)?);
            }
            *slot = Value::Array(items);
        }
        FieldKind::Map(key_kind, element) => {
            *slot = Value::Map(StreamMap::new());
            let count = read_count(r, config)?;
            let mut map = StreamMap::with_capacity((count as usize).min(r.remaining()));
            for _ in 0..count {
                let key = match key_kind {
                    MapKeyKind::U32 => MapKey::U32(r.get_u32()?),
                    MapKeyKind::String => MapKey::String(string::read(r)?),
                };
                map.insert(key, read_element(r, element, config)?);
            }
            *slot = Value::Map(map);
        }
    }
    Ok(())
}

fn read_element(r: &mut Reader, kind: &ElementKind, config: &CodecConfig) -> Result<Value> {
    match kind {
        ElementKind::Scalar(kind) => scalar::read(r, *kind),
        ElementKind::String => Ok(Value::String(string::read(r)?)),
        ElementKind::Message(schema) => {
            let mut nested = Message::new(schema);
            read_message(r, schema, nested.values_mut(), config)?;
            Ok(Value::from(nested))
        }
    }
}
