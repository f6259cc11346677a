//! Length-prefixed UTF-8 string codec
//!
//! ```text
//! [length: u32] [utf8 bytes: length]
//! ```

use super::cursor::{Reader, Writer};
use super::{LENGTH_PREFIX_SIZE, Result, Value};

/// Encoded size of `s`, prefix included.
#[must_use]
pub const fn size(s: &str) -> usize {
    LENGTH_PREFIX_SIZE + s.len()
}

/// Encoded size of a string field value; `Null` counts as the empty string.
#[must_use]
pub fn value_size(value: &Value) -> Option<usize> {
    match value {
        Value::Null => Some(LENGTH_PREFIX_SIZE),
        Value::String(s) => Some(size(s)),
        _ => None,
    }
}

/// Write `s` with its length prefix, returning the bytes written.
pub fn write(w: &mut Writer, s: &str) -> Result<usize> {
    let len = u32::try_from(s.len()).map_err(|_| super::Error::BufferOverrun {
        offset: w.offset(),
        needed: s.len(),
        available: w.remaining(),
    })?;
    w.put_u32(len)?;
    w.put_slice(s.as_bytes())?;
    Ok(size(s))
}

/// Write a string field value; `Null` is written as the empty string.
pub fn write_value(w: &mut Writer, value: &Value) -> Result<Option<usize>> {
    match value {
        Value::Null => write(w, "").map(Some),
        Value::String(s) => write(w, s).map(Some),
        _ => Ok(None),
    }
}

/// Read a length-prefixed string. The text is fully decoded before the
/// cursor moves on to the next field.
pub fn read(r: &mut Reader) -> Result<String> {
    let len = r.get_u32()? as usize;
    let bytes = r.take(len)?;
    Ok(String::from_utf8(bytes.to_vec())?)
}
