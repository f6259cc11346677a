//! Fixed-width numeric codecs

use super::cursor::{Reader, Writer};
use super::{ScalarKind, Value};

/// Encoded width of a scalar kind.
#[must_use]
pub const fn size(kind: ScalarKind) -> usize {
    kind.size()
}

/// Write `value` as `kind`, returning the bytes written.
///
/// `Null` and NaN are written as zero. Numbers of another width are cast to
/// the declared one; floats bound for an integer kind truncate and wrap modulo
/// 2^32, and infinities become zero.
/// Returns `None` for non-numeric values so the caller can report the field.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn write(w: &mut Writer, kind: ScalarKind, value: &Value) -> super::Result<Option<usize>> {
    if !matches!(value, Value::Null) && !value.is_number() {
        return Ok(None);
    }

    let int = wrap_int(value);
    let float = value.as_f64().filter(|f| !f.is_nan()).unwrap_or(0.0);

    match kind {
        ScalarKind::I8 => w.put_i8(int as i8)?,
        ScalarKind::I16 => w.put_i16(int as i16)?,
        ScalarKind::I32 => w.put_i32(int as i32)?,
        ScalarKind::U8 => w.put_u8(int as u8)?,
        ScalarKind::U16 => w.put_u16(int as u16)?,
        ScalarKind::U32 => w.put_u32(int as u32)?,
        ScalarKind::F32 => w.put_f32(float as f32)?,
        ScalarKind::F64 => w.put_f64(float)?,
    }
    Ok(Some(kind.size()))
}

/// Integer bits of a numeric value, modulo 2^32.
///
/// Floats truncate toward zero and wrap instead of saturating; NaN and the
/// infinities become zero. Narrowing the result with `as` then wraps to the
/// target width.
#[allow(clippy::cast_possible_truncation)]
fn wrap_int(value: &Value) -> i64 {
    const MODULUS: f64 = 4_294_967_296.0;

    let float = match *value {
        Value::F32(v) => f64::from(v),
        Value::F64(v) => v,
        _ => return value.as_i64().unwrap_or(0),
    };
    if float.is_finite() {
        float.trunc().rem_euclid(MODULUS) as i64
    } else {
        0
    }
}

/// Read a value of `kind`.
pub fn read(r: &mut Reader, kind: ScalarKind) -> super::Result<Value> {
    Ok(match kind {
        ScalarKind::I8 => Value::I8(r.get_i8()?),
        ScalarKind::I16 => Value::I16(r.get_i16()?),
        ScalarKind::I32 => Value::I32(r.get_i32()?),
        ScalarKind::U8 => Value::U8(r.get_u8()?),
        ScalarKind::U16 => Value::U16(r.get_u16()?),
        ScalarKind::U32 => Value::U32(r.get_u32()?),
        ScalarKind::F32 => Value::F32(r.get_f32()?),
        ScalarKind::F64 => Value::F64(r.get_f64()?),
    })
}

/// Default value of a freshly constructed scalar field.
#[must_use]
pub const fn zero(kind: ScalarKind) -> Value {
    match kind {
        ScalarKind::I8 => Value::I8(0),
        ScalarKind::I16 => Value::I16(0),
        ScalarKind::I32 => Value::I32(0),
        ScalarKind::U8 => Value::U8(0),
        ScalarKind::U16 => Value::U16(0),
        ScalarKind::U32 => Value::U32(0),
        ScalarKind::F32 => Value::F32(0.0),
        ScalarKind::F64 => Value::F64(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Endianness;

    fn encode_one(kind: ScalarKind, value: &Value, endianness: Endianness) -> Vec<u8> {
        let mut w = Writer::with_limit(kind.size(), endianness);
        assert_eq!(write(&mut w, kind, value).unwrap(), Some(kind.size()));
        w.freeze().to_vec()
    }

    #[test]
    fn null_and_nan_write_zero() {
        assert_eq!(
            encode_one(ScalarKind::I32, &Value::Null, Endianness::Big),
            vec![0; 4]
        );
        assert_eq!(
            encode_one(ScalarKind::F64, &Value::F64(f64::NAN), Endianness::Big),
            vec![0; 8]
        );
        assert_eq!(
            encode_one(ScalarKind::U16, &Value::F32(f32::NAN), Endianness::Little),
            vec![0; 2]
        );
    }

    #[test]
    fn i16_byte_order() {
        let value = Value::I16(-2);
        assert_eq!(
            encode_one(ScalarKind::I16, &value, Endianness::Big),
            vec![0xFF, 0xFE]
        );
        assert_eq!(
            encode_one(ScalarKind::I16, &Value::I16(0x0102), Endianness::Little),
            vec![0x02, 0x01]
        );
    }

    #[test]
    fn other_numeric_widths_are_cast() {
        let bytes = encode_one(ScalarKind::U8, &Value::I32(300), Endianness::Big);
        assert_eq!(bytes, vec![44]);
        let bytes = encode_one(ScalarKind::I32, &Value::F64(4.9), Endianness::Big);
        assert_eq!(bytes, vec![0, 0, 0, 4]);
    }

    #[test]
    fn floats_wrap_into_integer_kinds() {
        let infinite = [f64::INFINITY, f64::NEG_INFINITY];
        for v in infinite {
            assert_eq!(
                encode_one(ScalarKind::I32, &Value::F64(v), Endianness::Big),
                vec![0; 4]
            );
        }
        assert_eq!(
            encode_one(ScalarKind::U16, &Value::F32(f32::INFINITY), Endianness::Big),
            vec![0; 2]
        );

        let bytes = encode_one(ScalarKind::I32, &Value::F64(4_294_967_297.0), Endianness::Big);
        assert_eq!(bytes, vec![0, 0, 0, 1]);
        let bytes = encode_one(ScalarKind::I32, &Value::F64(2_147_483_648.0), Endianness::Big);
        assert_eq!(bytes, vec![0x80, 0, 0, 0]);
        let bytes = encode_one(ScalarKind::U32, &Value::F64(-1.5), Endianness::Big);
        assert_eq!(bytes, vec![0xFF; 4]);
        let bytes = encode_one(ScalarKind::I8, &Value::F64(1e20), Endianness::Big);
        assert_eq!(bytes, vec![0]);
    }

    #[test]
    fn non_numeric_is_rejected() {
        let mut w = Writer::with_limit(4, Endianness::Big);
        let result = write(&mut w, ScalarKind::I32, &Value::from("7")).unwrap();
        assert_eq!(result, None);
        assert_eq!(w.offset(), 0);
    }

    #[test]
    fn read_every_kind() {
        let kinds = [
            (ScalarKind::I8, Value::I8(-5)),
            (ScalarKind::I16, Value::I16(-300)),
            (ScalarKind::I32, Value::I32(i32::MIN)),
            (ScalarKind::U8, Value::U8(200)),
            (ScalarKind::U16, Value::U16(65_000)),
            (ScalarKind::U32, Value::U32(u32::MAX)),
            (ScalarKind::F32, Value::F32(1.5)),
            (ScalarKind::F64, Value::F64(-2.25)),
        ];

        for (kind, value) in kinds {
            let bytes = encode_one(kind, &value, Endianness::Little);
            let mut r = Reader::new(bytes.into(), Endianness::Little);
            assert_eq!(read(&mut r, kind).unwrap(), value, "{kind}");
            assert_eq!(r.remaining(), 0);
        }
    }
}
