//! Bounds-checked read and write cursors
//!
//! Every access is checked against the buffer end and fails with
//! [`Error::BufferOverrun`] instead of panicking.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::{Endianness, Error, Result};

macro_rules! put_numeric {
    ($($name:ident, $ty:ty, $be:ident, $le:ident;)*) => {
        $(
            #[doc = concat!("Write a `", stringify!($ty), "` in the configured byte order")]
            pub fn $name(&mut self, v: $ty) -> Result<()> {
                self.reserve(size_of::<$ty>())?;
                match self.endianness {
                    Endianness::Big => self.buf.$be(v),
                    Endianness::Little => self.buf.$le(v),
                }
                Ok(())
            }
        )*
    };
}

macro_rules! get_numeric {
    ($($name:ident, $ty:ty, $be:ident, $le:ident;)*) => {
        $(
            #[doc = concat!("Read a `", stringify!($ty), "` in the configured byte order")]
            pub fn $name(&mut self) -> Result<$ty> {
                self.ensure(size_of::<$ty>())?;
                Ok(match self.endianness {
                    Endianness::Big => self.buf.$be(),
                    Endianness::Little => self.buf.$le(),
                })
            }
        )*
    };
}

/// Write cursor over a buffer of fixed capacity.
#[derive(Debug)]
pub struct Writer {
    buf: BytesMut,
    limit: usize,
    endianness: Endianness,
}

impl Writer {
    /// Writer that accepts exactly `limit` bytes
    #[must_use]
    pub fn with_limit(limit: usize, endianness: Endianness) -> Self {
        Self {
            buf: BytesMut::with_capacity(limit),
            limit,
            endianness,
        }
    }

    /// Bytes written so far
    #[must_use]
    pub fn offset(&self) -> usize {
        self.buf.len()
    }

    /// Bytes that can still be written
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.limit - self.buf.len()
    }

    fn reserve(&mut self, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(Error::BufferOverrun {
                offset: self.offset(),
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Write a single byte
    pub fn put_u8(&mut self, v: u8) -> Result<()> {
        self.reserve(1)?;
        self.buf.put_u8(v);
        Ok(())
    }

    /// Write a single signed byte
    pub fn put_i8(&mut self, v: i8) -> Result<()> {
        self.reserve(1)?;
        self.buf.put_i8(v);
        Ok(())
    }

    put_numeric! {
        put_i16, i16, put_i16, put_i16_le;
        put_u16, u16, put_u16, put_u16_le;
        put_i32, i32, put_i32, put_i32_le;
        put_u32, u32, put_u32, put_u32_le;
        put_f32, f32, put_f32, put_f32_le;
        put_f64, f64, put_f64, put_f64_le;
    }

    /// Write raw bytes
    pub fn put_slice(&mut self, src: &[u8]) -> Result<()> {
        self.reserve(src.len())?;
        self.buf.put_slice(src);
        Ok(())
    }

    /// Finish writing and hand out the buffer
    #[must_use]
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Read cursor over a received frame.
#[derive(Debug)]
pub struct Reader {
    buf: Bytes,
    len: usize,
    endianness: Endianness,
}

impl Reader {
    /// Start reading at the first byte of `buf`
    #[must_use]
    pub fn new(buf: Bytes, endianness: Endianness) -> Self {
        let len = buf.len();
        Self {
            buf,
            len,
            endianness,
        }
    }

    /// Bytes consumed so far
    #[must_use]
    pub fn offset(&self) -> usize {
        self.len - self.buf.remaining()
    }

    /// Bytes left to read
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn ensure(&self, needed: usize) -> Result<()> {
        if needed > self.remaining() {
            return Err(Error::BufferOverrun {
                offset: self.offset(),
                needed,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Read a single byte
    pub fn get_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    /// Read a single signed byte
    pub fn get_i8(&mut self) -> Result<i8> {
        self.ensure(1)?;
        Ok(self.buf.get_i8())
    }

    get_numeric! {
        get_i16, i16, get_i16, get_i16_le;
        get_u16, u16, get_u16, get_u16_le;
        get_i32, i32, get_i32, get_i32_le;
        get_u32, u32, get_u32, get_u32_le;
        get_f32, f32, get_f32, get_f32_le;
        get_f64, f64, get_f64, get_f64_le;
    }

    /// Take the next `len` bytes without copying
    pub fn take(&mut self, len: usize) -> Result<Bytes> {
        self.ensure(len)?;
        Ok(self.buf.split_to(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_respect_endianness() {
        let mut big = Writer::with_limit(4, Endianness::Big);
        big.put_u32(0x0102_0304).unwrap();
        assert_eq!(big.freeze().as_ref(), &[1, 2, 3, 4]);

        let mut little = Writer::with_limit(4, Endianness::Little);
        little.put_u32(0x0102_0304).unwrap();
        assert_eq!(little.freeze().as_ref(), &[4, 3, 2, 1]);
    }

    #[test]
    fn write_past_limit_is_overrun() {
        let mut writer = Writer::with_limit(3, Endianness::Big);
        writer.put_u16(7).unwrap();
        let err = writer.put_i32(1).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferOverrun {
                offset: 2,
                needed: 4,
                available: 1
            }
        ));
        assert_eq!(writer.offset(), 2);
    }

    #[test]
    fn read_past_end_is_overrun() {
        let mut reader = Reader::new(Bytes::from_static(&[0, 0, 0, 9, 1]), Endianness::Big);
        assert_eq!(reader.get_i32().unwrap(), 9);
        assert_eq!(reader.offset(), 4);
        assert!(matches!(
            reader.get_u16(),
            Err(Error::BufferOverrun { offset: 4, .. })
        ));
        assert_eq!(reader.take(1).unwrap().as_ref(), &[1]);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn floats_roundtrip_bit_exact() {
        let mut writer = Writer::with_limit(12, Endianness::Little);
        writer.put_f32(-0.0).unwrap();
        writer.put_f64(f64::MIN_POSITIVE).unwrap();
        let mut reader = Reader::new(writer.freeze(), Endianness::Little);
        assert_eq!(reader.get_f32().unwrap().to_bits(), (-0.0f32).to_bits());
        assert_eq!(reader.get_f64().unwrap(), f64::MIN_POSITIVE);
    }
}
