use std::io::{Error, Read, Write};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::serial::{ReadFrom, WriteTo};

/// A variable-length integer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VarInt(pub i32);

impl VarInt {
    /// The maximum number of bytes a `VarInt` can be.
    pub const MAX_SIZE: usize = 5;

    /// Returns the exact number of bytes this `VarInt` will occupy on the
    /// wire, assuming no error occurs.
    #[must_use]
    pub fn written_size(val: i32) -> usize {
        match val {
            0 => 1,
            n => (31 - n.leading_zeros() as usize) / 7 + 1,
        }
    }

    /// Reads a `VarInt` from an async reader.
    ///
    /// # Errors
    /// - If the `VarInt` is overlong.
    pub async fn read_async(read: &mut (impl AsyncRead + Unpin)) -> Result<i32, Error> {
        let mut val = 0;
        for i in 0..Self::MAX_SIZE {
            let byte = read
                .read_u8()
                .await
                .map_err(|err| Error::new(err.kind(), "VarInt"))?;
            val |= (i32::from(byte) & 0x7F) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(val);
            }
        }
        Err(Error::other("VarInt too long"))
    }

    /// Writes a `VarInt` to an async writer.
    ///
    /// # Errors
    /// - If the writer fails to write.
    pub async fn write_async(self, write: &mut (impl AsyncWrite + Unpin)) -> Result<(), Error> {
        let mut val = self.0;
        loop {
            let b: u8 = (val as u8) & 0b0111_1111;
            val = ((val as u32) >> 7) as i32;
            write
                .write_u8(if val == 0 { b } else { b | 0b1000_0000 })
                .await?;
            if val == 0 {
                break;
            }
        }
        Ok(())
    }
}

#[allow(missing_docs)]
impl ReadFrom for VarInt {
    fn read(read: &mut impl Read) -> Result<Self, Error> {
        let mut val = 0;
        for i in 0..Self::MAX_SIZE {
            let byte = u8::read(read)?;
            val |= (i32::from(byte) & 0x7F) << (i * 7);
            if byte & 0x80 == 0 {
                return Ok(Self(val));
            }
        }
        Err(Error::other("VarInt too long"))
    }
}

#[allow(missing_docs)]
impl WriteTo for VarInt {
    fn write(&self, writer: &mut impl Write) -> Result<(), Error> {
        let mut val = self.0;
        loop {
            let b: u8 = val as u8 & 0x7F;
            // Logical shift so negative values terminate after five bytes.
            val = ((val as u32) >> 7) as i32;
            if val == 0 {
                b.write(writer)?;
                break;
            }
            (b | 0x80).write(writer)?;
        }
        Ok(())
    }
}

#[allow(missing_docs)]
impl From<usize> for VarInt {
    fn from(value: usize) -> Self {
        Self(value as _)
    }
}

#[allow(missing_docs)]
impl From<VarInt> for usize {
    fn from(value: VarInt) -> usize {
        value.0 as _
    }
}

#[allow(missing_docs)]
impl From<i32> for VarInt {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

#[allow(missing_docs)]
impl From<VarInt> for i32 {
    fn from(value: VarInt) -> i32 {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_varint_read_write() {
        let test_values = vec![
            0i32,
            1,
            127,
            128,
            255,
            25565,
            2_097_151,
            2_147_483_647,
            -1,
            -2_147_483_648,
        ];

        for val in test_values {
            let var_int = VarInt(val);
            let mut buf = Vec::new();
            var_int.write(&mut buf).expect("write failed");

            let mut cursor = Cursor::new(buf.as_slice());
            let read_val = VarInt::read(&mut cursor).expect("read failed");
            assert_eq!(read_val, var_int, "Failed for value {val}");
        }
    }

    #[test]
    fn test_varint_known_encodings() {
        let cases: Vec<(i32, &[u8])> = vec![
            (0, &[0x00]),
            (1, &[0x01]),
            (127, &[0x7F]),
            (128, &[0x80, 0x01]),
            (255, &[0xFF, 0x01]),
            (-1, &[0xFF, 0xFF, 0xFF, 0xFF, 0x0F]),
        ];

        for (val, expected) in cases {
            let mut buf = Vec::new();
            VarInt(val).write(&mut buf).expect("write failed");
            assert_eq!(buf, expected, "Failed for value {val}");
        }
    }

    #[test]
    fn test_varint_written_size() {
        for val in [0, 1, 127, 128, 16383, 16384, 2_097_151, -1, i32::MAX] {
            let mut buf = Vec::new();
            VarInt(val).write(&mut buf).expect("write failed");
            assert_eq!(buf.len(), VarInt::written_size(val), "Failed for {val}");
        }
    }

    #[test]
    fn test_varint_overlong_rejected() {
        let mut cursor = Cursor::new([0xFFu8; 6].as_slice());
        assert!(VarInt::read(&mut cursor).is_err());
    }
}
