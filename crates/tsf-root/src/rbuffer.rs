//! Cursor over ROOT's big-endian serialization format.

use crate::error::{Result, RootError};

/// `kByteCountMask`: set on the leading u32 of a streamed object that carries a byte count.
const BYTE_COUNT_MASK: u32 = 0x4000_0000;

/// `TObject::kIsReferenced`: a 2-byte process id follows the TObject header.
const K_IS_REFERENCED: u32 = 1 << 4;

/// A cursor-based reader over a byte slice.
pub struct RBuffer<'a> {
    data: &'a [u8],
    pos: usize,
}

macro_rules! read_be {
    ($(#[$doc:meta] $name:ident -> $ty:ty;)*) => {
        $(
            #[$doc]
            pub fn $name(&mut self) -> Result<$ty> {
                const N: usize = std::mem::size_of::<$ty>();
                let b = self.read_bytes(N)?;
                let mut arr = [0u8; N];
                arr.copy_from_slice(b);
                Ok(<$ty>::from_be_bytes(arr))
            }
        )*
    };
}

impl<'a> RBuffer<'a> {
    /// Create a new reader over the given bytes.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Create a reader positioned at `pos`.
    pub fn at(data: &'a [u8], pos: usize) -> Self {
        Self { data, pos }
    }

    /// Current read position.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Remaining bytes from current position.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Move to an absolute position inside the buffer.
    pub fn seek(&mut self, pos: usize) -> Result<()> {
        if pos > self.data.len() {
            return Err(RootError::BufferUnderflow {
                offset: self.pos,
                need: pos.saturating_sub(self.pos),
                have: self.remaining(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Skip `n` bytes forward.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.ensure(n)?;
        self.pos += n;
        Ok(())
    }

    /// Read a sub-slice of `n` bytes, advancing the cursor.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.ensure(n)?;
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    read_be! {
        /// Read a big-endian u16.
        read_u16 -> u16;
        /// Read a big-endian u32.
        read_u32 -> u32;
        /// Read a big-endian i32.
        read_i32 -> i32;
        /// Read a big-endian u64.
        read_u64 -> u64;
        /// Read a big-endian f32.
        read_f32 -> f32;
        /// Read a big-endian f64.
        read_f64 -> f64;
    }

    /// Read a seek pointer: u64 for large files/keys, u32 otherwise.
    pub fn read_seek(&mut self, large: bool) -> Result<u64> {
        if large { self.read_u64() } else { Ok(self.read_u32()? as u64) }
    }

    /// Read a ROOT-encoded string: one length byte, or 255 then a u32 length.
    pub fn read_string(&mut self) -> Result<String> {
        let len = match self.read_u8()? {
            255 => self.read_u32()? as usize,
            n => n as usize,
        };
        let bytes = self.read_bytes(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    /// Read a streamer version header.
    ///
    /// Returns `(version, end_pos)`, where `end_pos` is the absolute position
    /// where the object ends, or `None` when no byte count was written. The
    /// byte count covers everything after the leading u32, version included.
    pub fn read_version(&mut self) -> Result<(u16, Option<usize>)> {
        let start = self.pos;
        let raw = self.read_u32()?;
        if raw & BYTE_COUNT_MASK != 0 {
            let byte_count = (raw & !BYTE_COUNT_MASK) as usize;
            let version = self.read_u16()?;
            Ok((version, Some(start + 4 + byte_count)))
        } else {
            // No byte count: the first two bytes were the version.
            self.pos = start + 2;
            Ok(((raw >> 16) as u16, None))
        }
    }

    /// Skip a whole streamed object using its byte count.
    pub fn skip_object(&mut self, what: &str) -> Result<()> {
        match self.read_version()? {
            (_, Some(end)) => self.seek(end),
            (_, None) => Err(RootError::Deserialization(format!(
                "{} streamed without byte count",
                what
            ))),
        }
    }

    /// Read a `TObject` header (version, fUniqueID, fBits).
    pub fn read_tobject(&mut self) -> Result<()> {
        let _version = self.read_u16()?;
        let _unique_id = self.read_u32()?;
        let bits = self.read_u32()?;
        if bits & K_IS_REFERENCED != 0 {
            self.skip(2)?;
        }
        Ok(())
    }

    /// Read a `TNamed`: TObject + fName + fTitle.
    pub fn read_tnamed(&mut self) -> Result<(String, String)> {
        let (_ver, end) = self.read_version()?;
        self.read_tobject()?;
        let name = self.read_string()?;
        let title = self.read_string()?;
        if let Some(end) = end {
            self.seek(end)?;
        }
        Ok((name, title))
    }

    /// Read a `TArrayD` body: u32 length then that many f64.
    pub fn read_array_f64(&mut self) -> Result<Vec<f64>> {
        let n = self.read_u32()? as usize;
        self.ensure(n.saturating_mul(8))?;
        (0..n).map(|_| self.read_f64()).collect()
    }

    /// Read a `TArrayF` body, widened to f64.
    pub fn read_array_f32(&mut self) -> Result<Vec<f64>> {
        let n = self.read_u32()? as usize;
        self.ensure(n.saturating_mul(4))?;
        (0..n).map(|_| self.read_f32().map(f64::from)).collect()
    }

    fn ensure(&self, n: usize) -> Result<()> {
        if self.pos.checked_add(n).is_none_or(|end| end > self.data.len()) {
            return Err(RootError::BufferUnderflow {
                offset: self.pos,
                need: n,
                have: self.remaining(),
            });
        }
        Ok(())
    }
}
