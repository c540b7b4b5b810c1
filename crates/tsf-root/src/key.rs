//! TKey records: where each named object lives in the file.

use crate::decompress::decompress;
use crate::error::{Result, RootError};
use crate::rbuffer::RBuffer;

/// Key versions above this use 64-bit seek pointers.
const LARGE_KEY_VERSION: u16 = 1000;

/// A parsed TKey header.
#[derive(Debug, Clone)]
pub struct Key {
    /// Compressed object size plus key header.
    pub n_bytes: u32,
    /// Uncompressed object size.
    pub obj_len: u32,
    /// Size of the key header itself.
    pub key_len: u16,
    /// Cycle number; the highest cycle is the current version of an object.
    pub cycle: u16,
    /// Absolute file position of this key.
    pub seek_key: u64,
    /// Stored class name (e.g. "TH2F").
    pub class_name: String,
    /// Object name.
    pub name: String,
}

/// Public view of a key, as returned by `RootFile::list_keys`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInfo {
    /// Object name.
    pub name: String,
    /// Object class name.
    pub class_name: String,
    /// Cycle number.
    pub cycle: u16,
}

impl From<&Key> for KeyInfo {
    fn from(key: &Key) -> Self {
        Self { name: key.name.clone(), class_name: key.class_name.clone(), cycle: key.cycle }
    }
}

impl Key {
    /// Read a TKey header at the reader's position.
    pub fn read(r: &mut RBuffer, is_large_file: bool) -> Result<Self> {
        let n_bytes = r.read_u32()?;
        let version = r.read_u16()?;
        let obj_len = r.read_u32()?;
        let _datime = r.read_u32()?;
        let key_len = r.read_u16()?;
        let cycle = r.read_u16()?;
        let large = is_large_file || version > LARGE_KEY_VERSION;
        let seek_key = r.read_seek(large)?;
        let _seek_pdir = r.read_seek(large)?;
        let class_name = r.read_string()?;
        let name = r.read_string()?;
        let _title = r.read_string()?;

        if key_len as u32 > n_bytes {
            return Err(RootError::Deserialization(format!(
                "key '{}': header length {} exceeds record length {}",
                name, key_len, n_bytes
            )));
        }

        Ok(Key { n_bytes, obj_len, key_len, cycle, seek_key, class_name, name })
    }

    /// Whether the key points at a (sub)directory.
    pub fn is_directory(&self) -> bool {
        matches!(self.class_name.as_str(), "TDirectoryFile" | "TDirectory")
    }

    /// Read the object bytes of this key, decompressing if needed.
    pub fn payload(&self, file: &[u8]) -> Result<Vec<u8>> {
        let start = usize::try_from(self.seek_key).map_err(|_| {
            RootError::Deserialization(format!("seek offset too large: {}", self.seek_key))
        })?;
        let end = start.checked_add(self.n_bytes as usize).ok_or_else(|| {
            RootError::Deserialization(format!(
                "key '{}': record at {} with {} bytes runs past the address space",
                self.name, start, self.n_bytes
            ))
        })?;
        let record = file.get(start..end).ok_or(RootError::BufferUnderflow {
            offset: start,
            need: self.n_bytes as usize,
            have: file.len().saturating_sub(start),
        })?;

        let stored = record.get(self.key_len as usize..).ok_or_else(|| {
            RootError::Deserialization(format!(
                "key '{}': header length {} exceeds record length {}",
                self.name, self.key_len, self.n_bytes
            ))
        })?;
        if stored.len() == self.obj_len as usize {
            Ok(stored.to_vec())
        } else {
            decompress(stored, self.obj_len as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n_bytes: u32, obj_len: u32, key_len: u16, seek_key: u64) -> Key {
        Key {
            n_bytes,
            obj_len,
            key_len,
            cycle: 1,
            seek_key,
            class_name: "TH1D".to_string(),
            name: "h".to_string(),
        }
    }

    #[test]
    fn payload_returns_uncompressed_bytes_after_header() {
        let mut file = vec![0u8; 16];
        file[4..8].copy_from_slice(b"head");
        file[8..12].copy_from_slice(b"body");
        let bytes = key(8, 4, 4, 4).payload(&file).unwrap();
        assert_eq!(bytes, b"body");
    }

    #[test]
    fn payload_rejects_seek_at_end_of_address_space() {
        let err = key(100, 90, 10, u64::MAX - 4).payload(&[0u8; 200]).unwrap_err();
        assert!(
            matches!(err, RootError::Deserialization(_) | RootError::BufferUnderflow { .. }),
            "{}",
            err
        );
    }

    #[test]
    fn payload_rejects_record_past_end_of_file() {
        let err = key(100, 90, 10, 150).payload(&[0u8; 200]).unwrap_err();
        assert!(matches!(err, RootError::BufferUnderflow { offset: 150, need: 100, have: 50 }));
    }

    #[test]
    fn payload_rejects_header_longer_than_record() {
        let err = key(4, 0, 8, 0).payload(&[0u8; 16]).unwrap_err();
        assert!(matches!(err, RootError::Deserialization(_)), "{}", err);
    }
}
