//! TDirectory headers and key lists.

use crate::error::{Result, RootError};
use crate::key::Key;
use crate::rbuffer::RBuffer;

/// Directory versions above this use 64-bit seek pointers.
const LARGE_DIRECTORY_VERSION: u16 = 1000;

/// A directory: the keys it lists, in file order.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    keys: Vec<Key>,
}

impl Directory {
    /// Parse a TDirectory streamer at `offset` and load its key list.
    ///
    /// ```text
    /// u16 version, u32 ctime, u32 mtime, u32 nbytes_keys, u32 nbytes_name,
    /// seek_dir, seek_parent, seek_keys (u32, or u64 if version > 1000)
    /// ```
    pub fn read_at(file: &[u8], header: &[u8], offset: usize, is_large_file: bool) -> Result<Self> {
        let mut r = RBuffer::at(header, offset);
        let version = r.read_u16()?;
        let _ctime = r.read_u32()?;
        let _mtime = r.read_u32()?;
        let _nbytes_keys = r.read_u32()?;
        let _nbytes_name = r.read_u32()?;
        let large = version > LARGE_DIRECTORY_VERSION;
        let _seek_dir = r.read_seek(large)?;
        let _seek_parent = r.read_seek(large)?;
        let seek_keys = r.read_seek(large)?;

        if seek_keys == 0 {
            return Ok(Self::default());
        }
        let seek_keys = usize::try_from(seek_keys).map_err(|_| {
            RootError::Deserialization(format!("seek_keys too large: {}", seek_keys))
        })?;
        Self::read_key_list(file, seek_keys, is_large_file)
    }

    /// Read the key list stored at `seek_keys`: a TKey header for the list
    /// itself, a u32 count, then that many TKey headers.
    pub fn read_key_list(file: &[u8], seek_keys: usize, is_large_file: bool) -> Result<Self> {
        let mut r = RBuffer::new(file);
        r.seek(seek_keys)?;
        let _list_key = Key::read(&mut r, is_large_file)?;
        let n_keys = r.read_u32()? as usize;
        let keys = (0..n_keys)
            .map(|_| Key::read(&mut r, is_large_file))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { keys })
    }

    /// All keys.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    /// Find a key by name; the highest cycle wins.
    pub fn find(&self, name: &str) -> Option<&Key> {
        self.keys.iter().filter(|k| k.name == name).max_by_key(|k| k.cycle)
    }
}
