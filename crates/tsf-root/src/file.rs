//! TFile header parsing and the top-level `RootFile` interface.

use std::borrow::Cow;
use std::fs;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use tsf_core::{Hist1D, Hist2D, Table, TableProvider};

use crate::directory::Directory;
use crate::error::{Result, RootError};
use crate::key::{Key, KeyInfo};
use crate::objects;
use crate::rbuffer::RBuffer;

const ROOT_MAGIC: &[u8; 4] = b"root";

/// Smallest file that can hold a complete header.
const MIN_FILE_LEN: usize = 64;

/// File format versions at or above this use 64-bit seek pointers.
const LARGE_FILE_VERSION: u32 = 1_000_000;

/// File bytes: memory-mapped from disk, or owned (tests, in-memory buffers).
enum Bytes {
    Owned(Vec<u8>),
    Mapped(memmap2::Mmap),
}

impl Deref for Bytes {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Bytes::Owned(v) => v,
            Bytes::Mapped(m) => m,
        }
    }
}

/// A ROOT file opened for reading histograms.
pub struct RootFile {
    data: Bytes,
    is_large: bool,
    top: Directory,
    path: PathBuf,
}

impl std::fmt::Debug for RootFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RootFile")
            .field("path", &self.path)
            .field("len", &self.data.len())
            .field("keys", &self.top.keys().len())
            .finish()
    }
}

impl RootFile {
    /// Open and parse a ROOT file from disk using memory mapping.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = fs::File::open(&path)?;
        // SAFETY: the mapping is read-only; calibration artifacts are not
        // modified while a store is being built from them.
        let mmap = unsafe { memmap2::Mmap::map(&file)? };
        Self::parse(Bytes::Mapped(mmap), path)
    }

    /// Parse a ROOT file held in memory. `path` is only used in diagnostics.
    pub fn from_bytes(data: Vec<u8>, path: impl Into<PathBuf>) -> Result<Self> {
        Self::parse(Bytes::Owned(data), path.into())
    }

    /// File header layout (small files; seek fields are u64 for large ones):
    /// ```text
    /// offset  size  field
    ///    0      4   magic "root"
    ///    4      4   fVersion
    ///    8      4   fBEGIN
    ///   12      4   fEND
    ///   16      4   fSeekFree
    ///   20      4   fNbytesFree
    ///   24      4   nfree
    ///   28      4   fNbytesName
    ///   32      1   fUnits
    ///   33      4   fCompress
    ///   37      4   fSeekInfo
    ///   41      4   fNbytesInfo
    ///   45     18   fUUID
    /// ```
    /// The top TDirectory record follows at `fBEGIN + fNbytesName`.
    fn parse(data: Bytes, path: PathBuf) -> Result<Self> {
        if data.len() < MIN_FILE_LEN || &data[0..4] != ROOT_MAGIC {
            return Err(RootError::BadMagic);
        }

        let mut r = RBuffer::at(&data, 4);
        let version = r.read_u32()?;
        let is_large = version >= LARGE_FILE_VERSION;
        let begin = r.read_u32()? as usize;
        let _end = r.read_seek(is_large)?;
        let _seek_free = r.read_seek(is_large)?;
        let _nbytes_free = r.read_u32()?;
        let _nfree = r.read_u32()?;
        let nbytes_name = r.read_u32()? as usize;

        let dir_offset = begin + nbytes_name;
        if dir_offset >= data.len() {
            return Err(RootError::Deserialization("top directory offset past end of file".into()));
        }
        let top = Directory::read_at(&data, &data, dir_offset, is_large)?;
        log::debug!("opened {} ({} top-level keys)", path.display(), top.keys().len());

        Ok(Self { data, is_large, top, path })
    }

    /// Path this file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keys of the top-level directory.
    pub fn list_keys(&self) -> Vec<KeyInfo> {
        self.top.keys().iter().map(KeyInfo::from).collect()
    }

    /// Decode the histogram at `path` (`"name"` or `"dir/sub/name"`).
    pub fn get_table(&self, path: &str) -> Result<Table> {
        let key = self.resolve(path)?;
        let payload = key.payload(&self.data)?;
        objects::read_table(&payload, &key.class_name)
    }

    /// Whether `path` names a histogram this reader can decode.
    pub fn has_table(&self, path: &str) -> bool {
        self.resolve(path).is_ok_and(|k| objects::is_supported_class(&k.class_name))
    }

    fn resolve(&self, path: &str) -> Result<Key> {
        let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((last, dirs)) = parts.split_last() else {
            return Err(RootError::KeyNotFound(path.to_string()));
        };

        // Only subdirectories are owned; the top-level key list is borrowed.
        let mut dir: Cow<'_, Directory> = Cow::Borrowed(&self.top);
        for &part in dirs {
            let key = dir
                .find(part)
                .ok_or_else(|| RootError::KeyNotFound(format!("{} (in path {})", part, path)))?;
            if !key.is_directory() {
                return Err(RootError::Deserialization(format!(
                    "'{}' is not a directory (class: {})",
                    part, key.class_name
                )));
            }
            let payload = key.payload(&self.data)?;
            dir = Cow::Owned(Directory::read_at(&self.data, &payload, 0, self.is_large)?);
        }

        dir.find(last).cloned().ok_or_else(|| RootError::KeyNotFound(path.to_string()))
    }
}

impl TableProvider for RootFile {
    fn table_1d(&self, name: &str) -> tsf_core::Result<Hist1D> {
        match self.get_table(name) {
            Ok(Table::OneD(h)) => Ok(h),
            Ok(other) => Err(shape_error(name, "1D histogram", other.kind())),
            Err(RootError::UnsupportedClass(class)) => {
                Err(shape_error(name, "1D histogram", &class))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn table_2d(&self, name: &str) -> tsf_core::Result<Hist2D> {
        match self.get_table(name) {
            Ok(Table::TwoD(h)) => Ok(h),
            Ok(other) => Err(shape_error(name, "2D histogram", other.kind())),
            Err(RootError::UnsupportedClass(class)) => {
                Err(shape_error(name, "2D histogram", &class))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.has_table(name)
    }

    fn describe(&self) -> String {
        format!("ROOT file {}", self.path.display())
    }
}

fn shape_error(name: &str, expected: &str, found: &str) -> tsf_core::Error {
    tsf_core::Error::TableShape {
        name: name.to_string(),
        expected: expected.to_string(),
        found: found.to_string(),
    }
}
