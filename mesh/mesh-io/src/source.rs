//! Byte sources an STL can be read from.
//!
//! A source hands out a fresh reader positioned at the first byte every
//! time [`StlSource::open`] is called. Callers acquire a reader for exactly
//! the span of one operation (a sniff, a decode) and drop it afterwards, so
//! no stream position is shared between operations.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{IoError, IoResult};

/// Something that can repeatedly produce a reader over STL bytes.
pub trait StlSource {
    /// Reader type produced by [`open`](Self::open).
    type Reader: Read;

    /// Open a new reader positioned at the start of the data.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying data cannot be opened.
    fn open(&self) -> IoResult<Self::Reader>;

    /// Total length of the data in bytes, if it can be determined.
    ///
    /// # Errors
    ///
    /// Returns an error if querying the length fails.
    fn byte_len(&self) -> IoResult<Option<u64>>;
}

/// An STL file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a source for the file at `path`. Nothing is opened yet.
    #[must_use]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StlSource for FileSource {
    type Reader = BufReader<File>;

    fn open(&self) -> IoResult<Self::Reader> {
        let file = File::open(&self.path).map_err(|e| IoError::from_open(e, &self.path))?;
        Ok(BufReader::new(file))
    }

    fn byte_len(&self) -> IoResult<Option<u64>> {
        let meta = std::fs::metadata(&self.path).map_err(|e| IoError::from_open(e, &self.path))?;
        Ok(Some(meta.len()))
    }
}

impl fmt::Display for FileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// STL bytes held in memory, e.g. an upload that was never written to disk.
#[derive(Debug, Clone)]
pub struct MemorySource {
    bytes: Arc<[u8]>,
}

impl MemorySource {
    /// Wrap a byte buffer.
    #[must_use]
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    /// The wrapped bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl StlSource for MemorySource {
    type Reader = Cursor<Arc<[u8]>>;

    fn open(&self) -> IoResult<Self::Reader> {
        Ok(Cursor::new(Arc::clone(&self.bytes)))
    }

    fn byte_len(&self) -> IoResult<Option<u64>> {
        Ok(Some(self.as_bytes().len() as u64))
    }
}

impl fmt::Display for MemorySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<memory: {} bytes>", self.as_bytes().len())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn memory_source_shares_its_buffer() {
        let source = MemorySource::new(vec![9u8, 8, 7]);
        let copy = source.clone();
        assert_eq!(source.as_bytes(), &[9, 8, 7]);
        assert!(std::ptr::eq(source.as_bytes(), copy.as_bytes()));
        assert_eq!(source.byte_len().unwrap(), Some(3));
        assert_eq!(source.to_string(), "<memory: 3 bytes>");
    }

    #[test]
    fn memory_source_reopens_from_start() {
        let source = MemorySource::new(vec![1u8, 2, 3, 4]);

        let mut first = Vec::new();
        source.open().unwrap().read_to_end(&mut first).unwrap();
        let mut second = Vec::new();
        source.open().unwrap().read_to_end(&mut second).unwrap();

        assert_eq!(first, vec![1, 2, 3, 4]);
        assert_eq!(first, second);
        assert_eq!(source.byte_len().unwrap(), Some(4));
    }

    #[test]
    fn missing_file_is_not_found() {
        let source = FileSource::new("definitely_missing_12345.stl");
        assert!(matches!(source.open(), Err(IoError::FileNotFound { .. })));
        assert!(matches!(source.byte_len(), Err(IoError::FileNotFound { .. })));
    }

    #[test]
    fn file_source_reports_length() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("five.bin");
        std::fs::write(&path, b"12345").unwrap();

        let source = FileSource::new(&path);
        assert_eq!(source.byte_len().unwrap(), Some(5));
        assert_eq!(source.path(), path.as_path());
        assert!(source.to_string().ends_with("five.bin"));
    }
}
