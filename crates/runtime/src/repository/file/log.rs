//! Append-only log file repository.
//!
//! This module provides a generic `FileRepository<T>` that can store any
//! serializable type in an append-only log format. The action log is built on
//! it.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, ErrorKind, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Serialize, de::DeserializeOwned};

use crate::repository::{RepositoryError, Result};

/// Generic file-based repository for append-only logs.
///
/// Stores items of type `T` in a file using the format:
/// ```text
/// [u32 length][bincode serialized T]
/// [u32 length][bincode serialized T]
/// ...
/// ```
pub struct FileRepository<T> {
    /// Filename without the directory
    name: String,
    path: PathBuf,
    writer: BufWriter<File>,
    _phantom: PhantomData<T>,
}

impl<T> FileRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open or create a file repository.
    ///
    /// Creates the directory and file if they don't exist. An existing file
    /// whose last frame was cut short by a crash is truncated back to its
    /// last complete frame before anything is appended.
    pub fn open_or_create(base_dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let base_dir = base_dir.as_ref();
        std::fs::create_dir_all(base_dir).map_err(RepositoryError::Io)?;

        let filename = filename.as_ref();
        let path = base_dir.join(filename);

        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(&path)
            .map_err(RepositoryError::Io)?;

        let file_size = file.metadata().map_err(RepositoryError::Io)?.len();
        let complete = complete_prefix_len(&file, file_size)?;
        if complete < file_size {
            tracing::warn!(
                "Dropping {} bytes of a torn entry at the end of {}",
                file_size - complete,
                path.display()
            );
            file.set_len(complete).map_err(RepositoryError::Io)?;
        }

        let writer = BufWriter::with_capacity(64 * 1024, file);

        tracing::debug!(
            "Opened/created repository: {} at offset {}",
            path.display(),
            complete
        );

        Ok(Self {
            name: filename.to_string(),
            path,
            writer,
            _phantom: PhantomData,
        })
    }

    /// Append an item to the log.
    pub fn append(&mut self, item: &T) -> Result<()> {
        let bytes =
            bincode::serialize(item).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
        let len = u32::try_from(bytes.len()).map_err(|_| {
            RepositoryError::Serialization(format!("entry of {} bytes is too large", bytes.len()))
        })?;

        // Write [length][data]
        self.writer
            .write_all(&len.to_le_bytes())
            .map_err(RepositoryError::Io)?;
        self.writer.write_all(&bytes).map_err(RepositoryError::Io)?;

        Ok(())
    }

    /// Read every entry from the start of the log.
    ///
    /// Buffered writes are flushed first so the reader sees them.
    pub fn read_all(&mut self) -> Result<Vec<T>> {
        self.flush()?;

        let file = File::open(&self.path).map_err(RepositoryError::Io)?;
        let mut reader = BufReader::new(file);
        let mut items = Vec::new();
        while let Some(item) = read_frame(&mut reader)? {
            items.push(item);
        }
        Ok(items)
    }

    /// Flush buffered writes to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(RepositoryError::Io)?;
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Length in bytes of the run of complete frames at the start of `file`.
///
/// Only frame boundaries are checked; payloads are not decoded.
fn complete_prefix_len(file: &File, file_size: u64) -> Result<u64> {
    let mut reader = BufReader::new(file);
    reader.seek(SeekFrom::Start(0)).map_err(RepositoryError::Io)?;

    let mut offset = 0u64;
    let mut len_bytes = [0u8; 4];
    while offset + 4 <= file_size {
        reader
            .read_exact(&mut len_bytes)
            .map_err(RepositoryError::Io)?;
        let len = u64::from(u32::from_le_bytes(len_bytes));
        let next = offset + 4 + len;
        if next > file_size {
            break;
        }
        reader
            .seek_relative(len as i64)
            .map_err(RepositoryError::Io)?;
        offset = next;
    }
    Ok(offset)
}

/// Reads one `[len][payload]` frame. `Ok(None)` at a clean end of file.
fn read_frame<T, R>(reader: &mut R) -> Result<Option<T>>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut len_bytes = [0u8; 4];
    match reader.read_exact(&mut len_bytes) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Ok(None),
        Err(e) => return Err(RepositoryError::Io(e)),
    }
    let len = u32::from_le_bytes(len_bytes) as usize;

    let mut data = vec![0u8; len];
    reader.read_exact(&mut data).map_err(|e| match e.kind() {
        ErrorKind::UnexpectedEof => {
            RepositoryError::CorruptedData(format!("entry promises {len} bytes past end of log"))
        }
        _ => RepositoryError::Io(e),
    })?;

    let item =
        bincode::deserialize(&data).map_err(|e| RepositoryError::Serialization(e.to_string()))?;
    Ok(Some(item))
}

impl<T> Drop for FileRepository<T> {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            tracing::warn!("Failed to flush repository '{}' on drop: {}", self.name, e);
        }
    }
}
