//! PathStore trait definition
//!
//! The capability set every backend, the unified client and the in-memory
//! test double expose. Callers program against this trait and never learn
//! which backend serviced a path.

use std::io::SeekFrom;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncSeek, AsyncSeekExt};

use crate::error::{Error, Result};

/// Byte stream returned by [`PathStore::read`]. The caller owns it and
/// releases it by dropping.
pub type ByteReader = Box<dyn AsyncRead + Send + Unpin>;

/// Input accepted by [`PathStore::write_stream`]
pub trait SeekableReader: AsyncRead + AsyncSeek + Send + Unpin {}

impl<T: AsyncRead + AsyncSeek + Send + Unpin> SeekableReader for T {}

/// Read, write, delete, list and test existence of data by path
#[async_trait]
pub trait PathStore: Send + Sync {
    /// Open the data at `path` for reading
    async fn read(&self, path: &str) -> Result<ByteReader>;

    /// Write `data` to `path`, replacing anything already there
    async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        let mut input = std::io::Cursor::new(data.to_vec());
        self.write_stream(path, &mut input).await
    }

    /// Write everything from the start of `input` to `path`
    ///
    /// The input is rewound to offset 0 first, so its current position
    /// does not matter.
    async fn write_stream(&self, path: &str, input: &mut dyn SeekableReader) -> Result<()>;

    /// Delete the data at `path`
    async fn delete(&self, path: &str) -> Result<()>;

    /// List the names directly under `path` without recursing
    async fn list_files(&self, path: &str) -> Result<Vec<String>>;

    /// Whether anything exists at `path`. A missing path is `Ok(false)`.
    async fn exists(&self, path: &str) -> Result<bool>;
}

/// Rewind `input` to offset 0
///
/// Fails with [`Error::SeekFailed`] if the seek errors or lands anywhere
/// other than the start.
pub async fn rewind(input: &mut dyn SeekableReader) -> Result<()> {
    match input.seek(SeekFrom::Start(0)).await {
        Ok(0) => Ok(()),
        Ok(pos) => Err(Error::SeekFailed(format!("landed at offset {pos}"))),
        Err(e) => Err(Error::SeekFailed(e.to_string())),
    }
}
