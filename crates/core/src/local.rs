//! Local filesystem backend
//!
//! Filesystem errors are returned exactly as the OS reports them. Only
//! `exists` turns a missing path into a value instead of an error.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use crate::error::Result;
use crate::traits::{ByteReader, SeekableReader};

/// Mode for directories created on write (owner only)
pub const DIR_MODE: u32 = 0o700;

/// Serves paths from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBackend;

impl LocalBackend {
    /// Open a file for reading
    pub async fn read(&self, path: &Path) -> Result<ByteReader> {
        let file = fs::File::open(path).await?;
        Ok(Box::new(file))
    }

    /// Create parent directories, then create or truncate the file and copy
    /// all of `input` into it
    ///
    /// A failed copy leaves whatever bytes were already written in place.
    pub async fn write(&self, path: &Path, input: &mut dyn SeekableReader) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            let mut builder = fs::DirBuilder::new();
            builder.recursive(true);
            #[cfg(unix)]
            builder.mode(DIR_MODE);
            builder.create(parent).await?;
        }

        let mut file = fs::File::create(path).await?;
        let written = tokio::io::copy(input, &mut file).await?;
        tokio::io::AsyncWriteExt::flush(&mut file).await?;

        tracing::debug!(path = %path.display(), bytes = written, "wrote local file");
        Ok(())
    }

    /// Remove a file
    pub async fn delete(&self, path: &Path) -> Result<()> {
        fs::remove_file(path).await?;
        Ok(())
    }

    /// Stat a path. Missing is `Ok(false)`, any other failure is an error.
    pub async fn exists(&self, path: &Path) -> Result<bool> {
        match fs::metadata(path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Names of the entries directly inside a directory, in the order the
    /// filesystem returns them
    pub async fn list_files(&self, path: &Path) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}
