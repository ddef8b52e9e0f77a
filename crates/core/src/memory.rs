//! In-memory PathStore for caller unit tests
//!
//! Paths are plain map keys, so local and `s3://` paths behave the same.
//! Read, write and write_stream can each be told to fail with a fixed
//! message, which is returned before the map is touched.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

use crate::error::{Error, Result};
use crate::traits::{ByteReader, PathStore, SeekableReader, rewind};

/// Map-backed test double
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: Mutex<BTreeMap<String, Vec<u8>>>,
    /// Returned by every `read` when set
    pub read_err: Option<String>,
    /// Returned by every `write` when set
    pub write_err: Option<String>,
    /// Returned by every `write_stream` when set
    pub write_stream_err: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing contents
    pub fn with_files<I, K, V>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let files = files
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            files: Mutex::new(files),
            ..Default::default()
        }
    }

    pub fn fail_read(mut self, message: impl Into<String>) -> Self {
        self.read_err = Some(message.into());
        self
    }

    pub fn fail_write(mut self, message: impl Into<String>) -> Self {
        self.write_err = Some(message.into());
        self
    }

    pub fn fail_write_stream(mut self, message: impl Into<String>) -> Self {
        self.write_stream_err = Some(message.into());
        self
    }

    /// Copy of the stored bytes for `path`
    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.files().get(path).cloned()
    }

    /// Number of stored paths
    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }

    fn files(&self) -> MutexGuard<'_, BTreeMap<String, Vec<u8>>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn injected(message: &Option<String>) -> Result<()> {
    match message {
        Some(m) => Err(Error::backend(m.clone())),
        None => Ok(()),
    }
}

fn not_found(path: &str) -> Error {
    Error::backend(format!("File at '{path}' not found"))
}

#[async_trait]
impl PathStore for MemoryStore {
    async fn read(&self, path: &str) -> Result<ByteReader> {
        injected(&self.read_err)?;
        let data = self.get(path).ok_or_else(|| not_found(path))?;
        Ok(Box::new(std::io::Cursor::new(data)))
    }

    async fn write(&self, path: &str, data: &[u8]) -> Result<()> {
        injected(&self.write_err)?;
        self.files().insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn write_stream(&self, path: &str, input: &mut dyn SeekableReader) -> Result<()> {
        injected(&self.write_stream_err)?;
        rewind(input).await?;
        let mut data = Vec::new();
        input.read_to_end(&mut data).await?;
        self.files().insert(path.to_string(), data);
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        match self.files().remove(path) {
            Some(_) => Ok(()),
            None => Err(not_found(path)),
        }
    }

    /// Keys under `path` as a prefix, with deeper keys grouped into one
    /// `dir/` entry the way a delimited listing groups them
    async fn list_files(&self, path: &str) -> Result<Vec<String>> {
        let files = self.files();
        let mut names: Vec<String> = Vec::new();
        for key in files.keys().filter(|k| k.starts_with(path)) {
            let rest = &key[path.len()..];
            let name = match rest.find('/') {
                Some(pos) => &rest[..=pos],
                None => rest,
            };
            if !name.is_empty() && names.last().map(String::as_str) != Some(name) {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(self.files().contains_key(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_string(store: &MemoryStore, path: &str) -> String {
        let mut reader = match store.read(path).await {
            Ok(r) => r,
            Err(e) => panic!("read failed: {e}"),
        };
        let mut out = String::new();
        reader.read_to_string(&mut out).await.unwrap();
        out
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = MemoryStore::new();
        store.write("s3://bucket/key", b"value").await.unwrap();
        assert_eq!(read_string(&store, "s3://bucket/key").await, "value");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_write_stream_rewinds() {
        let store = MemoryStore::new();
        let mut input = std::io::Cursor::new(b"from the start".to_vec());
        input.set_position(5);
        store.write_stream("/tmp/out", &mut input).await.unwrap();
        assert_eq!(store.get("/tmp/out").unwrap(), b"from the start");
    }

    #[tokio::test]
    async fn test_injected_errors() {
        let store = MemoryStore::with_files([("a", "1")])
            .fail_read("read broke")
            .fail_write("write broke")
            .fail_write_stream("stream broke");

        let err = match store.read("a").await {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert_eq!(err.to_string(), "read broke");

        let err = store.write("b", b"2").await.unwrap_err();
        assert_eq!(err.to_string(), "write broke");

        let mut input = std::io::Cursor::new(b"3".to_vec());
        let err = store.write_stream("c", &mut input).await.unwrap_err();
        assert_eq!(err.to_string(), "stream broke");

        assert_eq!(store.len(), 1);
        assert!(store.get("b").is_none());
    }

    #[tokio::test]
    async fn test_read_missing() {
        let store = MemoryStore::new();
        let err = match store.read("nope").await {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert_eq!(err.to_string(), "File at 'nope' not found");
    }

    #[tokio::test]
    async fn test_exists_and_delete() {
        let store = MemoryStore::with_files([("k", "v")]);
        assert!(store.exists("k").await.unwrap());

        store.delete("k").await.unwrap();
        assert!(!store.exists("k").await.unwrap());
        assert!(!store.exists("k").await.unwrap());
        assert!(store.delete("k").await.is_err());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_list_files_groups_nested() {
        let store = MemoryStore::with_files([
            ("s3://b/dir/a.txt", "1"),
            ("s3://b/dir/b.txt", "2"),
            ("s3://b/dir/sub/c.txt", "3"),
            ("s3://b/dir/sub/d.txt", "4"),
            ("s3://b/other.txt", "5"),
        ]);

        let names = store.list_files("s3://b/dir/").await.unwrap();
        assert_eq!(names, vec!["a.txt", "b.txt", "sub/"]);
    }

    #[tokio::test]
    async fn test_shared_across_tasks() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .write(&format!("file-{i}"), i.to_string().as_bytes())
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(store.len(), 8);
    }
}
