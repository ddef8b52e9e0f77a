//! pio-s3: S3 backend and unified client for pio
//!
//! This crate provides the remote half of pio and the client that routes
//! between local files and S3 objects. It is the only crate that directly
//! depends on the AWS SDK.
//!
//! The free functions below use a process-wide default [`Client`] with
//! encryption on and no region override. Build a [`Client`] directly for
//! anything else.
//!
//! The default client loads its SDK configuration once, HTTP connection
//! pool included, and keeps it for the life of the process. Pooled
//! connections are tied to the tokio runtime that opened them, so use the
//! free functions from a single runtime. Code that starts several runtimes
//! (separate `#[tokio::test]`s, for example) should build a [`Client`] per
//! runtime.

use std::sync::LazyLock;

use pio_core::{ByteReader, PathStore, Result, SeekableReader};

pub mod client;
pub mod handler;
pub mod live;
pub mod remote;
pub mod resolver;

#[cfg(test)]
mod testing;

pub use client::Client;
pub use handler::{HandlerFactory, HeadError, ListPage, ListRequest, PutRequest, S3Handler};
pub use live::{LiveHandler, LiveHandlerFactory};
pub use remote::RemoteBackend;
pub use resolver::{Connection, DEFAULT_REGION, region_for_bucket, resolve};

static DEFAULT_CLIENT: LazyLock<Client> = LazyLock::new(Client::default);

/// The process-wide default client
///
/// Meant for use from one tokio runtime; see the crate docs.
pub fn default_client() -> &'static Client {
    &DEFAULT_CLIENT
}

/// Read `path` with the default client
pub async fn read(path: &str) -> Result<ByteReader> {
    default_client().read(path).await
}

/// Write `data` to `path` with the default client
pub async fn write(path: &str, data: &[u8]) -> Result<()> {
    default_client().write(path, data).await
}

/// Write `input` to `path` with the default client
pub async fn write_stream(path: &str, input: &mut dyn SeekableReader) -> Result<()> {
    default_client().write_stream(path, input).await
}

/// Delete `path` with the default client
pub async fn delete(path: &str) -> Result<()> {
    default_client().delete(path).await
}

/// List `path` with the default client
pub async fn list_files(path: &str) -> Result<Vec<String>> {
    default_client().list_files(path).await
}

/// Check `path` with the default client
pub async fn exists(path: &str) -> Result<bool> {
    default_client().exists(path).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_default_functions_on_local_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("writeToPathTest");
        let path = path.to_str().unwrap();

        write(path, b"testout").await.unwrap();
        assert!(exists(path).await.unwrap());

        let mut reader = match read(path).await {
            Ok(r) => r,
            Err(e) => panic!("read failed: {e}"),
        };
        let mut text = String::new();
        reader.read_to_string(&mut text).await.unwrap();
        assert_eq!(text, "testout");

        let mut input = std::io::Cursor::new(b"second".to_vec());
        write_stream(path, &mut input).await.unwrap();
        assert_eq!(std::fs::read(path).unwrap(), b"second");

        let names = list_files(dir.path().to_str().unwrap()).await.unwrap();
        assert_eq!(names, vec!["writeToPathTest"]);

        delete(path).await.unwrap();
        assert!(!exists(path).await.unwrap());
    }

    #[test]
    fn test_default_client_is_shared() {
        assert!(std::ptr::eq(default_client(), default_client()));
        assert!(!default_client().config().disable_encryption);
    }
}
