//! Unified path-routed client
//!
//! Classifies each path and hands it to the local or S3 backend. Writes
//! rewind their input before dispatch, whichever backend is chosen.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use aws_config::SdkConfig;
use pio_core::{
    ByteReader, ClientConfig, LocalBackend, PathKind, PathStore, Result, SeekableReader, classify,
    rewind,
};

use crate::handler::HandlerFactory;
use crate::live::LiveHandlerFactory;
use crate::remote::RemoteBackend;

/// Reads and writes local files and S3 objects by path
pub struct Client {
    local: LocalBackend,
    remote: RemoteBackend,
    config: ClientConfig,
}

impl Client {
    /// Create a client that loads the default AWS configuration on first
    /// remote use
    pub fn new(config: ClientConfig) -> Self {
        Self::with_factory(config, Arc::new(LiveHandlerFactory::new()))
    }

    /// Create a client using `sdk_config` verbatim for remote calls
    pub fn with_sdk_config(config: ClientConfig, sdk_config: SdkConfig) -> Self {
        Self::with_factory(
            config,
            Arc::new(LiveHandlerFactory::with_sdk_config(sdk_config)),
        )
    }

    /// Create a client over any handler factory
    pub fn with_factory(config: ClientConfig, factory: Arc<dyn HandlerFactory>) -> Self {
        Self {
            local: LocalBackend,
            remote: RemoteBackend::new(factory, config.clone()),
            config,
        }
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

#[async_trait]
impl PathStore for Client {
    async fn read(&self, path: &str) -> Result<ByteReader> {
        tracing::debug!(path, "read");
        match classify(path) {
            PathKind::Remote => self.remote.read(path).await,
            PathKind::Local => self.local.read(Path::new(path)).await,
        }
    }

    async fn write_stream(&self, path: &str, input: &mut dyn SeekableReader) -> Result<()> {
        tracing::debug!(path, "write");
        rewind(input).await?;
        match classify(path) {
            PathKind::Remote => self.remote.write(path, input).await,
            PathKind::Local => self.local.write(Path::new(path), input).await,
        }
    }

    async fn delete(&self, path: &str) -> Result<()> {
        tracing::debug!(path, "delete");
        match classify(path) {
            PathKind::Remote => self.remote.delete(path).await,
            PathKind::Local => self.local.delete(Path::new(path)).await,
        }
    }

    async fn list_files(&self, path: &str) -> Result<Vec<String>> {
        tracing::debug!(path, "list");
        match classify(path) {
            PathKind::Remote => self.remote.list_files(path).await,
            PathKind::Local => self.local.list_files(Path::new(path)).await,
        }
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        tracing::debug!(path, "exists");
        match classify(path) {
            PathKind::Remote => self.remote.exists(path).await,
            PathKind::Local => self.local.exists(Path::new(path)).await,
        }
    }
}
