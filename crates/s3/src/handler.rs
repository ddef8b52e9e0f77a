//! The object store primitives the remote backend is built on
//!
//! `S3Handler` is the seam between pio and the SDK: one handler is bound to
//! one region. `HandlerFactory` produces handlers for a region so the
//! resolver can rebind after discovering where a bucket lives.

use std::sync::Arc;

use async_trait::async_trait;
use pio_core::{BoxError, ByteReader};

/// Arguments of a single put-object call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutRequest {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    /// Server-side encryption algorithm, omitted from the call when `None`
    pub server_side_encryption: Option<String>,
    /// Storage class, omitted from the call when `None`
    pub storage_class: Option<String>,
}

/// Arguments of one list-objects page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRequest {
    pub bucket: String,
    pub prefix: String,
    pub delimiter: String,
    pub continuation_token: Option<String>,
}

/// One page of a delimited listing, in store order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPage {
    pub common_prefixes: Vec<String>,
    pub contents: Vec<String>,
    pub is_truncated: bool,
    pub next_continuation_token: Option<String>,
}

/// Failure of a head-object call
#[derive(Debug)]
pub enum HeadError {
    /// The store's not-found signal
    NotFound,
    /// Anything else, unmodified
    Other(BoxError),
}

/// Object store calls against a single region
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait S3Handler: Send + Sync {
    /// Location constraint of a bucket, empty when the store reports none
    async fn bucket_location(&self, bucket: &str) -> Result<String, BoxError>;

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteReader, BoxError>;

    async fn put_object(&self, request: PutRequest) -> Result<(), BoxError>;

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), BoxError>;

    async fn head_object(&self, bucket: &str, key: &str) -> Result<(), HeadError>;

    /// Fetch a single page of a listing
    async fn list_objects(&self, request: ListRequest) -> Result<ListPage, BoxError>;
}

/// Builds handlers bound to a region with path-style addressing
#[async_trait]
pub trait HandlerFactory: Send + Sync {
    async fn handler(&self, region: &str) -> Arc<dyn S3Handler>;
}
