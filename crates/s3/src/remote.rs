//! S3 backend
//!
//! Each operation resolves a fresh connection and makes its store call.
//! Store errors are passed back unmodified; nothing is retried. Only
//! `exists` interprets an error, turning the store's not-found signal into
//! `false`.
//!
//! S3 is eventually consistent for some operations: a write may not be
//! visible to an `exists` call made right after it.

use std::sync::Arc;

use pio_core::{ByteReader, ClientConfig, Error, Result, SeekableReader};
use tokio::io::AsyncReadExt;

use crate::handler::{HandlerFactory, HeadError, ListPage, ListRequest, PutRequest};
use crate::resolver::{Connection, resolve};

/// Server-side encryption algorithm set on uploads
pub const SSE_ALGORITHM: &str = "AES256";

/// Storage class set on uploads when intelligent tiering is enabled
pub const INTELLIGENT_TIERING: &str = "INTELLIGENT_TIERING";

/// Grouping delimiter for listings
pub const DELIMITER: &str = "/";

/// Serves `s3://` paths
pub struct RemoteBackend {
    factory: Arc<dyn HandlerFactory>,
    config: ClientConfig,
}

impl RemoteBackend {
    pub fn new(factory: Arc<dyn HandlerFactory>, config: ClientConfig) -> Self {
        Self { factory, config }
    }

    async fn connect(&self, path: &str) -> Result<Connection> {
        resolve(self.factory.as_ref(), path, self.config.region_override()).await
    }

    /// Fetch an object. The returned stream is the response body.
    pub async fn read(&self, path: &str) -> Result<ByteReader> {
        let conn = self.connect(path).await?;
        conn.handler
            .get_object(&conn.bucket, &conn.key)
            .await
            .map_err(Error::Backend)
    }

    /// Upload everything readable from `input`
    ///
    /// The caller has already rewound `input`. A failed upload leaves no
    /// object behind since a put is all-or-nothing.
    pub async fn write(&self, path: &str, input: &mut dyn SeekableReader) -> Result<()> {
        let conn = self.connect(path).await?;

        let mut body = Vec::new();
        input.read_to_end(&mut body).await?;

        let request = put_request(&conn, body, &self.config);
        conn.handler
            .put_object(request)
            .await
            .map_err(Error::Backend)
    }

    pub async fn delete(&self, path: &str) -> Result<()> {
        let conn = self.connect(path).await?;
        conn.handler
            .delete_object(&conn.bucket, &conn.key)
            .await
            .map_err(Error::Backend)
    }

    pub async fn exists(&self, path: &str) -> Result<bool> {
        let conn = self.connect(path).await?;
        match conn.handler.head_object(&conn.bucket, &conn.key).await {
            Ok(()) => Ok(true),
            Err(HeadError::NotFound) => Ok(false),
            Err(HeadError::Other(e)) => Err(Error::Backend(e)),
        }
    }

    /// Names under the key prefix, one level deep
    pub async fn list_files(&self, path: &str) -> Result<Vec<String>> {
        let conn = self.connect(path).await?;
        list_all(&conn).await
    }
}

/// Build the put-object call for `conn`
pub fn put_request(conn: &Connection, body: Vec<u8>, config: &ClientConfig) -> PutRequest {
    PutRequest {
        bucket: conn.bucket.clone(),
        key: conn.key.clone(),
        body,
        server_side_encryption: (!config.disable_encryption).then(|| SSE_ALGORITHM.to_string()),
        storage_class: config
            .intelligent_tiering
            .then(|| INTELLIGENT_TIERING.to_string()),
    }
}

/// Fetch every page of a delimited listing and flatten it
pub async fn list_all(conn: &Connection) -> Result<Vec<String>> {
    let mut listing = Listing::default();
    let mut continuation_token = None;

    loop {
        let request = ListRequest {
            bucket: conn.bucket.clone(),
            prefix: conn.key.clone(),
            delimiter: DELIMITER.to_string(),
            continuation_token,
        };
        let page = conn
            .handler
            .list_objects(request)
            .await
            .map_err(Error::Backend)?;

        tracing::debug!(
            bucket = %conn.bucket,
            prefixes = page.common_prefixes.len(),
            contents = page.contents.len(),
            truncated = page.is_truncated,
            "listed page"
        );

        let more = page.is_truncated;
        continuation_token = page.next_continuation_token.clone();
        listing.push(page);

        if !more || continuation_token.is_none() {
            break;
        }
    }

    Ok(listing.names)
}

/// Accumulates listing pages into one flat name sequence
#[derive(Debug, Default)]
struct Listing {
    names: Vec<String>,
    last_prefix: Option<String>,
}

impl Listing {
    /// Append a page: its prefixes, then its contents
    ///
    /// A page can start with the common prefix the previous page ended on.
    /// That repeat is dropped.
    fn push(&mut self, page: ListPage) {
        let mut prefixes = page.common_prefixes.into_iter().peekable();
        if prefixes.peek().is_some_and(|first| Some(first) == self.last_prefix.as_ref()) {
            prefixes.next();
        }

        for prefix in prefixes {
            self.last_prefix = Some(prefix.clone());
            self.names.push(prefix);
        }
        self.names.extend(page.contents);
    }
}
