//! Remote connection resolution
//!
//! Every remote operation resolves its own connection: parse the path, find
//! the bucket's region unless one was configured, then bind a handler to
//! that region. Nothing is reused between operations.

use std::sync::Arc;

use pio_core::{Error, RemotePath, Result};

use crate::handler::{HandlerFactory, S3Handler};

/// Region used for location lookups and for buckets reporting no constraint
pub const DEFAULT_REGION: &str = "us-east-1";

/// A handler bound to the bucket's region, plus where the object lives
pub struct Connection {
    pub handler: Arc<dyn S3Handler>,
    pub bucket: String,
    pub key: String,
    pub region: String,
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("bucket", &self.bucket)
            .field("key", &self.key)
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

/// Look up the region of `bucket`
///
/// Any region works for this call as long as path-style addressing is used.
/// An empty location constraint means the bucket is in [`DEFAULT_REGION`].
pub async fn region_for_bucket(handler: &dyn S3Handler, bucket: &str) -> Result<String> {
    let constraint = handler
        .bucket_location(bucket)
        .await
        .map_err(|source| Error::RegionLookup {
            bucket: bucket.to_string(),
            source,
        })?;

    if constraint.is_empty() {
        Ok(DEFAULT_REGION.to_string())
    } else {
        Ok(constraint)
    }
}

/// Resolve `path` into a connection
///
/// With a non-empty `region_override` no lookup is made.
pub async fn resolve(
    factory: &dyn HandlerFactory,
    path: &str,
    region_override: Option<&str>,
) -> Result<Connection> {
    let RemotePath { bucket, key } = RemotePath::parse(path)?;

    let region = match region_override.filter(|r| !r.is_empty()) {
        Some(region) => region.to_string(),
        None => {
            let bootstrap = factory.handler(DEFAULT_REGION).await;
            region_for_bucket(bootstrap.as_ref(), &bucket).await?
        }
    };
    tracing::debug!(%bucket, %region, "resolved bucket region");

    Ok(Connection {
        handler: factory.handler(&region).await,
        bucket,
        key,
        region,
    })
}
