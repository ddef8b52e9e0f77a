//! aws-sdk-s3 implementation of the handler seam

use std::sync::Arc;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{ServerSideEncryption, StorageClass};
use aws_smithy_types::error::display::DisplayErrorContext;
use pio_core::{BoxError, ByteReader};
use tokio::sync::OnceCell;

use crate::handler::{HandlerFactory, HeadError, ListPage, ListRequest, PutRequest, S3Handler};

/// Handler over a real S3 client
pub struct LiveHandler {
    inner: aws_sdk_s3::Client,
}

impl LiveHandler {
    /// Build a client for `region` on top of `sdk_config`
    ///
    /// Path-style addressing is always forced: bucket location lookups only
    /// work from an arbitrary region when the bucket is not in the host name.
    pub fn new(sdk_config: &SdkConfig, region: &str) -> Self {
        let s3_config = aws_sdk_s3::config::Builder::from(sdk_config)
            .region(Region::new(region.to_string()))
            .force_path_style(true)
            .build();

        Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        }
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

fn raw<E>(op: &'static str, err: E) -> BoxError
where
    E: std::error::Error + Send + Sync + 'static,
{
    tracing::debug!(op, error = %DisplayErrorContext(&err), "s3 call failed");
    Box::new(err)
}

#[async_trait]
impl S3Handler for LiveHandler {
    async fn bucket_location(&self, bucket: &str) -> Result<String, BoxError> {
        let response = self
            .inner
            .get_bucket_location()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| raw("get_bucket_location", e))?;

        Ok(response
            .location_constraint()
            .map(|c| c.as_str().to_string())
            .unwrap_or_default())
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ByteReader, BoxError> {
        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| raw("get_object", e))?;

        Ok(Box::new(response.body.into_async_read()))
    }

    async fn put_object(&self, request: PutRequest) -> Result<(), BoxError> {
        let mut call = self
            .inner
            .put_object()
            .bucket(request.bucket)
            .key(request.key)
            .body(ByteStream::from(request.body));

        if let Some(algorithm) = request.server_side_encryption {
            call = call.server_side_encryption(ServerSideEncryption::from(algorithm.as_str()));
        }
        if let Some(class) = request.storage_class {
            call = call.storage_class(StorageClass::from(class.as_str()));
        }

        call.send().await.map_err(|e| raw("put_object", e))?;
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<(), BoxError> {
        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| raw("delete_object", e))?;
        Ok(())
    }

    async fn head_object(&self, bucket: &str, key: &str) -> Result<(), HeadError> {
        match self.inner.head_object().bucket(bucket).key(key).send().await {
            Ok(_) => Ok(()),
            Err(e) if e.as_service_error().is_some_and(|se| se.is_not_found()) => {
                Err(HeadError::NotFound)
            }
            Err(e) => Err(HeadError::Other(raw("head_object", e))),
        }
    }

    async fn list_objects(&self, request: ListRequest) -> Result<ListPage, BoxError> {
        let response = self
            .inner
            .list_objects_v2()
            .bucket(request.bucket)
            .prefix(request.prefix)
            .delimiter(request.delimiter)
            .set_continuation_token(request.continuation_token)
            .send()
            .await
            .map_err(|e| raw("list_objects_v2", e))?;

        Ok(ListPage {
            common_prefixes: response
                .common_prefixes()
                .iter()
                .filter_map(|p| p.prefix().map(str::to_string))
                .collect(),
            contents: response
                .contents()
                .iter()
                .filter_map(|o| o.key().map(str::to_string))
                .collect(),
            is_truncated: response.is_truncated().unwrap_or(false),
            next_continuation_token: response.next_continuation_token().map(str::to_string),
        })
    }
}

/// Creates `LiveHandler`s from one shared SDK configuration
///
/// Without an explicit configuration, the default credential chain
/// (environment variables, shared profile, ...) is loaded on first use.
/// The loaded configuration, and the HTTP client inside it, is kept for
/// the life of the factory and belongs to the runtime it was loaded on.
pub struct LiveHandlerFactory {
    sdk_config: OnceCell<SdkConfig>,
}

impl LiveHandlerFactory {
    pub fn new() -> Self {
        Self {
            sdk_config: OnceCell::new(),
        }
    }

    /// Use `sdk_config` verbatim instead of loading defaults
    pub fn with_sdk_config(sdk_config: SdkConfig) -> Self {
        Self {
            sdk_config: OnceCell::new_with(Some(sdk_config)),
        }
    }

    async fn sdk_config(&self) -> &SdkConfig {
        self.sdk_config
            .get_or_init(|| aws_config::load_defaults(BehaviorVersion::latest()))
            .await
    }
}

impl Default for LiveHandlerFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HandlerFactory for LiveHandlerFactory {
    async fn handler(&self, region: &str) -> Arc<dyn S3Handler> {
        Arc::new(LiveHandler::new(self.sdk_config().await, region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handler_bound_to_region() {
        let sdk_config = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .build();
        let handler = LiveHandler::new(&sdk_config, "eu-central-1");

        let region = handler.inner().config().region().map(|r| r.to_string());
        assert_eq!(region.as_deref(), Some("eu-central-1"));
    }
}
