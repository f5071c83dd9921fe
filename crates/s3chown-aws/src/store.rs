//! AWS SDK implementation of the store traits.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::Client;
use aws_sdk_s3::types::{MetadataDirective, ObjectCannedAcl};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use s3chown_core::{
    AclHandle, AclHandleFactory, ListPage, ObjectDescriptor, ObjectStore, StoreError, StoreResult,
};

use crate::TRACING_TARGET;
use crate::error::sdk_error_details;

/// Characters percent-encoded in the `x-amz-copy-source` header: everything
/// except unreserved characters and the path delimiter. S3 decodes the
/// header, so a raw `+`, space, `%`, or `?` in a key would resolve to a
/// different source object.
const COPY_SOURCE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Builds the percent-encoded `bucket/key` copy source for a self-copy.
fn copy_source(bucket: &str, key: &str) -> String {
    format!("{bucket}/{}", utf8_percent_encode(key, COPY_SOURCE_SET))
}

/// Shared low-level S3 client used for listing and self-copies.
///
/// The SDK client is safe to share across workers without synchronization;
/// one instance serves the whole run.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
}

impl S3Store {
    /// Creates a store from the ambient AWS configuration.
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        start_after: &str,
        continuation: Option<&str>,
    ) -> StoreResult<ListPage> {
        let mut request = self.client.list_objects_v2().bucket(bucket).prefix(prefix);
        if !start_after.is_empty() {
            request = request.start_after(start_after);
        }
        if let Some(token) = continuation {
            request = request.continuation_token(token);
        }

        let response = request.send().await.map_err(|err| {
            let (code, message) = sdk_error_details(&err);
            StoreError::list(format!("{code}: {message}"))
        })?;

        let objects = response
            .contents
            .unwrap_or_default()
            .into_iter()
            .filter_map(|object| {
                let key = object.key?;
                Some(ObjectDescriptor {
                    key,
                    size: object.size.and_then(|size| u64::try_from(size).ok()),
                    last_modified: object.last_modified.map(|ts| ts.to_string()),
                    etag: object.e_tag,
                })
            })
            .collect();

        let continuation = if response.is_truncated.unwrap_or(false) {
            response.next_continuation_token
        } else {
            None
        };

        Ok(ListPage {
            objects,
            continuation,
        })
    }

    async fn copy_in_place(&self, bucket: &str, key: &str) -> StoreResult<()> {
        let response = self
            .client
            .copy_object()
            .bucket(bucket)
            .key(key)
            .copy_source(copy_source(bucket, key))
            .metadata_directive(MetadataDirective::Replace)
            .send()
            .await
            .map_err(|err| {
                let (code, message) = sdk_error_details(&err);
                StoreError::copy(format!("{code}: {message}"))
            })?;

        tracing::debug!(
            target: TRACING_TARGET,
            bucket = %bucket,
            key = %key,
            etag = ?response.copy_object_result.and_then(|result| result.e_tag),
            "CopyObject response received"
        );

        Ok(())
    }
}

/// Worker-exclusive handle for fine-grained ACL updates.
///
/// Holds a private SDK client so the ACL path never shares a client
/// instance across workers.
pub struct S3AclHandle {
    client: Client,
}

#[async_trait]
impl AclHandle for S3AclHandle {
    async fn grant_bucket_owner_full_control(&self, bucket: &str, key: &str) -> StoreResult<()> {
        self.client
            .put_object_acl()
            .bucket(bucket)
            .key(key)
            .acl(ObjectCannedAcl::BucketOwnerFullControl)
            .send()
            .await
            .map_err(|err| {
                let (code, message) = sdk_error_details(&err);
                StoreError::acl(format!("{code}: {message}"))
            })?;

        tracing::debug!(
            target: TRACING_TARGET,
            bucket = %bucket,
            key = %key,
            "PutObjectAcl response received"
        );

        Ok(())
    }
}

/// Constructs one fresh SDK client per worker slot.
pub struct S3AclHandleFactory {
    config: SdkConfig,
}

impl S3AclHandleFactory {
    /// Creates a factory reusing the ambient AWS configuration.
    pub fn new(config: SdkConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl AclHandleFactory for S3AclHandleFactory {
    type Handle = S3AclHandle;

    async fn create(&self) -> StoreResult<S3AclHandle> {
        Ok(S3AclHandle {
            client: Client::new(&self.config),
        })
    }
}
