//! Trait seams for the remote object store.
//!
//! Two kinds of client are distinguished, mirroring the thread-safety
//! contract of the underlying SDKs: a low-level client that is safe to
//! share across all workers, and a fine-grained ACL handle that must be
//! exclusive to one worker at a time.

use async_trait::async_trait;

use crate::descriptor::ObjectDescriptor;
use crate::error::StoreResult;

/// One page of a paginated listing.
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Descriptors in key-lexicographic order, as delivered by the store.
    pub objects: Vec<ObjectDescriptor>,
    /// Continuation token for the next page, if the listing is truncated.
    pub continuation: Option<String>,
}

/// Low-level remote store client.
///
/// Safe to share across all workers without synchronization; constructed
/// once for the whole run.
#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Fetches one listing page for keys under `prefix`, strictly after
    /// `start_after`, continuing from `continuation` when given.
    async fn list_page(
        &self,
        bucket: &str,
        prefix: &str,
        start_after: &str,
        continuation: Option<&str>,
    ) -> StoreResult<ListPage>;

    /// Copies an object onto itself with metadata replaced rather than
    /// copied through, forcing the store to re-materialize the object under
    /// the invoking principal's ownership.
    async fn copy_in_place(&self, bucket: &str, key: &str) -> StoreResult<()>;
}

/// Worker-exclusive handle for fine-grained ACL mutation.
///
/// By contract each worker owns exactly one, created at most once per
/// worker for the run's lifetime and never used by two units of work at
/// the same time.
#[async_trait]
pub trait AclHandle: Send + Sync + 'static {
    /// Grants the bucket owner full control over the object via the canned
    /// `bucket-owner-full-control` ACL.
    async fn grant_bucket_owner_full_control(&self, bucket: &str, key: &str) -> StoreResult<()>;
}

/// Factory constructing worker-exclusive ACL handles.
///
/// Construction is expensive; the dispatcher amortizes it per worker slot
/// through a [`HandleCache`](crate::handle_cache::HandleCache).
#[async_trait]
pub trait AclHandleFactory: Send + Sync + 'static {
    /// The handle type produced by [`create`](Self::create).
    type Handle: AclHandle;

    /// Constructs a fresh handle. Called at most once per worker slot.
    async fn create(&self) -> StoreResult<Self::Handle>;
}
