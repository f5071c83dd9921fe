//! In-memory fake store for pipeline tests.
//!
//! Records every mutation, counts concurrent entries, and injects failures
//! per key or per listing page.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::descriptor::ObjectDescriptor;
use crate::error::{StoreError, StoreResult};
use crate::store::{AclHandle, AclHandleFactory, ListPage, ObjectStore};

/// One recorded mutation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Acl,
    Copy,
}

/// In-memory object store with call recording and fault injection.
pub struct FakeStore {
    keys: Vec<String>,
    page_size: usize,
    fail_page: Option<usize>,
    fail_acl: HashSet<String>,
    fail_copy: HashSet<String>,
    events: Mutex<Vec<(String, Step)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeStore {
    /// Creates a store holding the given keys, sorted lexicographically.
    pub fn with_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        keys.sort();

        Self {
            keys,
            page_size: 1000,
            fail_page: None,
            fail_acl: HashSet::new(),
            fail_copy: HashSet::new(),
            events: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Sets the listing page size.
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Makes the fetch of the given page index fail.
    pub fn fail_page(mut self, page: usize) -> Self {
        self.fail_page = Some(page);
        self
    }

    /// Makes ACL grants fail for the given keys.
    pub fn fail_acl<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.fail_acl = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Makes self-copies fail for the given keys.
    pub fn fail_copy<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.fail_copy = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Recorded mutations, in the order the store observed them.
    pub fn events(&self) -> Vec<(String, Step)> {
        self.events.lock().unwrap().clone()
    }

    /// Highest number of mutation calls observed in flight at once.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Creates a worker-exclusive handle backed by this store.
    pub fn acl_handle(self: &Arc<Self>) -> FakeAclHandle {
        FakeAclHandle {
            store: self.clone(),
        }
    }

    /// Creates a factory producing handles backed by this store.
    pub fn acl_factory(self: &Arc<Self>) -> FakeAclFactory {
        FakeAclFactory {
            store: self.clone(),
            created: AtomicUsize::new(0),
        }
    }

    fn enter(&self) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }

    async fn mutate(&self, key: &str, step: Step) -> StoreResult<()> {
        self.enter();
        self.events.lock().unwrap().push((key.to_owned(), step));
        // Yield long enough for other workers to overlap.
        tokio::time::sleep(Duration::from_millis(2)).await;
        self.exit();

        match step {
            Step::Acl if self.fail_acl.contains(key) => {
                Err(StoreError::acl("injected acl failure"))
            }
            Step::Copy if self.fail_copy.contains(key) => {
                Err(StoreError::copy("injected copy failure"))
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn list_page(
        &self,
        _bucket: &str,
        prefix: &str,
        start_after: &str,
        continuation: Option<&str>,
    ) -> StoreResult<ListPage> {
        let offset: usize = continuation.map_or(0, |t| t.parse().expect("fake token"));
        if self.fail_page == Some(offset / self.page_size) {
            return Err(StoreError::list("injected page failure"));
        }

        let matching: Vec<&String> = self
            .keys
            .iter()
            .filter(|key| key.starts_with(prefix) && key.as_str() > start_after)
            .collect();

        let objects: Vec<ObjectDescriptor> = matching
            .iter()
            .skip(offset)
            .take(self.page_size)
            .map(|key| ObjectDescriptor::new(key.as_str()))
            .collect();

        let next = offset + objects.len();
        let continuation = (next < matching.len()).then(|| next.to_string());

        Ok(ListPage {
            objects,
            continuation,
        })
    }

    async fn copy_in_place(&self, _bucket: &str, key: &str) -> StoreResult<()> {
        self.mutate(key, Step::Copy).await
    }
}

/// Worker-exclusive handle backed by a [`FakeStore`].
pub struct FakeAclHandle {
    store: Arc<FakeStore>,
}

#[async_trait]
impl AclHandle for FakeAclHandle {
    async fn grant_bucket_owner_full_control(&self, _bucket: &str, key: &str) -> StoreResult<()> {
        self.store.mutate(key, Step::Acl).await
    }
}

/// Factory counting every handle construction.
pub struct FakeAclFactory {
    store: Arc<FakeStore>,
    created: AtomicUsize,
}

impl FakeAclFactory {
    /// Number of handles constructed so far.
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AclHandleFactory for FakeAclFactory {
    type Handle = FakeAclHandle;

    async fn create(&self) -> StoreResult<FakeAclHandle> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(FakeAclHandle {
            store: self.store.clone(),
        })
    }
}
