//! Per-worker-slot storage for worker-exclusive store handles.

use std::future::Future;

use tokio::sync::OnceCell;

/// Lazily-constructed, slot-affine handle storage.
///
/// One slot per worker, indexed by the dispatcher's worker slot number
/// rather than any runtime thread identity. A handle is constructed at most
/// once per slot and reused for every object that worker processes. Slots
/// are independent cells, so concurrent first access from different workers
/// needs no coordination beyond each slot's own cell. No eviction: handles
/// live for the run's duration.
pub struct HandleCache<H> {
    slots: Vec<OnceCell<H>>,
}

impl<H> HandleCache<H> {
    /// Creates a cache with one empty slot per worker.
    pub fn new(workers: usize) -> Self {
        Self {
            slots: (0..workers).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Returns the slot's handle, constructing it on first access.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range. Slots are assigned by the
    /// dispatcher and never exceed the configured worker count.
    pub async fn get_or_create<F, Fut, E>(&self, slot: usize, init: F) -> Result<&H, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<H, E>>,
    {
        self.slots[slot].get_or_try_init(init).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error::StoreError;

    #[tokio::test]
    async fn constructs_at_most_once_per_slot() {
        let cache = HandleCache::<usize>::new(2);
        let constructed = AtomicUsize::new(0);

        for _ in 0..10 {
            let handle = cache
                .get_or_create(0, || async {
                    Ok::<_, StoreError>(constructed.fetch_add(1, Ordering::SeqCst))
                })
                .await
                .unwrap();
            assert_eq!(*handle, 0);
        }

        assert_eq!(constructed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn slots_are_independent() {
        let cache = HandleCache::<usize>::new(3);

        for slot in 0..3 {
            let handle = cache
                .get_or_create(slot, || async { Ok::<_, StoreError>(slot * 10) })
                .await
                .unwrap();
            assert_eq!(*handle, slot * 10);
        }
    }

    #[tokio::test]
    async fn concurrent_first_access_constructs_once() {
        let cache = Arc::new(HandleCache::<u32>::new(1));
        let constructed = Arc::new(AtomicUsize::new(0));

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..8 {
            let cache = cache.clone();
            let constructed = constructed.clone();
            tasks.spawn(async move {
                let handle = cache
                    .get_or_create(0, || async {
                        constructed.fetch_add(1, Ordering::SeqCst);
                        Ok::<_, StoreError>(7)
                    })
                    .await
                    .unwrap();
                assert_eq!(*handle, 7);
            });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap();
        }

        assert_eq!(constructed.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_construction_is_retried() {
        let cache = HandleCache::<u32>::new(1);

        let first: Result<&u32, StoreError> = cache
            .get_or_create(0, || async { Err(StoreError::connect("credentials")) })
            .await;
        assert!(first.is_err());

        let second = cache
            .get_or_create(0, || async { Ok::<_, StoreError>(1) })
            .await
            .unwrap();
        assert_eq!(*second, 1);
    }
}
