//! Bounded-concurrency dispatch of remediation work.

use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinSet;

use crate::TRACING_TARGET_DISPATCHER;
use crate::descriptor::ObjectDescriptor;
use crate::error::{RunError, StoreError};
use crate::handle_cache::HandleCache;
use crate::lister::ObjectLister;
use crate::remediator;
use crate::run::RunReport;
use crate::store::{AclHandleFactory, ObjectStore};

/// Pulls descriptors from the lister and dispatches them across a fixed
/// pool of worker tasks, bounding in-flight remediations at `workers`.
///
/// Runs to a full drain: returns only after the lister is exhausted (or has
/// failed) and every dispatched unit of work has completed. Completion
/// order between objects is unspecified. A listing failure stops the feed
/// and is returned once in-flight work has drained; per-object failures are
/// logged, counted, and never escalate.
pub async fn dispatch<S, F>(
    store: Arc<S>,
    factory: Arc<F>,
    cache: Arc<HandleCache<F::Handle>>,
    mut lister: ObjectLister<S>,
    bucket: &str,
    workers: usize,
) -> Result<RunReport, RunError>
where
    S: ObjectStore,
    F: AclHandleFactory,
{
    let (tx, rx) = mpsc::channel::<ObjectDescriptor>(workers);
    let rx = Arc::new(Mutex::new(rx));

    let mut pool = JoinSet::new();
    for slot in 0..workers {
        let store = store.clone();
        let factory = factory.clone();
        let cache = cache.clone();
        let rx = rx.clone();
        let bucket = bucket.to_owned();

        pool.spawn(async move {
            let mut succeeded = 0u64;
            let mut failed = 0u64;

            loop {
                // The lock is held only while waiting for the next item;
                // one idle worker waits, the rest queue on the mutex.
                let object = rx.lock().await.recv().await;
                let Some(object) = object else { break };

                let acl = match cache.get_or_create(slot, || factory.create()).await {
                    Ok(handle) => handle,
                    Err(err) => {
                        failed += 1;
                        tracing::warn!(
                            target: TRACING_TARGET_DISPATCHER,
                            slot,
                            key = %object.key,
                            error = %err,
                            "Failed to construct worker store handle; skipping object"
                        );
                        continue;
                    }
                };

                match remediator::remediate(store.as_ref(), acl, &bucket, &object).await {
                    Ok(()) => succeeded += 1,
                    Err(err) => {
                        failed += 1;
                        tracing::warn!(
                            target: TRACING_TARGET_DISPATCHER,
                            key = %err.key,
                            step = %err.step,
                            error = %err.source,
                            "Object remediation failed; skipping"
                        );
                    }
                }
            }

            (succeeded, failed)
        });
    }

    let mut fatal: Option<StoreError> = None;
    while let Some(item) = lister.next().await {
        match item {
            Ok(object) => {
                if tx.send(object).await.is_err() {
                    break;
                }
            }
            Err(err) => {
                tracing::error!(
                    target: TRACING_TARGET_DISPATCHER,
                    error = %err,
                    "Listing failed; draining in-flight work and aborting"
                );
                fatal = Some(err);
                break;
            }
        }
    }
    drop(tx);

    let mut report = RunReport::default();
    let mut panicked = None;
    while let Some(result) = pool.join_next().await {
        match result {
            Ok((succeeded, failed)) => {
                report.succeeded += succeeded;
                report.failed += failed;
            }
            Err(err) => panicked = Some(err.to_string()),
        }
    }

    if let Some(err) = fatal {
        return Err(RunError::Listing(err));
    }
    if let Some(message) = panicked {
        return Err(RunError::worker(message));
    }

    Ok(report)
}
