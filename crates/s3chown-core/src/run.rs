//! Run lifecycle: configuration, wiring, and drain.

use std::sync::Arc;

use crate::TRACING_TARGET_RUN;
use crate::dispatcher;
use crate::error::RunError;
use crate::handle_cache::HandleCache;
use crate::lister::ObjectLister;
use crate::store::{AclHandleFactory, ObjectStore};

/// Default size of the concurrent worker pool.
pub const DEFAULT_NUM_WORKERS: usize = 16;

/// Configuration for one remediation run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Bucket holding the objects to remediate.
    pub bucket: String,
    /// Key prefix to enumerate; a trailing `/` denotes a folder.
    pub prefix: String,
    /// Exclusive resume cursor from a prior partial run; empty means start
    /// from the beginning of the prefix.
    pub start_after: String,
    /// Size of the concurrent worker pool.
    pub num_workers: usize,
}

impl RunConfig {
    /// Creates a configuration with default cursor and worker count.
    pub fn new(bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            prefix: prefix.into(),
            start_after: String::new(),
            num_workers: DEFAULT_NUM_WORKERS,
        }
    }

    /// Sets the resume cursor.
    pub fn with_start_after(mut self, start_after: impl Into<String>) -> Self {
        self.start_after = start_after.into();
        self
    }

    /// Sets the worker pool size.
    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }

    /// Validates the configuration before any remote call is made.
    pub fn validate(&self) -> Result<(), RunError> {
        if self.bucket.is_empty() {
            return Err(RunError::config("bucket name must not be empty"));
        }
        if self.num_workers == 0 {
            return Err(RunError::config("worker count must be at least 1"));
        }
        Ok(())
    }
}

/// Outcome counters for one drained run.
///
/// Never persisted; the log stream remains the authoritative per-object
/// report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Objects remediated successfully.
    pub succeeded: u64,
    /// Objects whose remediation failed and was skipped.
    pub failed: u64,
}

impl RunReport {
    /// Total objects attempted.
    pub fn attempted(&self) -> u64 {
        self.succeeded + self.failed
    }
}

/// Executes a remediation run to completion.
///
/// Validates the configuration, wires the lister into the bounded worker
/// pool with a fresh per-worker handle cache, and drains the full listing.
/// Per-object failures are logged and counted; configuration and listing
/// failures abort the run.
pub async fn run<S, F>(config: &RunConfig, store: Arc<S>, factory: Arc<F>) -> Result<RunReport, RunError>
where
    S: ObjectStore,
    F: AclHandleFactory,
{
    config.validate()?;

    let lister = ObjectLister::new(
        store.clone(),
        &config.bucket,
        &config.prefix,
        &config.start_after,
    );

    tracing::info!(
        target: TRACING_TARGET_RUN,
        bucket = %config.bucket,
        prefix = %lister.prefix(),
        start_after = %lister.start_after(),
        num_workers = config.num_workers,
        "Starting remediation run"
    );

    let cache = Arc::new(HandleCache::new(config.num_workers));
    let report = dispatcher::dispatch(
        store,
        factory,
        cache,
        lister,
        &config.bucket,
        config.num_workers,
    )
    .await?;

    tracing::info!(
        target: TRACING_TARGET_RUN,
        attempted = report.attempted(),
        succeeded = report.succeeded,
        failed = report.failed,
        "Remediation run complete"
    );

    Ok(report)
}
