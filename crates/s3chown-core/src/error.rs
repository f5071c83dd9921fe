//! Error types for the remediation pipeline.

use std::fmt;

/// Result type for remote store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by the remote object store.
#[derive(Debug, Clone, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum StoreError {
    /// Listing page fetch failed.
    #[error("list failed: {0}")]
    List(String),

    /// ACL update was rejected or failed.
    #[error("acl update failed: {0}")]
    Acl(String),

    /// Self-copy was rejected or failed.
    #[error("copy failed: {0}")]
    Copy(String),

    /// Client handle construction failed.
    #[error("client construction failed: {0}")]
    Connect(String),
}

impl StoreError {
    /// Creates a new listing error.
    pub fn list(msg: impl Into<String>) -> Self {
        Self::List(msg.into())
    }

    /// Creates a new ACL update error.
    pub fn acl(msg: impl Into<String>) -> Self {
        Self::Acl(msg.into())
    }

    /// Creates a new copy error.
    pub fn copy(msg: impl Into<String>) -> Self {
        Self::Copy(msg.into())
    }

    /// Creates a new client construction error.
    pub fn connect(msg: impl Into<String>) -> Self {
        Self::Connect(msg.into())
    }
}

/// The remediation step that failed for one object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationStep {
    /// The canned ACL grant.
    AclUpdate,
    /// The self-copy with metadata replaced.
    Copy,
}

impl fmt::Display for RemediationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AclUpdate => f.write_str("acl update"),
            Self::Copy => f.write_str("copy"),
        }
    }
}

/// A failed remediation of a single object.
///
/// Local to that object: the dispatcher logs it and moves on without
/// aborting the run.
#[derive(Debug, Clone, thiserror::Error)]
#[error("remediation of '{key}' failed during {step}: {source}")]
pub struct RemediateError {
    /// Key of the affected object.
    pub key: String,
    /// The step that failed.
    pub step: RemediationStep,
    /// The underlying store error.
    #[source]
    pub source: StoreError,
}

/// Fatal errors that abort a remediation run.
#[derive(Debug, thiserror::Error)]
#[must_use = "errors should be handled appropriately"]
pub enum RunError {
    /// Invalid run configuration, caught before any remote call.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Listing page fetch failed; objects not yet seen are never attempted.
    #[error("listing aborted: {0}")]
    Listing(#[from] StoreError),

    /// A worker task panicked or was cancelled.
    #[error("worker task failed: {0}")]
    Worker(String),
}

impl RunError {
    /// Creates a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a new worker failure error.
    pub fn worker(msg: impl Into<String>) -> Self {
        Self::Worker(msg.into())
    }
}
