#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod descriptor;
pub mod dispatcher;
pub mod error;
pub mod handle_cache;
pub mod lister;
pub mod remediator;
pub mod run;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;

// Tracing target constants for consistent logging
pub const TRACING_TARGET_LISTER: &str = "s3chown_core::lister";
pub const TRACING_TARGET_DISPATCHER: &str = "s3chown_core::dispatcher";
pub const TRACING_TARGET_REMEDIATOR: &str = "s3chown_core::remediator";
pub const TRACING_TARGET_RUN: &str = "s3chown_core::run";

// Re-export for convenience
pub use crate::descriptor::ObjectDescriptor;
pub use crate::error::{RemediateError, RemediationStep, RunError, StoreError, StoreResult};
pub use crate::handle_cache::HandleCache;
pub use crate::lister::ObjectLister;
pub use crate::run::{DEFAULT_NUM_WORKERS, RunConfig, RunReport, run};
pub use crate::store::{AclHandle, AclHandleFactory, ListPage, ObjectStore};
