#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod client;
mod error;
mod store;

pub use client::load_sdk_config;
pub use store::{S3AclHandle, S3AclHandleFactory, S3Store};

/// Tracing target for AWS store operations.
pub const TRACING_TARGET: &str = "s3chown_aws";
