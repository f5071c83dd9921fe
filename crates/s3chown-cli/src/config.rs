//! CLI configuration.
//!
//! All options can be provided via CLI arguments; the resume cursor and
//! worker count also accept environment variables. Use `--help` to see the
//! full surface.

use clap::Parser;
use s3chown_core::{DEFAULT_NUM_WORKERS, RunConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::TRACING_TARGET_STARTUP;

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "s3chown")]
#[command(about = "Grants the bucket owner full control over objects under an S3 prefix")]
#[command(version)]
pub struct Cli {
    /// Bucket holding the objects to remediate.
    pub bucket_name: String,

    /// Key prefix to remediate; a trailing `/` denotes a folder.
    pub prefix: String,

    /// Enables verbose request/response logging for the S3 client.
    #[arg(long)]
    pub debug: bool,

    /// Resume cursor: only keys strictly after this one are processed.
    #[arg(long, env = "S3CHOWN_START_AFTER", default_value = "")]
    pub start_after: String,

    /// Size of the concurrent worker pool.
    #[arg(long, env = "S3CHOWN_NUM_WORKERS", default_value_t = DEFAULT_NUM_WORKERS)]
    pub num_workers: usize,
}

impl Cli {
    /// Initializes tracing with environment-based filtering.
    ///
    /// `--debug` lowers the default level to `debug` and enables the AWS
    /// SDK's own request/response targets; `RUST_LOG` still wins when set.
    pub fn init_tracing(&self) {
        let default = if self.debug {
            "debug,aws_sdk_s3=debug,aws_smithy_runtime=debug,hyper=info"
        } else {
            "info"
        };
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Logs the effective configuration at startup (no sensitive information).
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            bucket = %self.bucket_name,
            prefix = %self.prefix,
            start_after = %self.start_after,
            num_workers = self.num_workers,
            debug = self.debug,
            "Run configuration"
        );
    }

    /// Converts the parsed arguments into a core run configuration.
    pub fn run_config(&self) -> RunConfig {
        RunConfig::new(&self.bucket_name, &self.prefix)
            .with_start_after(&self.start_after)
            .with_num_workers(self.num_workers)
    }
}
