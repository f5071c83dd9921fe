#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod config;

use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use s3chown_aws::{S3AclHandleFactory, S3Store};

use crate::config::Cli;

// Tracing target constants
pub const TRACING_TARGET_STARTUP: &str = "s3chown_cli::startup";
pub const TRACING_TARGET_SHUTDOWN: &str = "s3chown_cli::shutdown";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SHUTDOWN,
            error = %error,
            "run terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    cli.init_tracing();
    cli.log();

    let run_config = cli.run_config();
    run_config.validate().context("invalid run configuration")?;

    let sdk_config = s3chown_aws::load_sdk_config().await;
    let store = Arc::new(S3Store::new(&sdk_config));
    let factory = Arc::new(S3AclHandleFactory::new(sdk_config));

    s3chown_core::run(&run_config, store, factory)
        .await
        .context("remediation run aborted")?;

    Ok(())
}
