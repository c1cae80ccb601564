pub mod cli;
pub mod config;
pub mod conventional;
pub mod domain;
pub mod env_file;
pub mod error;
pub mod export;
pub mod git;
pub mod manifest;
pub mod render;
pub mod rewrite;
pub mod ui;
pub mod version_store;
pub mod warnings;

pub use error::{ReleaseError, Result};

/// Route `tracing` output to stderr, `warn` unless `RUST_LOG` says otherwise
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
