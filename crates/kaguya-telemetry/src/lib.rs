#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::multiple_crate_versions)]
//! Logging setup shared by Kaguya native hosts.
//!
//! The browser build reports through the console; everything that runs under
//! a native runtime installs its subscriber here.

mod init;

pub use init::{
    DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, UnknownLogFormat, build_sha, init_logging,
    log_format_from_config,
};
