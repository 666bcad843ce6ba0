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
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Kaguya browse view.
//!
//! `core` and `features` are DOM-free and run on any target; the Yew app shell,
//! components and HTTP services only build for `wasm32`.

pub mod core;
pub mod features;
pub mod i18n;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
pub mod components;
#[cfg(target_arch = "wasm32")]
pub mod services;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

pub use crate::core::settings::BrowseSettings;
pub use crate::features::browse::filters::{BrowseQuery, FieldUpdate, FilterField};
pub use crate::features::browse::session::{BrowseSession, Reaction};
