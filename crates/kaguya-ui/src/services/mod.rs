//! HTTP services for the browser host.

pub mod api;
