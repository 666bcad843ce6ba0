//! Filterable, incrementally loaded browse list.

pub mod catalog;
pub mod fetch;
pub mod filters;
pub mod form;
pub mod paging;
pub mod query;
pub mod session;
pub mod sync;
pub mod view;
