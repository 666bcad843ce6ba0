//! Writes the browse filter into the address bar.
//!
//! # Design
//! - The synchronizer only acts while the form is dirty, which makes it idempotent.
//! - The dirty flag is cleared before the address is written; a failed write
//!   raises it again so the next reaction retries.
//! - History entries are replaced, never pushed.

use thiserror::Error;
use tracing::{debug, warn};

use crate::features::browse::form::BrowseForm;
use crate::features::browse::query::QueryMap;

/// Failures reported by a [`NavigationSink`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// No router or history is available.
    #[error("navigation is unavailable")]
    Unavailable,
    /// The host rejected the address.
    #[error("navigation rejected: {0}")]
    Rejected(String),
}

/// Replaces the current history entry.
pub trait NavigationSink {
    /// Replace the current entry with `path` plus `query`.
    ///
    /// # Errors
    /// Returns [`NavigationError`] when the host cannot update its address.
    fn replace(&mut self, path: &str, query: &QueryMap) -> Result<(), NavigationError>;
}

impl<N: NavigationSink + ?Sized> NavigationSink for &mut N {
    fn replace(&mut self, path: &str, query: &QueryMap) -> Result<(), NavigationError> {
        (**self).replace(path, query)
    }
}

/// Result of one synchronizer pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The form was clean; nothing was written.
    Clean,
    /// The address was replaced with this query.
    Replaced(QueryMap),
}

/// Mirrors the dirty form into the address through a [`NavigationSink`].
#[derive(Debug)]
pub struct QuerySynchronizer<N> {
    path: String,
    sink: N,
}

impl<N: NavigationSink> QuerySynchronizer<N> {
    /// Create a synchronizer writing under `path`.
    pub fn new(path: impl Into<String>, sink: N) -> Self {
        Self {
            path: path.into(),
            sink,
        }
    }

    /// Pathname written on every replace.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Underlying sink.
    #[must_use]
    pub const fn sink(&self) -> &N {
        &self.sink
    }

    /// Mutable access to the underlying sink.
    pub const fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    /// Run one pass: clear dirty, build the truthy-only query, replace the address.
    ///
    /// # Errors
    /// Returns the sink's [`NavigationError`]; the form is left dirty.
    pub fn sync(&mut self, form: &mut BrowseForm) -> Result<SyncOutcome, NavigationError> {
        if !form.is_dirty() {
            return Ok(SyncOutcome::Clean);
        }
        let snapshot = form.commit();
        let query = QueryMap::from_query(&snapshot);
        if let Err(err) = self.sink.replace(&self.path, &query) {
            warn!(error = %err, path = %self.path, "failed to replace browse address");
            form.mark_dirty();
            return Err(err);
        }
        debug!(path = %self.path, query = %query.to_query_string(), "browse address replaced");
        Ok(SyncOutcome::Replaced(query))
    }
}
