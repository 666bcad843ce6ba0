//! Browse form state: current filter, defaults, and the dirty flag.
//!
//! # Design
//! - Only user-driven edits mark the form dirty; programmatic resets never do.
//! - Every change publishes the whole filter to subscribers, never a diff.
//! - Keyword edits go through a [`Debouncer`] so a typing burst lands once.

use std::fmt;
use std::time::Duration;

use tracing::trace;

use crate::core::debounce::Debouncer;
use crate::features::browse::filters::{BrowseQuery, FieldError, FieldUpdate, FilterField};

/// Observer notified with the full filter after every change.
pub type SnapshotListener = Box<dyn FnMut(&BrowseQuery)>;

/// Editable browse filter with dirty tracking.
pub struct BrowseForm {
    values: BrowseQuery,
    defaults: BrowseQuery,
    dirty: bool,
    revision: u64,
    keyword: Debouncer<String>,
    listeners: Vec<SnapshotListener>,
}

impl fmt::Debug for BrowseForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("BrowseForm")
            .field("values", &self.values)
            .field("defaults", &self.defaults)
            .field("dirty", &self.dirty)
            .field("revision", &self.revision)
            .field("keyword", &self.keyword)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl BrowseForm {
    /// Create a clean form seeded from `defaults`.
    #[must_use]
    pub fn new(defaults: BrowseQuery, debounce: Duration) -> Self {
        Self {
            values: defaults.clone(),
            defaults,
            dirty: false,
            revision: 0,
            keyword: Debouncer::new(debounce),
            listeners: Vec::new(),
        }
    }

    /// Current filter.
    #[must_use]
    pub const fn values(&self) -> &BrowseQuery {
        &self.values
    }

    /// Defaults the dirty flag is measured against.
    #[must_use]
    pub const fn defaults(&self) -> &BrowseQuery {
        &self.defaults
    }

    /// Whether the user changed the filter since the last commit.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Monotonic counter bumped on every published change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Register a snapshot observer.
    pub fn subscribe(&mut self, listener: impl FnMut(&BrowseQuery) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Apply a user edit from a structured control. Returns whether the filter changed.
    pub fn set_field(&mut self, update: FieldUpdate) -> bool {
        let field = update.field();
        if field == FilterField::Keyword {
            self.keyword.cancel();
        }
        if !self.values.apply(update) {
            return false;
        }
        trace!(field = field.param(), "browse filter edited");
        self.dirty = true;
        self.publish();
        true
    }

    /// Apply raw control tokens for `field`.
    ///
    /// # Errors
    /// Returns [`FieldError`] when the tokens do not form a valid value.
    pub fn set_control(&mut self, field: FilterField, tokens: &[String]) -> Result<bool, FieldError> {
        let update = FieldUpdate::from_control(field, tokens)?;
        Ok(self.set_field(update))
    }

    /// Queue a keyword edit; it lands once input has been quiet for the debounce period.
    pub fn set_keyword_debounced(&mut self, text: impl Into<String>, now: Duration) {
        self.keyword.push(text.into(), now);
    }

    /// When the queued keyword settles, if one is queued.
    #[must_use]
    pub fn keyword_deadline(&self) -> Option<Duration> {
        self.keyword.deadline()
    }

    /// Apply a settled keyword. Returns whether the filter changed.
    pub fn poll(&mut self, now: Duration) -> bool {
        match self.keyword.poll(now) {
            Some(keyword) => self.apply_keyword(keyword),
            None => false,
        }
    }

    /// Apply a queued keyword immediately (e.g. on submit).
    pub fn flush_keyword(&mut self) -> bool {
        match self.keyword.flush() {
            Some(keyword) => self.apply_keyword(keyword),
            None => false,
        }
    }

    /// Accept the current values as the new defaults and clear the dirty flag.
    pub fn commit(&mut self) -> BrowseQuery {
        self.dirty = false;
        self.defaults = self.values.clone();
        self.values.clone()
    }

    /// Re-raise the dirty flag so the next cycle picks the filter up again.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Programmatically replace values and defaults; never marks the form dirty.
    pub fn reset(&mut self, query: BrowseQuery) {
        self.keyword.cancel();
        self.dirty = false;
        self.defaults = query.clone();
        if self.values != query {
            self.values = query;
            self.publish();
        }
    }

    /// Adopt caller-supplied defaults wholesale. Returns whether the filter changed.
    ///
    /// Supplying the defaults the form already shows is a no-op, so an address
    /// written by the synchronizer and read back does not loop.
    pub fn replace_defaults(&mut self, query: BrowseQuery) -> bool {
        if query == self.values {
            self.defaults = query;
            return false;
        }
        self.reset(query);
        true
    }

    fn apply_keyword(&mut self, keyword: String) -> bool {
        if !self.values.apply(FieldUpdate::Keyword(keyword)) {
            return false;
        }
        trace!(field = "keyword", "browse filter edited");
        self.dirty = true;
        self.publish();
        true
    }

    fn publish(&mut self) {
        self.revision += 1;
        for listener in &mut self.listeners {
            listener(&self.values);
        }
    }
}
