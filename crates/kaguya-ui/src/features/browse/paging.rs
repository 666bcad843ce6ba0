//! Incremental page loader keyed by the browse filter.
//!
//! # Design
//! - At most one request is in flight per source.
//! - Every key change opens a new session; a response carries the ticket it was
//!   issued with and is dropped when its session is gone.
//! - Failures are sticky until retried or cleared; accumulated items survive them.

use kaguya_api_models::Page;
use tracing::{debug, warn};

use crate::features::browse::fetch::FetchError;
use crate::features::browse::filters::BrowseQuery;

/// Normalized filter that identifies a result session.
///
/// Keywords are trimmed and multi-value fields sorted, so reordering a
/// selection does not start a new session. Edits that only change keyword
/// whitespace still move the address but keep the loaded results.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FetchKey(BrowseQuery);

impl FetchKey {
    /// Normalize `query` into a key.
    #[must_use]
    pub fn new(query: &BrowseQuery) -> Self {
        let mut normalized = query.clone();
        normalized.keyword = normalized.keyword.trim().to_string();
        normalized.genres.sort_unstable();
        normalized.genres.dedup();
        normalized.tags.sort_unstable();
        normalized.tags.dedup();
        normalized.countries.sort_unstable();
        normalized.countries.dedup();
        Self(normalized)
    }

    /// Normalized filter.
    #[must_use]
    pub const fn query(&self) -> &BrowseQuery {
        &self.0
    }
}

/// Identifies one issued request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    session: u64,
    page: u32,
}

impl FetchTicket {
    /// Session the request belongs to.
    #[must_use]
    pub const fn session(self) -> u64 {
        self.session
    }

    /// Requested page (one-based).
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }
}

/// Work order handed to a fetch collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// Ticket to hand back to [`PagedSource::resolve`].
    pub ticket: FetchTicket,
    /// Normalized filter to fetch.
    pub query: BrowseQuery,
    /// Requested page (one-based).
    pub page: u32,
}

/// Observable lifecycle of a [`PagedSource`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchPhase {
    /// Nothing loaded and nothing in flight: either no key yet, or a failed
    /// first page whose error was cleared without a retry.
    Idle,
    /// First page of the current session in flight.
    LoadingFirstPage,
    /// Items loaded, more may follow.
    HasData,
    /// A continuation page is in flight.
    LoadingNextPage,
    /// Last request failed.
    Error,
    /// No further pages.
    Exhausted,
}

/// What [`PagedSource::resolve`] did with a response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveOutcome {
    /// Response belonged to a superseded session or request and was dropped.
    Stale,
    /// Items were appended.
    Appended {
        /// Number of items added.
        added: usize,
        /// Whether another page exists.
        has_next: bool,
    },
    /// The request failed; the error flag is set.
    Failed,
}

/// Accumulated results for the current filter.
#[derive(Clone, Debug)]
pub struct PagedSource<T> {
    key: Option<FetchKey>,
    session: u64,
    items: Vec<T>,
    pages_loaded: u32,
    has_next: bool,
    in_flight: Option<FetchTicket>,
    error: Option<FetchError>,
    failed_page: Option<u32>,
}

impl<T> Default for PagedSource<T> {
    fn default() -> Self {
        Self {
            key: None,
            session: 0,
            items: Vec::new(),
            pages_loaded: 0,
            has_next: false,
            in_flight: None,
            error: None,
            failed_page: None,
        }
    }
}

impl<T> PagedSource<T> {
    /// Empty, unkeyed source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the source at `query`.
    ///
    /// Returns the first-page request when the normalized key changed; an
    /// equal key leaves the session untouched.
    pub fn set_key(&mut self, query: &BrowseQuery) -> Option<PageRequest> {
        let key = FetchKey::new(query);
        if self.key.as_ref() == Some(&key) {
            return None;
        }
        self.session += 1;
        if self.in_flight.is_some() {
            debug!(session = self.session, "superseding in-flight browse request");
        }
        debug!(session = self.session, "browse session reset");
        self.items.clear();
        self.pages_loaded = 0;
        self.has_next = false;
        self.error = None;
        self.failed_page = None;
        self.key = Some(key);
        Some(self.issue(1))
    }

    /// Request the page after the last loaded one.
    ///
    /// No-op before the first key, while a request is in flight, or when the
    /// last page reported no continuation.
    pub fn fetch_next_page(&mut self) -> Option<PageRequest> {
        if self.key.is_none() {
            debug!("next page requested before a filter was set");
            return None;
        }
        if self.in_flight.is_some() {
            debug!(session = self.session, "next page already in flight");
            return None;
        }
        if !self.has_next {
            debug!(session = self.session, "no further pages");
            return None;
        }
        self.error = None;
        self.failed_page = None;
        Some(self.issue(self.pages_loaded + 1))
    }

    /// Apply a response.
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<Page<T>, FetchError>) -> ResolveOutcome {
        if self.in_flight != Some(ticket) {
            debug!(
                session = ticket.session,
                current = self.session,
                page = ticket.page,
                "discarding stale browse page"
            );
            return ResolveOutcome::Stale;
        }
        self.in_flight = None;
        match result {
            Ok(page) => {
                let added = page.data.len();
                self.items.extend(page.data);
                self.pages_loaded = ticket.page;
                self.has_next = page.has_next_page;
                ResolveOutcome::Appended {
                    added,
                    has_next: self.has_next,
                }
            }
            Err(err) => {
                warn!(error = %err, page = ticket.page, "browse page fetch failed");
                self.error = Some(err);
                self.failed_page = Some(ticket.page);
                ResolveOutcome::Failed
            }
        }
    }

    /// Re-request the page that failed.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() {
            return None;
        }
        let page = self.failed_page.take()?;
        self.error = None;
        Some(self.issue(page))
    }

    /// Drop the error flag without re-requesting.
    pub fn clear_error(&mut self) {
        self.error = None;
        self.failed_page = None;
    }

    /// Current lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> FetchPhase {
        if self.key.is_none() {
            return FetchPhase::Idle;
        }
        if self.in_flight.is_some() {
            return if self.pages_loaded == 0 {
                FetchPhase::LoadingFirstPage
            } else {
                FetchPhase::LoadingNextPage
            };
        }
        if self.error.is_some() {
            return FetchPhase::Error;
        }
        if self.pages_loaded == 0 {
            FetchPhase::Idle
        } else if self.has_next {
            FetchPhase::HasData
        } else {
            FetchPhase::Exhausted
        }
    }

    /// Accumulated items in fetch order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Whether no page of the current session has arrived yet and one is loading.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.in_flight.is_some() && self.pages_loaded == 0
    }

    /// Whether a continuation page is in flight.
    #[must_use]
    pub const fn is_fetching_next_page(&self) -> bool {
        self.in_flight.is_some() && self.pages_loaded > 0
    }

    /// Whether the last loaded page reported a continuation.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.has_next
    }

    /// Active error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    /// Current key.
    #[must_use]
    pub const fn key(&self) -> Option<&FetchKey> {
        self.key.as_ref()
    }

    /// Current session counter.
    #[must_use]
    pub const fn session(&self) -> u64 {
        self.session
    }

    /// Pages loaded in this session.
    #[must_use]
    pub const fn pages_loaded(&self) -> u32 {
        self.pages_loaded
    }

    fn issue(&mut self, page: u32) -> PageRequest {
        let ticket = FetchTicket {
            session: self.session,
            page,
        };
        self.in_flight = Some(ticket);
        let query = self
            .key
            .as_ref()
            .map(|key| key.query().clone())
            .unwrap_or_default();
        debug!(session = self.session, page, "requesting browse page");
        PageRequest {
            ticket,
            query,
            page,
        }
    }
}
