//! One browse view: form, address synchronizer and result source wired together.
//!
//! Every reaction runs the synchronizer before re-keying the source, so the
//! address always reflects the filter a request was issued for.

use std::time::Duration;

use kaguya_api_models::Page;

use crate::core::settings::BrowseSettings;
use crate::features::browse::fetch::FetchError;
use crate::features::browse::filters::{BrowseQuery, FieldError, FieldUpdate, FilterField};
use crate::features::browse::form::BrowseForm;
use crate::features::browse::paging::{FetchTicket, PageRequest, PagedSource, ResolveOutcome};
use crate::features::browse::query::QueryMap;
use crate::features::browse::sync::{NavigationError, NavigationSink, QuerySynchronizer, SyncOutcome};
use crate::features::browse::view::{self, ListState, ListView};

/// Side effects a host must carry out after a reaction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Reaction {
    /// Query written to the address, if the form was dirty.
    pub replaced: Option<QueryMap>,
    /// Address write failure; the form stays dirty.
    pub navigation_error: Option<NavigationError>,
    /// Page request to hand to the fetcher.
    pub request: Option<PageRequest>,
}

impl Reaction {
    /// Whether the host has nothing to do.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.replaced.is_none() && self.navigation_error.is_none() && self.request.is_none()
    }
}

/// Browse view controller shared by every host.
#[derive(Debug)]
pub struct BrowseSession<N, T> {
    form: BrowseForm,
    sync: QuerySynchronizer<N>,
    source: PagedSource<T>,
}

impl<N: NavigationSink, T> BrowseSession<N, T> {
    /// Build a session from settings, the initial filter and a navigation sink.
    pub fn new(settings: &BrowseSettings, defaults: BrowseQuery, sink: N) -> Self {
        Self {
            form: BrowseForm::new(defaults, settings.debounce()),
            sync: QuerySynchronizer::new(settings.browse_path.clone(), sink),
            source: PagedSource::new(),
        }
    }

    /// Start the first session. The address is left alone until the user edits.
    pub fn mount(&mut self) -> Reaction {
        self.react()
    }

    /// Apply a structured control edit.
    pub fn set_field(&mut self, update: FieldUpdate) -> Reaction {
        self.form.set_field(update);
        self.react()
    }

    /// Apply raw control tokens.
    ///
    /// # Errors
    /// Returns [`FieldError`] when the tokens are not valid for `field`.
    pub fn set_control(&mut self, field: FilterField, tokens: &[String]) -> Result<Reaction, FieldError> {
        self.form.set_control(field, tokens)?;
        Ok(self.react())
    }

    /// Queue a keystroke; [`BrowseSession::tick`] applies it once settled.
    pub fn set_keyword_debounced(&mut self, text: impl Into<String>, now: Duration) {
        self.form.set_keyword_debounced(text, now);
    }

    /// When the host should call [`BrowseSession::tick`] next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.form.keyword_deadline()
    }

    /// Advance time: apply a settled keyword and react.
    pub fn tick(&mut self, now: Duration) -> Reaction {
        self.form.poll(now);
        self.react()
    }

    /// Apply a pending keystroke now instead of waiting for the debounce.
    pub fn submit_keyword(&mut self) -> Reaction {
        self.form.flush_keyword();
        self.react()
    }

    /// Caller supplied a new default filter.
    pub fn replace_default_query(&mut self, query: BrowseQuery) -> Reaction {
        self.form.replace_defaults(query);
        self.react()
    }

    /// Sentinel entered the viewport.
    pub fn on_sentinel_visible(&mut self) -> Option<PageRequest> {
        view::on_sentinel_visible(&mut self.source)
    }

    /// Re-request the failed page.
    pub fn retry(&mut self) -> Option<PageRequest> {
        self.source.retry()
    }

    /// Feed a fetch result back.
    pub fn resolve(&mut self, ticket: FetchTicket, result: Result<Page<T>, FetchError>) -> ResolveOutcome {
        self.source.resolve(ticket, result)
    }

    /// Current list layout.
    #[must_use]
    pub fn view(&self) -> ListView {
        view::list_view(&ListState::from_source(&self.source))
    }

    /// Form state.
    #[must_use]
    pub const fn form(&self) -> &BrowseForm {
        &self.form
    }

    /// Mutable form state, e.g. to subscribe.
    pub const fn form_mut(&mut self) -> &mut BrowseForm {
        &mut self.form
    }

    /// Result source.
    #[must_use]
    pub const fn source(&self) -> &PagedSource<T> {
        &self.source
    }

    /// Address synchronizer.
    #[must_use]
    pub const fn synchronizer(&self) -> &QuerySynchronizer<N> {
        &self.sync
    }

    fn react(&mut self) -> Reaction {
        let mut reaction = Reaction::default();
        match self.sync.sync(&mut self.form) {
            Ok(SyncOutcome::Replaced(query)) => reaction.replaced = Some(query),
            Ok(SyncOutcome::Clean) => {}
            Err(err) => reaction.navigation_error = Some(err),
        }
        reaction.request = self.source.set_key(self.form.values());
        reaction
    }
}
