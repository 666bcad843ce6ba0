//! Fake collaborators for the browse session.

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use kaguya_api_models::Page;
use kaguya_ui::features::browse::fetch::{FetchError, PageFetcher};
use kaguya_ui::features::browse::filters::BrowseQuery;
use kaguya_ui::features::browse::query::QueryMap;
use kaguya_ui::features::browse::sync::{NavigationError, NavigationSink};

/// Navigation sink that records every replaced address.
#[derive(Debug, Default)]
pub struct RecordingNavigation {
    /// Addresses written, as `path?query`.
    pub addresses: Vec<String>,
    /// Number of upcoming calls that fail.
    pub failures_pending: usize,
}

impl RecordingNavigation {
    /// Sink whose next `count` calls fail.
    #[must_use]
    pub fn failing(count: usize) -> Self {
        Self {
            addresses: Vec::new(),
            failures_pending: count,
        }
    }

    /// Last address written.
    #[must_use]
    pub fn last(&self) -> Option<&str> {
        self.addresses.last().map(String::as_str)
    }
}

impl NavigationSink for RecordingNavigation {
    fn replace(&mut self, path: &str, query: &QueryMap) -> Result<(), NavigationError> {
        if self.failures_pending > 0 {
            self.failures_pending -= 1;
            return Err(NavigationError::Unavailable);
        }
        let rendered = query.to_query_string();
        if rendered.is_empty() {
            self.addresses.push(path.to_string());
        } else {
            self.addresses.push(format!("{path}?{rendered}"));
        }
        Ok(())
    }
}

/// Fetcher that replays scripted responses and records each call.
#[derive(Debug)]
pub struct ScriptedFetcher<T> {
    responses: RefCell<VecDeque<Result<Page<T>, FetchError>>>,
    calls: RefCell<Vec<(BrowseQuery, u32)>>,
}

impl<T> Default for ScriptedFetcher<T> {
    fn default() -> Self {
        Self {
            responses: RefCell::new(VecDeque::new()),
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl<T> ScriptedFetcher<T> {
    /// Fetcher that answers with `responses` in order.
    #[must_use]
    pub fn new(responses: impl IntoIterator<Item = Result<Page<T>, FetchError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into_iter().collect()),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Queue another response.
    pub fn push(&self, response: Result<Page<T>, FetchError>) {
        self.responses.borrow_mut().push_back(response);
    }

    /// Every `(query, page)` requested so far.
    #[must_use]
    pub fn calls(&self) -> Vec<(BrowseQuery, u32)> {
        self.calls.borrow().clone()
    }
}

#[async_trait(?Send)]
impl<T> PageFetcher<T> for ScriptedFetcher<T> {
    async fn fetch_page(&self, query: &BrowseQuery, page: u32) -> Result<Page<T>, FetchError> {
        self.calls.borrow_mut().push((query.clone(), page));
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::transport("no scripted response left")))
    }
}
