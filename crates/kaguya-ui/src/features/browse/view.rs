//! Pure layout decisions for the browse result list.

use crate::features::browse::paging::{PageRequest, PagedSource};

/// Flags the list layout is derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListState {
    /// First page of the session is loading.
    pub is_loading: bool,
    /// A continuation page is loading.
    pub is_fetching_next_page: bool,
    /// The last page reported a continuation.
    pub has_next_page: bool,
    /// The last request failed.
    pub is_error: bool,
    /// Accumulated item count.
    pub item_count: usize,
}

impl ListState {
    /// Snapshot the flags of a source.
    #[must_use]
    pub fn from_source<T>(source: &PagedSource<T>) -> Self {
        Self {
            is_loading: source.is_loading(),
            is_fetching_next_page: source.is_fetching_next_page(),
            has_next_page: source.has_next_page(),
            is_error: source.error().is_some(),
            item_count: source.items().len(),
        }
    }
}

/// What the list renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListView {
    /// Nothing loaded yet: one full-list placeholder.
    Loading,
    /// Items plus trailing affordances.
    Ready {
        /// Skeleton row below the items while the next page loads.
        trailing_placeholder: bool,
        /// Viewport sentinel that requests the next page.
        sentinel: bool,
        /// End-of-results marker.
        end_marker: bool,
        /// Fetch failure notice with a retry affordance.
        error_notice: bool,
    },
}

/// Decide the list layout.
#[must_use]
pub const fn list_view(state: &ListState) -> ListView {
    if state.is_loading {
        return ListView::Loading;
    }
    let has_items = state.item_count > 0;
    ListView::Ready {
        trailing_placeholder: state.is_fetching_next_page && !state.is_error,
        sentinel: !state.is_error
            && ((has_items && !state.is_fetching_next_page) || state.has_next_page),
        end_marker: !state.has_next_page && has_items,
        error_notice: state.is_error,
    }
}

/// Sentinel scrolled into view; request the next page when allowed.
pub fn on_sentinel_visible<T>(source: &mut PagedSource<T>) -> Option<PageRequest> {
    if source.error().is_some() {
        return None;
    }
    source.fetch_next_page()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::browse::fetch::FetchError;
    use crate::features::browse::filters::BrowseQuery;
    use kaguya_api_models::Page;

    #[test]
    fn first_load_shows_the_full_placeholder() {
        let view = list_view(&ListState {
            is_loading: true,
            ..ListState::default()
        });
        assert_eq!(view, ListView::Loading);
    }

    #[test]
    fn next_page_loading_shows_trailing_placeholder() {
        let view = list_view(&ListState {
            is_fetching_next_page: true,
            has_next_page: true,
            item_count: 30,
            ..ListState::default()
        });
        assert_eq!(view, ListView::Ready {
            trailing_placeholder: true,
            sentinel: true,
            end_marker: false,
            error_notice: false,
        });
    }

    #[test]
    fn exhausted_list_shows_end_marker_without_sentinel_request() {
        let mut source = PagedSource::new();
        let first = source.set_key(&BrowseQuery::default()).unwrap();
        source.resolve(first.ticket, Ok(Page::new(vec![1_u32, 2], 1, false)));
        let view = list_view(&ListState::from_source(&source));
        assert_eq!(view, ListView::Ready {
            trailing_placeholder: false,
            sentinel: true,
            end_marker: true,
            error_notice: false,
        });
        assert_eq!(on_sentinel_visible(&mut source), None);
    }

    #[test]
    fn empty_result_shows_neither_marker_nor_sentinel() {
        let view = list_view(&ListState::default());
        assert_eq!(view, ListView::Ready {
            trailing_placeholder: false,
            sentinel: false,
            end_marker: false,
            error_notice: false,
        });
    }

    #[test]
    fn errors_hide_the_sentinel_and_block_requests() {
        let mut source = PagedSource::new();
        let first = source.set_key(&BrowseQuery::default()).unwrap();
        source.resolve(first.ticket, Ok(Page::new(vec![1_u32], 1, true)));
        let second = on_sentinel_visible(&mut source).unwrap();
        source.resolve(second.ticket, Err(FetchError::transport("offline")));
        let view = list_view(&ListState::from_source(&source));
        assert_eq!(view, ListView::Ready {
            trailing_placeholder: false,
            sentinel: false,
            end_marker: false,
            error_notice: true,
        });
        assert_eq!(on_sentinel_visible(&mut source), None);
    }
}
