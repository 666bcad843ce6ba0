//! Router-backed navigation sink.

use crate::app::routes::Route;
use crate::features::browse::query::QueryMap;
use crate::features::browse::sync::{NavigationError, NavigationSink};
use yew_router::prelude::*;

/// Replaces the current history entry through the Yew router.
pub(crate) struct RouterNavigation {
    navigator: Option<Navigator>,
}

impl RouterNavigation {
    pub(crate) const fn new(navigator: Option<Navigator>) -> Self {
        Self { navigator }
    }
}

impl NavigationSink for RouterNavigation {
    fn replace(&mut self, path: &str, query: &QueryMap) -> Result<(), NavigationError> {
        let navigator = self
            .navigator
            .as_ref()
            .ok_or(NavigationError::Unavailable)?;
        let route = Route::recognize(path)
            .filter(|route| *route != Route::NotFound)
            .ok_or_else(|| NavigationError::Rejected(format!("no route for `{path}`")))?;
        navigator
            .replace_with_query(&route, query)
            .map_err(|err| NavigationError::Rejected(err.to_string()))
    }
}
