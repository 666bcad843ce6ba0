//! Command handlers and the headless browse session they share.

pub(crate) mod browse;
pub(crate) mod link;

use kaguya_api_models::MediaSummary;
use kaguya_ui::features::browse::filters::BrowseQuery;
use kaguya_ui::features::browse::paging::PageRequest;
use kaguya_ui::features::browse::query::QueryMap;
use kaguya_ui::features::browse::session::BrowseSession;
use kaguya_ui::features::browse::sync::{NavigationError, NavigationSink};
use tracing::debug;

use crate::cli::FilterArgs;
use crate::client::{AppContext, CliError, CliResult};

/// Browse session driven from the terminal.
pub(crate) type CliSession = BrowseSession<ShareSink, MediaSummary>;

/// Navigation sink that keeps the last address instead of moving a browser.
#[derive(Debug, Default)]
pub(crate) struct ShareSink {
    last: Option<String>,
}

impl NavigationSink for ShareSink {
    fn replace(&mut self, path: &str, query: &QueryMap) -> Result<(), NavigationError> {
        let address = render_address(path, query);
        debug!(%address, "share link updated");
        self.last = Some(address);
        Ok(())
    }
}

fn render_address(path: &str, query: &QueryMap) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{}", query.to_query_string())
    }
}

/// Build a session from `--from`, apply every filter flag as an edit and
/// return the request for the resulting filter.
pub(crate) fn prepare_session(
    ctx: &AppContext,
    filters: &FilterArgs,
) -> CliResult<(CliSession, Option<PageRequest>)> {
    let defaults = filters
        .from_query()
        .map(BrowseQuery::from_query_str)
        .unwrap_or_default();
    let mut session = BrowseSession::new(&ctx.settings, defaults, ShareSink::default());
    let mut pending = session.mount().request;
    for (field, tokens) in filters.edits() {
        let reaction = session
            .set_control(field, &tokens)
            .map_err(|err| CliError::validation(err.to_string()))?;
        if let Some(err) = reaction.navigation_error {
            return Err(CliError::failure(err));
        }
        pending = reaction.request.or(pending);
    }
    Ok((session, pending))
}

/// Address the session would share, absolute when `--web-url` is set.
pub(crate) fn share_link(ctx: &AppContext, session: &CliSession) -> CliResult<String> {
    let relative = session.synchronizer().sink().last.clone().unwrap_or_else(|| {
        render_address(
            session.synchronizer().path(),
            &session.form().values().to_query_map(),
        )
    });
    match &ctx.web_url {
        Some(origin) => origin
            .join(&relative)
            .map(String::from)
            .map_err(|err| CliError::validation(format!("invalid web URL: {err}"))),
        None => Ok(relative),
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::context;
    use super::*;

    fn filters(from: Option<&str>) -> FilterArgs {
        FilterArgs {
            from: from.map(ToString::to_string),
            ..FilterArgs::default()
        }
    }

    #[test]
    fn untouched_filters_share_the_default_address() {
        let ctx = context("http://127.0.0.1:7070", None);
        let (session, pending) = prepare_session(&ctx, &filters(None)).expect("session");
        assert_eq!(pending.map(|request| request.page), Some(1));
        assert_eq!(
            share_link(&ctx, &session).expect("link"),
            "/browse?type=anime&season=FALL&sort=average_score"
        );
    }

    #[test]
    fn edits_go_through_the_synchronizer() {
        let ctx = context("http://127.0.0.1:7070", Some("https://kaguya.example"));
        let mut args = filters(Some("/browse?season=WINTER&seasonYear=2023"));
        args.keyword = Some("naruto".into());
        args.countries = Some(vec!["JP".into()]);
        let (session, pending) = prepare_session(&ctx, &args).expect("session");
        let request = pending.expect("request for the edited filter");
        assert_eq!(request.query.keyword, "naruto");
        assert_eq!(
            share_link(&ctx, &session).expect("link"),
            "https://kaguya.example/browse?type=anime&season=WINTER&sort=average_score&keyword=naruto&seasonYear=2023&countries=JP"
        );
    }

    #[test]
    fn invalid_tokens_are_validation_errors() {
        let ctx = context("http://127.0.0.1:7070", None);
        let mut args = filters(None);
        args.season = Some("AUTUMN".into());
        let err = prepare_session(&ctx, &args).expect_err("unknown season");
        assert_eq!(err.exit_code(), 2);

        let mut args = filters(None);
        args.sort = Some(String::new());
        assert!(prepare_session(&ctx, &args).is_err());
    }
}
