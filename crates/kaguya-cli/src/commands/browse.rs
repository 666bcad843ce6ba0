use anyhow::anyhow;
use kaguya_api_models::MediaSummary;
use kaguya_ui::features::browse::fetch::PageFetcher;
use kaguya_ui::features::browse::paging::{PageRequest, ResolveOutcome};
use tracing::{debug, info};

use crate::cli::{BrowseArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult, HttpFetcher, classify_fetch_error};
use crate::commands::{CliSession, prepare_session, share_link};
use crate::output::{BrowseReport, render_browse};

pub(crate) async fn handle_browse(
    ctx: &AppContext,
    args: BrowseArgs,
    format: OutputFormat,
) -> CliResult<()> {
    if args.pages == 0 {
        return Err(CliError::validation("--pages must be at least 1"));
    }
    let (mut session, pending) = prepare_session(ctx, &args.filters)?;
    let fetcher = HttpFetcher::new(ctx);
    let pages = collect_pages(&mut session, &fetcher, pending, args.pages).await?;

    let report = BrowseReport {
        link: share_link(ctx, &session)?,
        pages,
        has_next_page: session.source().has_next_page(),
        items: session.source().items(),
    };
    render_browse(&report, format, &ctx.bundle)
}

/// Fetch sequentially until `max_pages` pages landed or the results run out.
pub(crate) async fn collect_pages<F>(
    session: &mut CliSession,
    fetcher: &F,
    first: Option<PageRequest>,
    max_pages: u32,
) -> CliResult<u32>
where
    F: PageFetcher<MediaSummary> + ?Sized,
{
    let mut next = first;
    let mut pages = 0;
    while let Some(request) = next.take() {
        let result = fetcher.fetch_page(&request.query, request.page).await;
        match session.resolve(request.ticket, result) {
            ResolveOutcome::Appended { added, has_next } => {
                pages += 1;
                debug!(page = request.page, added, has_next, "browse page loaded");
            }
            ResolveOutcome::Stale => debug!(page = request.page, "ignoring superseded page"),
            ResolveOutcome::Failed => {
                return Err(session.source().error().map_or_else(
                    || CliError::failure(anyhow!("page {} failed", request.page)),
                    classify_fetch_error,
                ));
            }
        }
        if pages < max_pages {
            next = session.on_sentinel_visible();
        }
    }
    info!(pages, items = session.source().items().len(), "browse finished");
    Ok(pages)
}
