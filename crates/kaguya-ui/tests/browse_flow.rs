use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use kaguya_api_models::{Genre, MediaSummary, SortOrder};
use kaguya_test_support::fixtures::media_page;
use kaguya_test_support::logging::init_test_logging;
use kaguya_test_support::mocks::{RecordingNavigation, ScriptedFetcher};
use kaguya_ui::features::browse::fetch::{FetchError, PageFetcher};
use kaguya_ui::features::browse::paging::{FetchKey, FetchPhase, PageRequest, ResolveOutcome};
use kaguya_ui::features::browse::view::ListView;
use kaguya_ui::{BrowseQuery, BrowseSession, BrowseSettings, FieldUpdate};

type Session = BrowseSession<RecordingNavigation, MediaSummary>;

fn session_with(sink: RecordingNavigation) -> Session {
    init_test_logging();
    BrowseSession::new(&BrowseSettings::default(), BrowseQuery::default(), sink)
}

const fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

async fn run(
    session: &mut Session,
    fetcher: &ScriptedFetcher<MediaSummary>,
    request: PageRequest,
) -> ResolveOutcome {
    let result = fetcher.fetch_page(&request.query, request.page).await;
    session.resolve(request.ticket, result)
}

#[tokio::test]
async fn keystroke_burst_updates_and_syncs_once() -> anyhow::Result<()> {
    let fetcher = ScriptedFetcher::new([Ok(media_page(1..=3, 1, true)), Ok(media_page([9], 1, false))]);
    let mut session = session_with(RecordingNavigation::default());
    let updates = Rc::new(Cell::new(0_u32));
    {
        let updates = Rc::clone(&updates);
        session.form_mut().subscribe(move |_| updates.set(updates.get() + 1));
    }

    let first = session.mount().request.ok_or_else(|| anyhow::anyhow!("mount issued no request"))?;
    run(&mut session, &fetcher, first).await;

    session.set_keyword_debounced("n", ms(0));
    session.set_keyword_debounced("na", ms(100));
    session.set_keyword_debounced("naruto", ms(200));
    assert_eq!(session.next_deadline(), Some(ms(700)));
    assert!(session.tick(ms(600)).is_idle());

    let reaction = session.tick(ms(700));
    assert_eq!(updates.get(), 1);
    assert_eq!(session.synchronizer().sink().addresses.len(), 1);
    let request = reaction.request.ok_or_else(|| anyhow::anyhow!("keyword did not refetch"))?;
    assert_eq!(request.query.keyword, "naruto");
    assert_eq!(request.page, 1);

    run(&mut session, &fetcher, request).await;
    assert_eq!(session.source().items().len(), 1);
    assert_eq!(fetcher.calls().len(), 2);
    Ok(())
}

#[tokio::test]
async fn repeated_sentinel_hits_issue_one_request() -> anyhow::Result<()> {
    let fetcher = ScriptedFetcher::new([Ok(media_page(1..=3, 1, true)), Ok(media_page(4..=6, 2, true))]);
    let mut session = session_with(RecordingNavigation::default());
    let first = session.mount().request.ok_or_else(|| anyhow::anyhow!("no first page"))?;
    run(&mut session, &fetcher, first).await;

    let next = session.on_sentinel_visible().ok_or_else(|| anyhow::anyhow!("no next page"))?;
    assert!(session.on_sentinel_visible().is_none());
    assert!(session.source().is_fetching_next_page());
    assert_eq!(next.page, 2);

    run(&mut session, &fetcher, next).await;
    let ids: Vec<u64> = session.source().items().iter().map(|media| media.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(fetcher.calls().len(), 2);
    Ok(())
}

#[tokio::test]
async fn last_page_shows_the_end_marker() -> anyhow::Result<()> {
    let fetcher = ScriptedFetcher::new([Ok(media_page(1..=2, 1, false))]);
    let mut session = session_with(RecordingNavigation::default());
    assert!(matches!(session.view(), ListView::Ready { sentinel: false, end_marker: false, .. }));
    let first = session.mount().request.ok_or_else(|| anyhow::anyhow!("no first page"))?;
    assert_eq!(session.view(), ListView::Loading);
    run(&mut session, &fetcher, first).await;

    assert_eq!(session.source().phase(), FetchPhase::Exhausted);
    assert!(matches!(session.view(), ListView::Ready { end_marker: true, .. }));
    assert!(session.on_sentinel_visible().is_none());
    assert_eq!(fetcher.calls().len(), 1);
    Ok(())
}

#[tokio::test]
async fn responses_for_an_old_filter_are_discarded() -> anyhow::Result<()> {
    let fetcher = ScriptedFetcher::new([Ok(media_page([1], 1, true)), Ok(media_page([7], 1, false))]);
    let mut session = session_with(RecordingNavigation::default());
    let stale = session.mount().request.ok_or_else(|| anyhow::anyhow!("no first page"))?;
    let fresh = session
        .set_field(FieldUpdate::Sort(SortOrder::Trending))
        .request
        .ok_or_else(|| anyhow::anyhow!("sort change did not refetch"))?;

    assert_eq!(run(&mut session, &fetcher, stale).await, ResolveOutcome::Stale);
    assert!(session.source().items().is_empty());
    assert_eq!(
        run(&mut session, &fetcher, fresh).await,
        ResolveOutcome::Appended { added: 1, has_next: false }
    );
    assert_eq!(session.source().items()[0].id, 7);
    Ok(())
}

#[test]
fn address_follows_keyword_in_and_out() {
    let mut session = session_with(RecordingNavigation::default());
    session.mount();
    session.set_field(FieldUpdate::Keyword("naruto".into()));
    session.set_field(FieldUpdate::Keyword(String::new()));
    assert_eq!(
        session.synchronizer().sink().addresses,
        vec![
            "/browse?type=anime&season=FALL&sort=average_score&keyword=naruto".to_string(),
            "/browse?type=anime&season=FALL&sort=average_score".to_string(),
        ]
    );
}

#[test]
fn requests_match_the_address_they_follow() {
    let mut session = session_with(RecordingNavigation::default());
    session.mount();
    let reaction = session.set_field(FieldUpdate::Genres(vec![Genre::Drama, Genre::Action]));
    assert!(!session.form().is_dirty());
    let written = session.synchronizer().sink().last().unwrap_or_default().to_string();
    let (_, raw_query) = written.split_once('?').unwrap_or_default();
    let request = reaction.request.unwrap();
    let parsed = BrowseQuery::from_query_str(raw_query);
    assert_eq!(parsed.genres, vec![Genre::Drama, Genre::Action]);
    assert_eq!(FetchKey::new(&parsed).query(), &request.query);
}

#[test]
fn failed_navigation_keeps_the_form_dirty_until_the_next_cycle() {
    let mut session = session_with(RecordingNavigation::failing(1));
    session.mount();
    let reaction = session.set_field(FieldUpdate::Sort(SortOrder::Popularity));
    assert!(reaction.navigation_error.is_some());
    assert!(reaction.request.is_some());
    assert!(session.form().is_dirty());
    assert!(session.synchronizer().sink().addresses.is_empty());

    let retried = session.tick(ms(1));
    assert!(retried.navigation_error.is_none());
    assert!(retried.request.is_none());
    assert!(!session.form().is_dirty());
    assert_eq!(
        session.synchronizer().sink().last(),
        Some("/browse?type=anime&season=FALL&sort=popularity")
    );
}

#[tokio::test]
async fn failed_pages_can_be_retried() -> anyhow::Result<()> {
    let fetcher = ScriptedFetcher::new([
        Ok(media_page(1..=2, 1, true)),
        Err(FetchError::status(503, "upstream unavailable")),
        Ok(media_page(3..=4, 2, false)),
    ]);
    let mut session = session_with(RecordingNavigation::default());
    let first = session.mount().request.ok_or_else(|| anyhow::anyhow!("no first page"))?;
    run(&mut session, &fetcher, first).await;
    let second = session.on_sentinel_visible().ok_or_else(|| anyhow::anyhow!("no next page"))?;
    assert_eq!(run(&mut session, &fetcher, second).await, ResolveOutcome::Failed);
    assert!(matches!(session.view(), ListView::Ready { error_notice: true, sentinel: false, .. }));
    assert!(session.on_sentinel_visible().is_none());

    let again = session.retry().ok_or_else(|| anyhow::anyhow!("retry issued nothing"))?;
    assert_eq!(again.page, 2);
    run(&mut session, &fetcher, again).await;
    assert_eq!(session.source().items().len(), 4);
    assert_eq!(session.source().phase(), FetchPhase::Exhausted);
    Ok(())
}

#[tokio::test]
async fn late_continuation_pages_are_dropped_after_an_edit() -> anyhow::Result<()> {
    let fetcher = ScriptedFetcher::new([Ok(media_page(1..=3, 1, true))]);
    let mut session = session_with(RecordingNavigation::default());
    let first = session.mount().request.ok_or_else(|| anyhow::anyhow!("no first page"))?;
    run(&mut session, &fetcher, first).await;
    let continuation = session.on_sentinel_visible().ok_or_else(|| anyhow::anyhow!("no next page"))?;
    assert_eq!(continuation.page, 2);

    let fresh = session
        .set_field(FieldUpdate::Keyword("bebop".into()))
        .request
        .ok_or_else(|| anyhow::anyhow!("keyword did not refetch"))?;
    assert_eq!(fresh.page, 1);
    assert!(session.source().items().is_empty());

    fetcher.push(Ok(media_page(4..=6, 2, true)));
    assert_eq!(run(&mut session, &fetcher, continuation).await, ResolveOutcome::Stale);
    assert!(session.source().items().is_empty());
    assert_eq!(session.source().phase(), FetchPhase::LoadingFirstPage);

    fetcher.push(Ok(media_page([42], 1, false)));
    assert_eq!(
        run(&mut session, &fetcher, fresh).await,
        ResolveOutcome::Appended { added: 1, has_next: false }
    );
    let ids: Vec<u64> = session.source().items().iter().map(|media| media.id).collect();
    assert_eq!(ids, vec![42]);
    Ok(())
}

#[tokio::test]
async fn new_defaults_supersede_the_request_in_flight() -> anyhow::Result<()> {
    let fetcher = ScriptedFetcher::default();
    let mut session = session_with(RecordingNavigation::default());
    let first = session.mount().request.ok_or_else(|| anyhow::anyhow!("no first page"))?;
    fetcher.push(Ok(media_page(1..=2, 1, true)));
    run(&mut session, &fetcher, first).await;
    let continuation = session.on_sentinel_visible().ok_or_else(|| anyhow::anyhow!("no next page"))?;

    let mut defaults = BrowseQuery::default();
    defaults.apply(FieldUpdate::Sort(SortOrder::Trending));
    let reaction = session.replace_default_query(defaults);
    assert!(reaction.replaced.is_none());
    assert!(!session.form().is_dirty());
    let fresh = reaction.request.ok_or_else(|| anyhow::anyhow!("new defaults did not refetch"))?;
    assert_eq!(fresh.query.sort, SortOrder::Trending);

    fetcher.push(Ok(media_page([3], 2, false)));
    assert_eq!(run(&mut session, &fetcher, continuation).await, ResolveOutcome::Stale);
    fetcher.push(Ok(media_page([8, 9], 1, false)));
    run(&mut session, &fetcher, fresh).await;
    let ids: Vec<u64> = session.source().items().iter().map(|media| media.id).collect();
    assert_eq!(ids, vec![8, 9]);
    assert_eq!(session.source().phase(), FetchPhase::Exhausted);
    assert!(session.synchronizer().sink().addresses.is_empty());
    Ok(())
}
