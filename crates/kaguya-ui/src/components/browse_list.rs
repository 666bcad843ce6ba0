//! Filterable, infinitely scrolling browse list.
//!
//! # Design
//! - The [`BrowseSession`] owns every decision; this component only forwards
//!   events, runs fetches and re-renders.
//! - Responses are handed back with their ticket, so a late page for an old
//!   filter is dropped by the session.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo::console;
use gloo_timers::callback::Timeout;
use kaguya_api_models::MediaSummary;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::app::RouterNavigation;
use crate::components::filter_select::FilterSelect;
use crate::components::in_view::InView;
use crate::components::list_skeleton::ListSkeleton;
use crate::components::media_grid::MediaGrid;
use crate::components::search_input::SearchInput;
use crate::core::settings::BrowseSettings;
use crate::features::browse::catalog::{BrowseCatalogs, SelectOption};
use crate::features::browse::fetch::PageFetcher;
use crate::features::browse::filters::{BrowseQuery, FilterField, QueryOverrides};
use crate::features::browse::paging::PageRequest;
use crate::features::browse::session::{BrowseSession, Reaction};
use crate::features::browse::view::ListView;
use crate::i18n::{DEFAULT_LOCALE, TranslationBundle};
use crate::services::api::ApiClient;

type Session = BrowseSession<RouterNavigation, MediaSummary>;

/// Browse list properties.
#[derive(Properties, PartialEq)]
pub struct BrowseListProps {
    /// Fields the form starts from, merged over the global defaults; a new
    /// value replaces the form wholesale.
    #[prop_or_default]
    pub default_query: QueryOverrides,
    /// Optional page heading.
    #[prop_or_default]
    pub title: Option<AttrValue>,
}

#[derive(Clone)]
struct Driver {
    session: Rc<RefCell<Session>>,
    api: Rc<ApiClient>,
    refresh: Rc<dyn Fn()>,
}

impl Driver {
    fn handle(&self, reaction: Reaction) {
        if reaction.is_idle() {
            return;
        }
        if let Some(err) = &reaction.navigation_error {
            console::warn!(format!("browse address not updated: {err}"));
        }
        if let Some(request) = reaction.request {
            self.fetch(request);
        }
        (self.refresh)();
    }

    fn fetch(&self, request: PageRequest) {
        let driver = self.clone();
        spawn_local(async move {
            let result = driver.api.fetch_page(&request.query, request.page).await;
            if let Err(err) = &result {
                console::error!(format!("{err}"));
            }
            driver.session.borrow_mut().resolve(request.ticket, result);
            (driver.refresh)();
        });
    }

    fn follow_up(&self, request: Option<PageRequest>) {
        if let Some(request) = request {
            self.fetch(request);
            (self.refresh)();
        }
    }
}

fn now() -> Duration {
    Duration::from_secs_f64(js_sys::Date::now().max(0.0) / 1000.0)
}

/// Browse toolbar plus the accumulated result list.
#[function_component(BrowseList)]
pub fn browse_list(props: &BrowseListProps) -> Html {
    let settings = use_context::<BrowseSettings>().unwrap_or_default();
    let bundle = use_context::<TranslationBundle>()
        .unwrap_or_else(|| TranslationBundle::new(DEFAULT_LOCALE));
    let navigator = use_navigator();
    let force_update = use_force_update();
    let keyword_timer = use_mut_ref(|| None as Option<Timeout>);

    let api = {
        let settings = settings.clone();
        use_memo(
            move |_| ApiClient::new(settings.api_base_url.clone(), settings.per_page),
            (),
        )
    };
    let session = {
        let settings = settings.clone();
        let defaults = BrowseQuery::merged_over_defaults(props.default_query.clone());
        use_mut_ref(move || Session::new(&settings, defaults, RouterNavigation::new(navigator)))
    };
    let catalogs = {
        let latest = settings.latest_season_year;
        use_memo(
            move |locale| BrowseCatalogs::build(&TranslationBundle::new(*locale), latest),
            bundle.locale,
        )
    };
    let driver = Driver {
        session: session.clone(),
        api,
        refresh: Rc::new(move || force_update.force_update()),
    };

    {
        let driver = driver.clone();
        use_effect_with_deps(
            move |_| {
                let reaction = driver.session.borrow_mut().mount();
                driver.handle(reaction);
                || ()
            },
            (),
        );
    }
    {
        let driver = driver.clone();
        use_effect_with_deps(
            move |overrides: &QueryOverrides| {
                let query = BrowseQuery::merged_over_defaults(overrides.clone());
                let reaction = driver.session.borrow_mut().replace_default_query(query);
                driver.handle(reaction);
                || ()
            },
            props.default_query.clone(),
        );
    }
    {
        let title = props.title.clone();
        use_effect_with_deps(
            move |title| {
                let text = title
                    .as_ref()
                    .map_or_else(|| "Kaguya".to_string(), |title| format!("{title} - Kaguya"));
                gloo::utils::document().set_title(&text);
                || ()
            },
            title,
        );
    }

    let on_keyword = {
        let driver = driver.clone();
        let timer = keyword_timer.clone();
        Callback::from(move |text: String| {
            let started = now();
            let delay = {
                let mut session = driver.session.borrow_mut();
                session.set_keyword_debounced(text, started);
                session
                    .next_deadline()
                    .map_or(Duration::ZERO, |deadline| deadline.saturating_sub(started))
            };
            let driver = driver.clone();
            let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
            *timer.borrow_mut() = Some(Timeout::new(millis, move || {
                let deadline = driver.session.borrow().next_deadline();
                let at = deadline.map_or_else(now, |deadline| deadline.max(now()));
                let reaction = driver.session.borrow_mut().tick(at);
                driver.handle(reaction);
            }));
        })
    };

    let on_submit = {
        let driver = driver.clone();
        let timer = keyword_timer;
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            drop(timer.borrow_mut().take());
            let reaction = driver.session.borrow_mut().submit_keyword();
            driver.handle(reaction);
        })
    };

    let on_field = {
        let driver = driver.clone();
        Callback::from(move |(field, tokens): (FilterField, Vec<String>)| {
            let result = driver.session.borrow_mut().set_control(field, &tokens);
            match result {
                Ok(reaction) => driver.handle(reaction),
                Err(err) => console::warn!(format!("ignored filter input: {err}")),
            }
        })
    };

    let on_in_view = {
        let driver = driver.clone();
        Callback::from(move |()| {
            let request = driver.session.borrow_mut().on_sentinel_visible();
            driver.follow_up(request);
        })
    };

    let on_retry = {
        let driver = driver.clone();
        Callback::from(move |_: MouseEvent| {
            let request = driver.session.borrow_mut().retry();
            driver.follow_up(request);
        })
    };

    let (values, view, items) = {
        let state = session.borrow();
        (
            state.form().values().clone(),
            state.view(),
            Rc::new(state.source().items().to_vec()),
        )
    };

    let select = |field: FilterField, key: &str, fallback: &str, options: &[SelectOption], clearable: bool| {
        html! {
            <FilterSelect
                field={field}
                label={AttrValue::from(bundle.text(key, fallback))}
                options={options.to_vec()}
                selected={values.tokens(field)}
                clearable={clearable}
                on_change={on_field.clone()}
            />
        }
    };

    let body = match view {
        ListView::Loading => html! { <ListSkeleton /> },
        ListView::Ready {
            trailing_placeholder,
            sentinel,
            end_marker,
            error_notice,
        } => html! {
            <>
                <MediaGrid items={items} />
                if trailing_placeholder {
                    <div class="mt-4"><ListSkeleton /></div>
                }
                if sentinel {
                    <InView on_in_view={on_in_view} />
                }
                if end_marker {
                    <p class="mt-8 text-center text-2xl">
                        {bundle.text("browse.end_of_results", "That's all...")}
                    </p>
                }
                if error_notice {
                    <div role="alert" class="alert alert-error mt-8">
                        <span>{bundle.text("browse.fetch_failed", "Could not load more results.")}</span>
                        <button type="button" class="btn btn-sm" onclick={on_retry}>
                            {bundle.text("browse.retry", "Try again")}
                        </button>
                    </div>
                }
            </>
        },
    };

    html! {
        <div class="min-h-screen px-4 md:px-12">
            if let Some(title) = props.title.clone() {
                <p class="mb-8 text-center text-4xl font-semibold md:text-left">{title}</p>
            }
            <form class="space-y-4" onsubmit={on_submit}>
                <div class="flex snap-x items-center gap-4 overflow-x-auto lg:flex-wrap lg:justify-between lg:overflow-x-visible">
                    <SearchInput
                        value={AttrValue::from(values.keyword.clone())}
                        label={AttrValue::from(bundle.text("browse.keyword", "Search"))}
                        on_input={on_keyword}
                    />
                    { select(FilterField::Genres, "browse.genres", "Genres", &catalogs.genres, true) }
                    { select(FilterField::Season, "browse.season", "Season", &catalogs.seasons, true) }
                    { select(FilterField::SeasonYear, "browse.season_year", "Year", &catalogs.season_years, true) }
                    { select(FilterField::Format, "browse.format", "Format", &catalogs.formats, true) }
                    { select(FilterField::Tags, "browse.tags", "Tags", &catalogs.tags, true) }
                    { select(FilterField::Type, "browse.type", "Search type", &catalogs.types, false) }
                    { select(FilterField::Countries, "browse.countries", "Country", &catalogs.countries, true) }
                    { select(FilterField::Sort, "browse.sort", "Sort by", &catalogs.sorts, false) }
                </div>
            </form>
            <div class="mt-8">{body}</div>
        </div>
    }
}
