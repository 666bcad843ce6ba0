use std::rc::Rc;

use crate::components::browse_list::BrowseList;
use crate::components::va_card::VaCard;
use crate::core::settings::BrowseSettings;
use crate::features::browse::filters::QueryOverrides;
use crate::i18n::{LocaleCode, TranslationBundle};
use crate::services::api::ApiClient;
use kaguya_api_models::VoiceActor;
use preferences::{load_locale, load_settings, persist_locale};
use web_sys::HtmlSelectElement;
use yew::platform::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

pub(crate) use navigation::RouterNavigation;
pub(crate) use routes::Route;

mod navigation;
mod preferences;
mod routes;

#[function_component(KaguyaApp)]
fn kaguya_app() -> Html {
    let settings = use_memo(|_| load_settings(), ());
    let locale = use_state(load_locale);
    let bundle = {
        let locale = *locale;
        use_memo(move |_| TranslationBundle::new(locale), locale)
    };

    {
        let locale = *locale;
        use_effect_with_deps(
            move |locale| {
                persist_locale(*locale);
                if let Some(root) = gloo::utils::document().document_element() {
                    if root.set_attribute("lang", locale.code()).is_err() {
                        gloo::console::warn!("failed to set document language");
                    }
                }
                || ()
            },
            locale,
        );
    }

    let on_locale = {
        let locale = locale.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                if let Some(next) = LocaleCode::from_lang_tag(&select.value()) {
                    locale.set(next);
                }
            }
        })
    };

    html! {
        <BrowserRouter>
            <ContextProvider<BrowseSettings> context={(*settings).clone()}>
                <ContextProvider<TranslationBundle> context={(*bundle).clone()}>
                    <header class="flex justify-end px-4 py-2 md:px-12">
                        <select class="select select-sm" aria-label="Language" onchange={on_locale}>
                            { for LocaleCode::all().into_iter().map(|option| html! {
                                <option value={option.code()} selected={option == *locale}>{option.label()}</option>
                            }) }
                        </select>
                    </header>
                    <main>
                        <Switch<Route> render={switch} />
                    </main>
                </ContextProvider<TranslationBundle>>
            </ContextProvider<BrowseSettings>>
        </BrowserRouter>
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <Redirect<Route> to={Route::Browse} /> },
        Route::Browse => html! { <BrowsePage /> },
        Route::VoiceActorDetails { id } => html! { <VoiceActorPage {id} /> },
        Route::NotFound => html! { <p class="p-12 text-center text-2xl">{"404"}</p> },
    }
}

/// Reads the address once; later address writes come from the form itself.
#[function_component(BrowsePage)]
fn browse_page() -> Html {
    let location = use_location();
    let default_query = use_memo(
        move |_| {
            location
                .map(|location| QueryOverrides::from_query_str(location.query_str()))
                .unwrap_or_default()
        },
        (),
    );
    html! { <BrowseList default_query={(*default_query).clone()} /> }
}

#[derive(Properties, PartialEq)]
struct VoiceActorPageProps {
    id: u64,
}

#[function_component(VoiceActorPage)]
fn voice_actor_page(props: &VoiceActorPageProps) -> Html {
    let settings = use_context::<BrowseSettings>().unwrap_or_default();
    let actor = use_state(|| None as Option<Rc<VoiceActor>>);
    {
        let actor = actor.clone();
        use_effect_with_deps(
            move |id: &u64| {
                let id = *id;
                let api = ApiClient::new(settings.api_base_url.clone(), settings.per_page);
                actor.set(None);
                spawn_local(async move {
                    match api.fetch_voice_actor(id).await {
                        Ok(found) => actor.set(Some(Rc::new(found))),
                        Err(err) => gloo::console::error!(format!("{err}")),
                    }
                });
                || ()
            },
            props.id,
        );
    }

    html! {
        <section class="space-y-4 px-4 md:px-12">
            <h1 class="text-3xl font-semibold">{format!("#{}", props.id)}</h1>
            if let Some(actor) = (*actor).clone() {
                <div class="w-48"><VaCard voice_actor={actor} /></div>
            }
            <Link<Route> to={Route::Browse}>{"←"}</Link<Route>>
        </section>
    }
}

/// Mount the app under `#root`, or `<body>` when absent.
pub fn run_app() {
    console_error_panic_hook::set_once();
    if let Some(root) = gloo::utils::document().get_element_by_id("root") {
        yew::Renderer::<KaguyaApp>::with_root(root).render();
    } else {
        yew::Renderer::<KaguyaApp>::new().render();
    }
}
