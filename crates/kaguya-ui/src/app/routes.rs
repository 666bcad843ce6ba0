//! Routing definitions for the Kaguya UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Home,
    #[at("/browse")]
    Browse,
    #[at("/voice-actors/details/:id")]
    VoiceActorDetails { id: u64 },
    #[not_found]
    #[at("/404")]
    NotFound,
}
