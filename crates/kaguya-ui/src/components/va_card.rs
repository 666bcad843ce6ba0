//! Voice actor card.

use std::rc::Rc;

use crate::app::Route;
use crate::features::voice_actors::card::CardMemo;
use kaguya_api_models::VoiceActor;
use yew::prelude::*;
use yew_router::prelude::*;

/// Card properties. Equality is allocation identity, so an unchanged entity
/// never re-renders.
#[derive(Properties)]
pub struct VaCardProps {
    /// Entity to render.
    pub voice_actor: Rc<VoiceActor>,
}

impl PartialEq for VaCardProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.voice_actor, &other.voice_actor)
    }
}

/// Portrait card linking to the voice actor's detail page.
#[function_component(VaCard)]
pub fn va_card(props: &VaCardProps) -> Html {
    let memo = use_mut_ref(CardMemo::default);
    let card = memo.borrow_mut().render(&props.voice_actor).clone();
    let route = Route::VoiceActorDetails {
        id: props.voice_actor.id,
    };

    html! {
        <Link<Route> to={route}>
            <div class="space-y-2" data-href={card.href}>
                <div class="relative aspect-[9/16]">
                    <img
                        class="absolute inset-0 h-full w-full object-cover"
                        src={card.image_src}
                        alt={card.alt}
                        loading="lazy"
                    />
                </div>
                <p>{card.label}</p>
            </div>
        </Link<Route>>
    }
}
