//! Grid of browse results.

use std::rc::Rc;

use kaguya_api_models::MediaSummary;
use yew::prelude::*;

/// Grid properties.
#[derive(Properties)]
pub struct MediaGridProps {
    /// Accumulated results in fetch order.
    pub items: Rc<Vec<MediaSummary>>,
}

impl PartialEq for MediaGridProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.items, &other.items) || self.items == other.items
    }
}

/// Result cards in fetch order.
#[function_component(MediaGrid)]
pub fn media_grid(props: &MediaGridProps) -> Html {
    html! {
        <ul class="grid grid-cols-2 gap-4 md:grid-cols-4 lg:grid-cols-6">
            { for props.items.iter().map(|media| html! {
                <li key={media.id} class="space-y-2">
                    <img
                        class="aspect-[9/14] w-full rounded object-cover"
                        src={media.cover_image.large.clone()}
                        alt={media.title.user_preferred.clone()}
                        loading="lazy"
                    />
                    <p class="line-clamp-2 font-semibold">{media.title.user_preferred.clone()}</p>
                    if let Some(score) = media.average_score {
                        <p class="text-sm text-base-content/70">{format!("{score}%")}</p>
                    }
                </li>
            }) }
        </ul>
    }
}
