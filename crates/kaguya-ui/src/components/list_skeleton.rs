//! Placeholder grid for loading pages.

use yew::prelude::*;

/// Skeleton properties.
#[derive(Properties, PartialEq)]
pub struct ListSkeletonProps {
    /// Number of placeholder cards.
    #[prop_or(12)]
    pub count: usize,
}

/// Placeholder grid shown while a page loads.
#[function_component(ListSkeleton)]
pub fn list_skeleton(props: &ListSkeletonProps) -> Html {
    html! {
        <div class="grid grid-cols-2 gap-4 md:grid-cols-4 lg:grid-cols-6" aria-busy="true" aria-live="polite">
            { for (0..props.count).map(|index| html! {
                <div key={index} class="space-y-2">
                    <div class="skeleton aspect-[9/14] w-full"></div>
                    <div class="skeleton h-4 w-3/4"></div>
                </div>
            }) }
        </div>
    }
}
