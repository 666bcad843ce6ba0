//! Yew components for the browse view.

pub mod browse_list;
pub mod filter_select;
pub mod in_view;
pub mod list_skeleton;
pub mod media_grid;
pub mod search_input;
pub mod va_card;
