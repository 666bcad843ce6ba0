//! Feature slices. Each slice keeps its state and view logic free of the DOM.

pub mod browse;
pub mod voice_actors;
