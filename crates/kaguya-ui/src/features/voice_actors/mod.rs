//! Voice actor presentation.

pub mod card;
