//! Terminal front end.

pub mod app;
pub mod components;
pub mod effects;
pub mod icons;
pub mod keys;
