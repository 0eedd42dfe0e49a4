//! Application layer: classification, pins, and the selection state machine.

pub mod classify;
pub mod observe;
pub mod pins;
pub mod selection;
pub mod view;
