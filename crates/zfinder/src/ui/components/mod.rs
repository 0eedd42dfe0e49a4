//! Collection of reusable TUI components.

pub mod detail;
pub mod pin_list;
