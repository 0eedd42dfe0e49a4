//! Infrastructure adapters for configuration, logging, and the system file browser.

pub mod config;
pub mod logging;
pub mod opener;
