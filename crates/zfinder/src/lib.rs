pub mod app;
pub mod domain;
pub mod infra;
pub mod ui;

pub use app::classify::{classify, classify_path};
pub use domain::model::{ExtensionCategory, Pin, PinId, Selection};

/// Install logging for the given target. Hold the returned guard for the life of the process.
pub fn init(
    target: infra::logging::LogTarget,
) -> anyhow::Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    infra::logging::init(target)
}
