//! Logging initialization and utilities

/// Install `env_logger` as the `log` backend.
///
/// Filters at `info` unless `RUST_LOG` says otherwise; records carry
/// millisecond timestamps so generation timings line up. Call once, before
/// building a [`TerrainEngine`](crate::TerrainEngine).
///
/// ```
/// terrashade::core::logging::init();
/// log::debug!("shadow updates are logged at this level");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .format_timestamp_millis()
    .init();
}
