//! Logging setup for programs built on vesselgrid.

/// Initializes `env_logger`, defaulting to the `info` level.
///
/// `RUST_LOG` overrides the default. Calling this more than once is harmless;
/// later calls leave the first logger in place.
///
/// # Example
///
/// ```no_run
/// vesselgrid::init_logging();
/// log::info!("ready");
/// ```
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("logger already initialized");
    }
}
