//! Logging utilities

/// Initialize the logging system
///
/// `default_filter` is an env_logger filter string such as `"info"` or
/// `"learn_gl=debug"`; `RUST_LOG` takes precedence when set. Calling this
/// more than once keeps the first logger.
pub fn init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("Logger already initialized");
    }
}
