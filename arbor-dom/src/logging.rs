use crate::config::RenderConfig;

/// Install a `fmt` subscriber filtered by `RUST_LOG`, falling back to the
/// configured level.
///
/// Does nothing when the level is `"off"` or a global subscriber is already
/// installed. Returns whether this call installed one.
pub fn init_logging(config: &RenderConfig) -> bool {
    if config.log_level.eq_ignore_ascii_case("off") {
        return false;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok()
}
