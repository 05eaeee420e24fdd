use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber. Falls back to the default filter
/// when `directives` do not parse.
pub fn init_tracing(directives: &str) {
    let filter = EnvFilter::try_new(directives).unwrap_or_else(|e| {
        eprintln!("Ignoring log filter '{directives}': {e}");
        EnvFilter::new(crate::config::DEFAULT_LOG_FILTER)
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
