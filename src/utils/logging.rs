use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV_VAR: &str = "ARCHIVIST_LOG";

const DEFAULT_FILTER: &str = "warn";
const VERBOSE_FILTER: &str = "warn,archivist=debug";

/// Resolve the filter directive: the environment wins, then `--verbose`.
pub fn filter_directive(verbose: bool, env_value: Option<&str>) -> String {
    match env_value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(value) => value.to_string(),
        None if verbose => VERBOSE_FILTER.to_string(),
        None => DEFAULT_FILTER.to_string(),
    }
}

/// Install the global subscriber. Diagnostics go to stderr so the log
/// block and JSON report on stdout stay clean.
pub fn init(verbose: bool) {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let directive = filter_directive(verbose, env_value.as_deref());
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    // A second init (e.g. from tests) is harmless, so the error is ignored.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
