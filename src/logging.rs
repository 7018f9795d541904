use tracing_subscriber::EnvFilter;

/// Setup logging of events reported by domain-select and its test suite.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. To see where SELECT record data was cut short while parsing:
///   RUST_LOG=domain_select::rdata::select=TRACE
///
/// Or to see scanning failures only:
///   RUST_LOG=DEBUG
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_thread_ids(true)
        .without_time()
        .try_init()
        .ok();
}
