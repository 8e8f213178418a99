use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `dagster_chart=debug`.
pub const LOG_ENV: &str = "DAGSTER_CHART_LOG";

/// Send diagnostics to stderr so rendered manifests on stdout stay clean.
/// Quiet unless `DAGSTER_CHART_LOG` asks for more.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A subscriber may already be installed when embedded in another program.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
