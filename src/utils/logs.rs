use tracing_subscriber::EnvFilter;

// JSON log lines, level taken from RUST_LOG and INFO otherwise
pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // log collectors choke on ANSI color codes.
        .with_ansi(false)
        .json()
        .init();
}
