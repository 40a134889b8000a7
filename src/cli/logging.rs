use tracing_subscriber::EnvFilter;

/// Overrides the verbosity flag when set, e.g. `COMMITION_LOG=commition=trace`.
const LOG_ENV: &str = "COMMITION_LOG";

/// Install the stderr subscriber. `verbose` counts `-v` flags.
pub(crate) fn init(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
