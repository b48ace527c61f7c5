use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Initializes logging based on environment variables:
/// - WALLETSIM_LOGGING: enables/disables logging (true/false), disabled when not set
/// - WALLETSIM_LOG_FILE: when set, logs are appended to this file instead of stdout
/// - RUST_LOG: verbosity filter, defaults to `info`
///
/// The operator report printed by the binaries is not affected by these settings.
/// To enable logging in tests, run: WALLETSIM_LOGGING=true cargo test -- --nocapture
pub fn init_logging() {
    let enabled = match env::var("WALLETSIM_LOGGING") {
        Ok(value) => match value.as_str() {
            "true" => true,
            "false" => false,
            _ => panic!(
                "\nError: WALLETSIM_LOGGING environment variable must be 'true' or 'false'\n\n\
                 To run the program, use one of:\n  \
                 WALLETSIM_LOGGING=true cargo run\n  \
                 WALLETSIM_LOGGING=false cargo run\n"
            ),
        },
        Err(_) => false,
    };
    if !enabled {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    // A subscriber may already be installed when called repeatedly from tests
    let _ = match env::var("WALLETSIM_LOG_FILE") {
        Ok(path) => match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => builder.with_ansi(false).with_writer(Mutex::new(file)).try_init(),
            Err(e) => {
                eprintln!("Failed to open log file {}: {}", path, e);
                builder.try_init()
            }
        },
        Err(_) => builder.try_init(),
    };
}
