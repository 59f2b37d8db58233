//! Logging setup using `tracing` + `tracing-subscriber`, written to stderr so stdout stays JSON.
//!
//! Priority for the filter:
//! 1. `--log-level` flag
//! 2. `APPGRAPH_LOG` environment variable (any `EnvFilter` directive, e.g. `appgraph_core=debug`)
//! 3. `warn`

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "APPGRAPH_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// Returns `false` when `cli_level` is not a valid directive.
pub fn init_logging(cli_level: Option<&str>) -> bool {
    let filter = match cli_level {
        Some(level) => match EnvFilter::try_new(level) {
            Ok(filter) => filter,
            Err(_) => return false,
        },
        None => std::env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|directive| EnvFilter::try_new(directive).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    // Only fails if a global subscriber is already set, in which case that one keeps logging.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
    true
}
