use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to
/// stderr so command output on stdout stays machine readable. Calling this
/// twice is harmless.
pub fn init_tracing(config: &LoggingConfig) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new(&config.level),
    };

    let _ = fmt::Subscriber::builder()
        .with_target(config.with_target)
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter)
        .try_init();
}
