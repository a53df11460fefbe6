//! Subscriber setup. Filter precedence: `--log-level`, then `RUST_LOG`,
//! then the config file's `logging.level`.

use luatile_config::schema::LogLevel;
use tracing_subscriber::EnvFilter;

pub fn init(cli_filter: Option<&str>, config_level: LogLevel) {
    tracing_subscriber::fmt()
        .with_env_filter(filter(cli_filter, config_level))
        .with_writer(std::io::stderr)
        .init();
}

fn filter(cli_filter: Option<&str>, config_level: LogLevel) -> EnvFilter {
    if let Some(directive) = cli_filter {
        match EnvFilter::try_new(directive) {
            Ok(filter) => return filter,
            // No subscriber yet.
            Err(e) => eprintln!("ignoring invalid --log-level '{directive}': {e}"),
        }
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level.directive()))
}
