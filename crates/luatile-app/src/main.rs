mod cli;
mod logging;
mod preview;

use std::process::ExitCode;

use luatile_common::LuatileError;
use luatile_config::LuatileConfig;
use luatile_layout::ScriptHost;
use luatile_protocol::DispatcherSettings;

fn main() -> ExitCode {
    let args = cli::parse();

    // The config decides the default log level, so load it first and
    // report problems once the subscriber is up.
    let loaded = luatile_config::load_config(args.config.as_deref());
    let level = loaded
        .as_ref()
        .map(|config| config.logging.level)
        .unwrap_or_default();
    logging::init(args.log_level.as_deref(), level);

    tracing::info!("luatile v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match loaded {
        Ok(config) => config,
        Err(e) if args.config.is_some() => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::warn!("Config load failed, using defaults: {e}");
            LuatileConfig::default()
        }
    };

    match run(&args, &config) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Args, config: &LuatileConfig) -> Result<(), LuatileError> {
    let script = args
        .script
        .clone()
        .or_else(|| config.script.path.clone())
        .ok_or_else(|| LuatileError::Other("script path missing".into()))?;

    let mut host = ScriptHost::new(config.script.layout_function.clone())?;
    host.load(&script)?;

    if let Some(view_count) = args.preview {
        return preview::write(&mut std::io::stdout().lock(), &host, view_count, args.size);
    }

    let namespace = resolve_namespace(args.namespace.as_deref(), &config.protocol.namespace)?;
    let settings = DispatcherSettings {
        namespace,
        layout_name: config.protocol.layout_name.clone(),
        late_outputs: config.protocol.late_outputs,
    };
    luatile_protocol::run(settings, Box::new(host))?;
    Ok(())
}

/// The `--namespace` override gets the same checks as `protocol.namespace`.
fn resolve_namespace(cli: Option<&str>, configured: &str) -> Result<String, LuatileError> {
    let namespace = cli.unwrap_or(configured);
    if namespace.trim().is_empty() {
        return Err(LuatileError::Other("namespace must not be empty".into()));
    }
    if namespace.contains('\0') {
        return Err(LuatileError::Other("namespace must not contain NUL bytes".into()));
    }
    Ok(namespace.to_string())
}
