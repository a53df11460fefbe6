use std::path::PathBuf;

use clap::Parser;

/// luatile: a river layout generator driven by a Lua script.
#[derive(Parser, Debug)]
#[command(name = "luatile", version, about)]
pub struct Args {
    /// Layout script to load. Falls back to `script.path` from the config.
    pub script: Option<PathBuf>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter override (e.g. `debug`, `luatile_protocol=trace`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Layout namespace override.
    #[arg(long)]
    pub namespace: Option<String>,

    /// Compute one layout for this many views, print it as JSON and exit.
    #[arg(long, value_name = "N")]
    pub preview: Option<u32>,

    /// Usable area for `--preview`.
    #[arg(long, value_name = "WxH", default_value = "1920x1080", value_parser = parse_size)]
    pub size: (u32, u32),
}

pub fn parse() -> Args {
    Args::parse()
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (width, height) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{s}'"))?;
    let width = width
        .trim()
        .parse()
        .map_err(|e| format!("invalid width '{width}': {e}"))?;
    let height = height
        .trim()
        .parse()
        .map_err(|e| format!("invalid height '{height}': {e}"))?;
    Ok((width, height))
}
