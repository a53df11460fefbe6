//! Offline layout preview: run the script once and render the views as
//! JSON, without a compositor.

use std::io::Write;

use luatile_common::LuatileError;
use luatile_layout::ScriptHost;

pub fn render(
    host: &ScriptHost,
    view_count: u32,
    size: (u32, u32),
) -> Result<String, LuatileError> {
    let (width, height) = size;
    let views = host.compute_layout(view_count, width, height)?;
    tracing::debug!(views = %host.describe_views(&views), "preview layout");
    serde_json::to_string_pretty(&views).map_err(|e| LuatileError::Other(e.to_string()))
}

/// Render the layout and write it to `out`, one JSON document per call.
pub fn write(
    out: &mut impl Write,
    host: &ScriptHost,
    view_count: u32,
    size: (u32, u32),
) -> Result<(), LuatileError> {
    let json = render(host, view_count, size)?;
    writeln!(out, "{json}")?;
    out.flush()?;
    Ok(())
}
