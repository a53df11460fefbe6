//! Capabilities exported by the embedded Lua prelude.

use luatile_common::ScriptLoadError;
use mlua::{Function, Lua, Table, Value};

pub(crate) const SOURCE: &str = include_str!("prelude.lua");

/// Functions resolved from the prelude once, when the engine starts.
/// Holding them keeps them alive for the lifetime of the Lua state.
pub(crate) struct Prelude {
    pub(crate) evaluate_file: Function,
    pub(crate) evaluate_command: Function,
    pub(crate) protected_call: Function,
    /// Debug printer; diagnostics fall back to `Debug` output without it.
    pub(crate) inspect: Option<Function>,
}

impl Prelude {
    pub(crate) fn resolve(lua: &Lua, source: &str) -> Result<Self, ScriptLoadError> {
        let exports: Table = lua
            .load(source)
            .set_name("=prelude")
            .eval()
            .map_err(|e| ScriptLoadError::Engine(e.to_string()))?;

        Ok(Self {
            evaluate_file: required(&exports, "evaluate_file")?,
            evaluate_command: required(&exports, "evaluate_command")?,
            protected_call: required(&exports, "protected_call")?,
            inspect: optional(&exports, "inspect"),
        })
    }
}

fn optional(exports: &Table, name: &str) -> Option<Function> {
    match exports.get::<Value>(name) {
        Ok(Value::Function(function)) => Some(function),
        _ => None,
    }
}

fn required(exports: &Table, name: &str) -> Result<Function, ScriptLoadError> {
    optional(exports, name).ok_or_else(|| ScriptLoadError::MissingCapability(name.to_string()))
}
