//! The script host: owns the Lua state, the live script environment and
//! the capabilities resolved from it.

mod prelude;

#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};

use luatile_common::{LayoutError, LayoutGenerator, ScriptEvalError, ScriptLoadError, View};
use mlua::{Function, IntoLuaMulti, Lua, MultiValue, Table, Value};
use tracing::{debug, error, info, warn};

use crate::marshal;
use prelude::Prelude;

/// Default name of the function a script must define.
pub const DEFAULT_LAYOUT_FUNCTION: &str = "layout";

/// Bindings of the currently loaded script plus the layout function
/// resolved from them, if any.
struct ScriptEnvironment {
    bindings: Table,
    layout: Option<Function>,
}

pub struct ScriptHost {
    lua: Lua,
    prelude: Prelude,
    environment: Option<ScriptEnvironment>,
    layout_function: String,
    script_path: Option<PathBuf>,
}

impl ScriptHost {
    /// Start a scripting engine with the built-in prelude.
    pub fn new(layout_function: impl Into<String>) -> Result<Self, ScriptLoadError> {
        Self::with_prelude(prelude::SOURCE, layout_function)
    }

    pub(crate) fn with_prelude(
        source: &str,
        layout_function: impl Into<String>,
    ) -> Result<Self, ScriptLoadError> {
        let lua = Lua::new();
        let prelude = Prelude::resolve(&lua, source)?;
        Ok(Self {
            lua,
            prelude,
            environment: None,
            layout_function: layout_function.into(),
            script_path: None,
        })
    }

    /// Evaluate the script at `path` in a fresh environment and make it the
    /// live one. On failure the previous environment stays live.
    ///
    /// A script without a layout function still loads; layouts are then
    /// answered with [`LayoutError::NoLayoutAvailable`].
    pub fn load(&mut self, path: &Path) -> Result<(), ScriptLoadError> {
        if !path.is_file() {
            return Err(ScriptLoadError::NotFound(path.to_path_buf()));
        }

        let value = self
            .protected_call(
                &self.prelude.evaluate_file,
                path.to_string_lossy().into_owned(),
            )
            .map_err(|e| match e {
                ScriptEvalError::Raised { traceback } => ScriptLoadError::Evaluation {
                    path: path.to_path_buf(),
                    traceback,
                },
                other => ScriptLoadError::Engine(other.to_string()),
            })?;

        let Value::Table(bindings) = value else {
            return Err(ScriptLoadError::InvalidEnvironment(
                value.type_name().to_string(),
            ));
        };

        self.install(bindings);
        self.script_path = Some(path.to_path_buf());

        if self.has_layout() {
            info!(script = %path.display(), "layout script loaded");
        } else {
            warn!(
                script = %path.display(),
                function = %self.layout_function,
                "script does not define a layout function"
            );
        }
        Ok(())
    }

    /// Load the most recently loaded script file again.
    pub fn reload(&mut self) -> Result<(), ScriptLoadError> {
        let path = self
            .script_path
            .clone()
            .ok_or(ScriptLoadError::NothingToReload)?;
        self.load(&path)
    }

    /// Run the layout function for `view_count` views in a `width` x
    /// `height` area.
    pub fn compute_layout(
        &self,
        view_count: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<View>, LayoutError> {
        let layout = self
            .environment
            .as_ref()
            .and_then(|env| env.layout.as_ref())
            .ok_or(LayoutError::NoLayoutAvailable)?;

        let value = self
            .protected_call(layout, (view_count, width, height))
            .inspect_err(|e| error!(view_count, width, height, "layout function failed: {e}"))?;

        marshal::views_from_lua(&value, view_count).inspect_err(|e| {
            debug!(result = %self.describe(&value), "unusable layout result: {e}");
        })
    }

    /// Evaluate `command` against the live environment.
    ///
    /// The layout function is resolved again afterwards, whether or not the
    /// command succeeded: a failing chunk may still have rebound names.
    pub fn handle_command(&mut self, command: &str) -> Result<(), ScriptEvalError> {
        let bindings = self
            .environment
            .as_ref()
            .map(|env| env.bindings.clone())
            .ok_or(ScriptEvalError::NoEnvironment)?;
        let had_layout = self.has_layout();

        let result = self.protected_call(
            &self.prelude.evaluate_command,
            (bindings.clone(), command),
        );

        let next = match &result {
            Ok(Value::Table(updated)) => updated.clone(),
            Ok(other) => {
                warn!(
                    returned = other.type_name(),
                    "command did not return an environment; keeping the current one"
                );
                bindings
            }
            Err(_) => bindings,
        };
        self.install(next);

        match (had_layout, self.has_layout()) {
            (true, false) => warn!(command, "command removed the layout function"),
            (false, true) => info!(command, "command defined a layout function"),
            _ => {}
        }

        result.map(|_| ())
    }

    pub fn has_layout(&self) -> bool {
        self.environment
            .as_ref()
            .is_some_and(|env| env.layout.is_some())
    }

    pub fn is_loaded(&self) -> bool {
        self.environment.is_some()
    }

    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }

    pub fn layout_function(&self) -> &str {
        &self.layout_function
    }

    /// Human-readable rendering of views as the script would see them.
    pub fn describe_views(&self, views: &[View]) -> String {
        match marshal::views_to_lua(&self.lua, views) {
            Ok(table) => self.describe(&Value::Table(table)),
            Err(e) => format!("<unrenderable views: {e}>"),
        }
    }

    fn describe(&self, value: &Value) -> String {
        self.prelude
            .inspect
            .as_ref()
            .and_then(|inspect| inspect.call::<String>(value.clone()).ok())
            .unwrap_or_else(|| format!("{value:?}"))
    }

    fn install(&mut self, bindings: Table) {
        let layout = match bindings.get::<Value>(self.layout_function.as_str()) {
            Ok(Value::Function(function)) => Some(function),
            _ => None,
        };
        // Dropping the previous environment releases its registry references.
        self.environment = Some(ScriptEnvironment { bindings, layout });
    }

    fn protected_call(
        &self,
        function: &Function,
        args: impl IntoLuaMulti,
    ) -> Result<Value, ScriptEvalError> {
        let mut call_args = vec![Value::Function(function.clone())];
        call_args.extend(
            args.into_lua_multi(&self.lua)
                .map_err(|e| ScriptEvalError::Engine(e.to_string()))?,
        );

        // Runtime errors come back with the message and a stack traceback.
        self.prelude
            .protected_call
            .call::<Value>(MultiValue::from_vec(call_args))
            .map_err(|e| match e {
                mlua::Error::RuntimeError(traceback) => ScriptEvalError::Raised { traceback },
                other => ScriptEvalError::Engine(other.to_string()),
            })
    }
}

impl LayoutGenerator for ScriptHost {
    fn generate(
        &mut self,
        view_count: u32,
        width: u32,
        height: u32,
    ) -> Result<Vec<View>, LayoutError> {
        self.compute_layout(view_count, width, height)
    }

    fn command(&mut self, command: &str) -> Result<(), ScriptEvalError> {
        self.handle_command(command)
    }

    fn reload(&mut self) -> Result<(), ScriptLoadError> {
        ScriptHost::reload(self)
    }
}
