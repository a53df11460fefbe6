//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# luatile configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[protocol]
# namespace = "luatile"       # must match `riverctl default-layout <namespace>`
# layout_name = "[]="         # shown by status bars
# late_outputs = "configure"  # "configure" or "ignore" outputs plugged in after startup

[script]
# path = "/path/to/layout.lua"  # used when no script is given on the command line
# layout_function = "layout"

[logging]
# level = "INFO"              # TRACE, DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
