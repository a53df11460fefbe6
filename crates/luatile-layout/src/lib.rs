//! Lua-scripted layout generation.
//!
//! [`ScriptHost`] loads a user script and calls its layout function for
//! every layout demand; [`marshal`] turns the script's answer into
//! [`View`](luatile_common::View)s.

pub mod host;
pub mod marshal;

pub use host::{ScriptHost, DEFAULT_LAYOUT_FUNCTION};
