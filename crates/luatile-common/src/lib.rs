pub mod errors;
pub mod generator;
pub mod types;

pub use errors::{
    ConfigError, LayoutError, LuatileError, ProtocolError, ScriptEvalError, ScriptLoadError,
};
pub use generator::LayoutGenerator;
pub use types::{LateOutputPolicy, OutputId, View};

pub type Result<T> = std::result::Result<T, LuatileError>;
