use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failure to bring a script environment to life.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScriptLoadError {
    #[error("script not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to evaluate {path}: {traceback}")]
    Evaluation { path: PathBuf, traceback: String },

    #[error("prelude does not export `{0}`")]
    MissingCapability(String),

    #[error("script environment must be a table, got {0}")]
    InvalidEnvironment(String),

    #[error("no script has been loaded yet")]
    NothingToReload,

    #[error("scripting engine error: {0}")]
    Engine(String),
}

/// The scripting engine signalled an error while running script code.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ScriptEvalError {
    #[error("script raised an error: {traceback}")]
    Raised { traceback: String },

    #[error("no script environment is loaded")]
    NoEnvironment,

    #[error("scripting engine error: {0}")]
    Engine(String),
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum LayoutError {
    #[error("no layout function available")]
    NoLayoutAvailable,

    #[error("layout evaluation failed: {0}")]
    EvaluationFailed(#[from] ScriptEvalError),

    #[error("malformed layout: {0}")]
    Shape(String),

    #[error("{expected} views must be created, but {actual} were received")]
    CountMismatch { expected: u32, actual: usize },
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProtocolError {
    #[error("compositor does not support {0}")]
    Unsupported(String),

    #[error("namespace '{0}' is already in use")]
    NamespaceInUse(String),

    #[error("layout manager global was removed by the compositor")]
    ManagerRemoved,

    #[error("cannot connect to the compositor: {0}")]
    Connect(String),

    #[error("event dispatch failed: {0}")]
    Dispatch(String),
}

#[derive(Debug, thiserror::Error)]
pub enum LuatileError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    ScriptLoad(#[from] ScriptLoadError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}
