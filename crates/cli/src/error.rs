//! CLI failures and their exit codes.
//!
//! `0` is success and `2` is a clap usage error. Everything else comes from
//! [`CliError::exit_code`]: engine construction or stepping fails with 10,
//! file access (PNG output, seed files) with 11, user-supplied text (the
//! `--background` color, `--params` JSON, a malformed seed file) with 12, and
//! JSON output with 13.

use flowfield_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(EngineError),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Input(String),
    #[error("{0}")]
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

/// PNG write failures surface as I/O and unparsable colors as bad input; the
/// rest stay engine errors.
impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            EngineError::InvalidColor(msg) => CliError::Input(format!("invalid color: {msg}")),
            other => CliError::Engine(other),
        }
    }
}

/// Only reached when printing results; input JSON is mapped to `Input` where
/// it is parsed.
impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
