use thiserror::Error;

use stockroom_core::DomainError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Parse(String),

    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to encode export: {0}")]
    Export(#[from] serde_json::Error),
}

impl ShellError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}
