use thiserror::Error;

use crate::{
    commands::USAGE, configuration::ConfigurationError, exit_codes::CtxExitCode,
    store::StoreError,
};

/// Error types that can occur during CLI command execution
#[derive(Debug, Error)]
pub enum CliError {
    /// The first argument is not a known command
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    /// A command was invoked without an argument it needs
    #[error("{message}")]
    MissingRequiredArgument {
        message: String,
        usage: &'static str,
    },
    /// Any other argument parsing failure
    #[error("{0}")]
    InvalidArguments(String),
    /// Error reading or writing the kubeconfig file
    #[error("{0}")]
    ConfigurationError(#[from] ConfigurationError),
    #[error("{0}")]
    StoreError(#[from] StoreError),
    /// The named context is absent from the kubeconfig
    #[error("context '{name}' does not exist")]
    ContextNotFound { name: String },
    /// Refusal to remove the context that is currently active
    #[error("cannot remove currently active context '{name}'")]
    ActiveContext { name: String },
    /// Error writing command output
    #[error("failed to write output: {0}")]
    OutputError(#[from] std::io::Error),
}

impl CliError {
    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> CtxExitCode {
        CtxExitCode::Failure
    }

    /// Usage text to print after the error message, if any.
    pub fn usage(&self) -> Option<String> {
        match self {
            CliError::UnknownCommand(_) => Some(format!("\n{}", USAGE)),
            CliError::MissingRequiredArgument { usage, .. } => Some(format!("Usage: {}\n", usage)),
            _ => None,
        }
    }
}
