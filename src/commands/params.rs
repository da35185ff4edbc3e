//! Shared command parameters.
//!
//! Command and parameter names live here so the command definitions and the
//! dispatcher agree on them.

use clap::{Arg, ArgAction};
use std::path::PathBuf;

// Context commands
pub const COMMAND_LIST: &str = "ls";
pub const COMMAND_USE: &str = "use";
pub const COMMAND_REMOVE: &str = "rm";

// Parameter names
pub const PARAMETER_CONTEXT: &str = "context";
pub const PARAMETER_NAMESPACE: &str = "namespace";
pub const PARAMETER_KUBECONFIG: &str = "kubeconfig";
pub const PARAMETER_HELP: &str = "help";

/// The context name positional argument.
///
/// Not marked as required so that a missing name is reported by the
/// dispatcher together with the command's usage line.
pub fn context_parameter() -> Arg {
    Arg::new(PARAMETER_CONTEXT)
        .num_args(1)
        .required(false)
        .value_name("CONTEXT")
        .help("Context name")
}

pub fn namespace_parameter() -> Arg {
    Arg::new(PARAMETER_NAMESPACE)
        .num_args(1)
        .required(false)
        .value_name("NAMESPACE")
        .help("Namespace to bind to the context")
}

/// Explicit kubeconfig path, taking precedence over the environment.
pub fn kubeconfig_parameter() -> Arg {
    Arg::new(PARAMETER_KUBECONFIG)
        .long(PARAMETER_KUBECONFIG)
        .num_args(1)
        .required(false)
        .global(true)
        .value_name("PATH")
        .help("Path to the kubeconfig file")
        .value_parser(clap::value_parser!(PathBuf))
}

pub fn help_parameter() -> Arg {
    Arg::new(PARAMETER_HELP)
        .short('h')
        .long(PARAMETER_HELP)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Show this help message")
}
