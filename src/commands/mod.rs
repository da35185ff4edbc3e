//! CLI command definitions.
//!
//! The command line is parsed with clap's builder API. Help output is the
//! static [`USAGE`] text rather than clap's generated help, and parse errors
//! are handed back to the dispatcher instead of exiting the process.

use clap::Command;

pub mod context;
pub mod params;

pub use params::{
    COMMAND_LIST, COMMAND_REMOVE, COMMAND_USE, PARAMETER_CONTEXT, PARAMETER_HELP,
    PARAMETER_KUBECONFIG, PARAMETER_NAMESPACE,
};

pub const USAGE: &str = "\
ctx - A CLI tool for managing kubectl contexts and namespaces

Usage:
  ctx                              List all contexts (default)
  ctx ls                           List all contexts
  ctx use <context> [namespace]    Switch to a context and optionally set namespace
  ctx rm <context>                 Remove a context
  ctx --help                       Show this help message

Options:
  --kubeconfig <PATH>              Use this kubeconfig instead of $KUBECONFIG or ~/.kube/config

Examples:
  ctx                              # List all contexts
  ctx use my-cluster               # Switch to context 'my-cluster'
  ctx use my-cluster default       # Switch to context and set namespace to 'default'
  ctx use \"complex context-name\" ns # Context names with spaces need quotes
  ctx rm old-cluster               # Remove context 'old-cluster'
";

/// Build the top-level command with all its subcommands.
pub fn create_cli_command() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .arg(params::help_parameter())
        .arg(params::kubeconfig_parameter())
        .subcommand(context::list_command())
        .subcommand(context::use_command())
        .subcommand(context::remove_command())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition_is_consistent() {
        create_cli_command().debug_assert();
    }

    #[test]
    fn test_parse_use_with_namespace() {
        let matches = create_cli_command()
            .try_get_matches_from(["ctx", "use", "prod", "staging"])
            .unwrap();
        let (name, sub_matches) = matches.subcommand().unwrap();

        assert_eq!(name, COMMAND_USE);
        assert_eq!(
            sub_matches.get_one::<String>(PARAMETER_CONTEXT).map(String::as_str),
            Some("prod")
        );
        assert_eq!(
            sub_matches.get_one::<String>(PARAMETER_NAMESPACE).map(String::as_str),
            Some("staging")
        );
    }

    #[test]
    fn test_only_ls_lists() {
        let matches = create_cli_command()
            .try_get_matches_from(["ctx", "ls"])
            .unwrap();
        assert_eq!(matches.subcommand_name(), Some(COMMAND_LIST));

        let error = create_cli_command()
            .try_get_matches_from(["ctx", "list"])
            .unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn test_no_version_flag() {
        for flag in ["--version", "-V"] {
            let error = create_cli_command()
                .try_get_matches_from(["ctx", flag])
                .unwrap_err();
            assert_eq!(error.kind(), clap::error::ErrorKind::UnknownArgument);
        }
    }

    #[test]
    fn test_unknown_subcommand_is_an_error() {
        let error = create_cli_command()
            .try_get_matches_from(["ctx", "switch"])
            .unwrap_err();
        assert_eq!(error.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }
}
