//! Command dispatch.
//!
//! Parses the command line, resolves the kubeconfig path and runs the
//! matching action. Nothing is read from disk before the arguments have been
//! validated.

use crate::{
    actions::contexts,
    commands::{
        context::{REMOVE_USAGE, USE_USAGE},
        create_cli_command, COMMAND_LIST, COMMAND_REMOVE, COMMAND_USE, PARAMETER_CONTEXT,
        PARAMETER_HELP, PARAMETER_KUBECONFIG, PARAMETER_NAMESPACE, USAGE,
    },
    configuration,
    error::CliError,
};
use clap::{
    error::{ContextKind, ContextValue, ErrorKind},
    ArgMatches,
};
use std::{ffi::OsString, io::Write, path::PathBuf};
use tracing::debug;

fn error_context(error: &clap::Error, kind: ContextKind) -> String {
    match error.get(kind) {
        Some(ContextValue::String(value)) => value.clone(),
        _ => String::new(),
    }
}

fn first_argument(args: &[OsString]) -> Option<&str> {
    args.get(1).and_then(|arg| arg.to_str())
}

/// Translate a clap parse failure into the tool's own errors.
fn handle_parse_error<W: Write>(
    error: clap::Error,
    args: &[OsString],
    out: &mut W,
) -> Result<(), CliError> {
    match error.kind() {
        ErrorKind::DisplayHelp => {
            write!(out, "{}", USAGE)?;
            Ok(())
        }
        ErrorKind::InvalidSubcommand => Err(CliError::UnknownCommand(error_context(
            &error,
            ContextKind::InvalidSubcommand,
        ))),
        ErrorKind::UnknownArgument => {
            let argument = error_context(&error, ContextKind::InvalidArg);
            if first_argument(args) == Some(argument.as_str()) {
                Err(CliError::UnknownCommand(argument))
            } else {
                Err(CliError::InvalidArguments(format!(
                    "unexpected argument '{}'",
                    argument
                )))
            }
        }
        kind => Err(CliError::InvalidArguments(
            kind.as_str().unwrap_or("invalid arguments").to_string(),
        )),
    }
}

fn help_requested(matches: &ArgMatches) -> bool {
    matches.get_flag(PARAMETER_HELP)
        || matches
            .subcommand()
            .map_or(false, |(_, sub_matches)| sub_matches.get_flag(PARAMETER_HELP))
}

fn kubeconfig_argument(matches: &ArgMatches) -> Option<PathBuf> {
    matches
        .subcommand()
        .and_then(|(_, sub_matches)| sub_matches.get_one::<PathBuf>(PARAMETER_KUBECONFIG))
        .or_else(|| matches.get_one::<PathBuf>(PARAMETER_KUBECONFIG))
        .cloned()
}

fn required_context<'a>(
    sub_matches: &'a ArgMatches,
    usage: &'static str,
) -> Result<&'a str, CliError> {
    sub_matches
        .get_one::<String>(PARAMETER_CONTEXT)
        .map(String::as_str)
        .ok_or_else(|| CliError::MissingRequiredArgument {
            message: "context name required".to_string(),
            usage,
        })
}

/// Run the command described by `args` (including the program name) and
/// write its output to `out`.
///
/// `out` is flushed before returning. A command error takes precedence over
/// a failed flush.
pub fn execute_command<I, T, W>(args: I, out: &mut W) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    W: Write,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

    let result = dispatch(&args, out);
    let flushed = out.flush();
    result?;
    flushed?;
    Ok(())
}

fn dispatch<W: Write>(args: &[OsString], out: &mut W) -> Result<(), CliError> {
    let matches = match create_cli_command().try_get_matches_from(args) {
        Ok(matches) => matches,
        Err(error) => return handle_parse_error(error, args, out),
    };

    if help_requested(&matches) {
        write!(out, "{}", USAGE)?;
        return Ok(());
    }

    let kubeconfig = configuration::default_kubeconfig_path(kubeconfig_argument(&matches));

    match matches.subcommand() {
        None | Some((COMMAND_LIST, _)) => contexts::list_contexts(&kubeconfig, out),
        Some((COMMAND_USE, sub_matches)) => {
            let name = required_context(sub_matches, USE_USAGE)?;
            let namespace = sub_matches
                .get_one::<String>(PARAMETER_NAMESPACE)
                .map(String::as_str);
            debug!("use {:?} namespace {:?}", name, namespace);
            contexts::use_context(&kubeconfig, name, namespace, out)
        }
        Some((COMMAND_REMOVE, sub_matches)) => {
            let name = required_context(sub_matches, REMOVE_USAGE)?;
            debug!("rm {:?}", name);
            contexts::remove_context(&kubeconfig, name, out)
        }
        Some((other, _)) => Err(CliError::UnknownCommand(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const TWO_CONTEXTS: &str = "\
current-context: dev
contexts:
  - name: dev
    context:
      cluster: dev-cluster
      user: dev-user
  - name: prod
    context:
      cluster: prod-cluster
      user: prod-user
";

    fn run(args: &[&str]) -> (Result<(), CliError>, String) {
        let mut buffer = Vec::new();
        let mut argv = vec!["ctx"];
        argv.extend_from_slice(args);
        let result = execute_command(argv, &mut buffer);
        (result, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn test_help_prints_usage() {
        for flag in ["--help", "-h"] {
            let (result, output) = run(&[flag]);
            assert!(result.is_ok());
            assert_eq!(output, USAGE);
        }
    }

    #[test]
    fn test_version_flags_are_unknown_commands() {
        for flag in ["--version", "-V"] {
            let (result, output) = run(&[flag]);
            assert!(matches!(result, Err(CliError::UnknownCommand(ref name)) if name == flag));
            assert!(output.is_empty());
        }
    }

    #[test]
    fn test_list_is_an_unknown_command() {
        let (result, _) = run(&["list"]);
        assert!(matches!(result, Err(CliError::UnknownCommand(ref name)) if name == "list"));
    }

    #[test]
    fn test_surplus_arguments_are_rejected() {
        for args in [&["use", "a", "b", "c"][..], &["ls", "x"][..], &["rm", "a", "b"][..]] {
            let (result, _) = run(args);
            assert!(
                matches!(result, Err(CliError::InvalidArguments(_))),
                "args {:?}",
                args
            );
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }
    }

    #[test]
    fn test_flush_failure_is_an_output_error() {
        let result = execute_command(["ctx", "--help"], &mut BrokenPipe);
        assert!(matches!(result, Err(CliError::OutputError(_))));
        assert_eq!(result.unwrap_err().exit_code(), crate::exit_codes::CtxExitCode::Failure);
    }

    #[test]
    fn test_command_error_wins_over_flush_failure() {
        let result = execute_command(["ctx", "switch"], &mut BrokenPipe);
        assert!(matches!(result, Err(CliError::UnknownCommand(_))));
    }

    #[test]
    fn test_unknown_command() {
        let (result, output) = run(&["switch"]);
        assert!(matches!(result, Err(CliError::UnknownCommand(ref name)) if name == "switch"));
        assert!(output.is_empty());
    }

    #[test]
    fn test_unknown_flag_is_unknown_command() {
        let (result, _) = run(&["--bogus"]);
        assert!(matches!(result, Err(CliError::UnknownCommand(ref name)) if name == "--bogus"));
    }

    #[test]
    fn test_use_without_name_does_not_touch_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        let path_str = path.to_str().unwrap();

        let (result, _) = run(&["--kubeconfig", path_str, "use"]);
        assert!(matches!(
            result,
            Err(CliError::MissingRequiredArgument { usage, .. }) if usage == USE_USAGE
        ));

        let (result, _) = run(&["rm", "--kubeconfig", path_str]);
        assert!(matches!(
            result,
            Err(CliError::MissingRequiredArgument { usage, .. }) if usage == REMOVE_USAGE
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_default_command_lists_contexts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, TWO_CONTEXTS).unwrap();
        let path_str = path.to_str().unwrap();

        let (result, output) = run(&["--kubeconfig", path_str]);
        assert!(result.is_ok());
        assert_eq!(output, "* dev\n  prod\n");

        let (result, listed) = run(&["ls", "--kubeconfig", path_str]);
        assert!(result.is_ok());
        assert_eq!(listed, output);
    }

    #[test]
    fn test_use_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, TWO_CONTEXTS).unwrap();
        let path_str = path.to_str().unwrap();

        let (result, output) = run(&["--kubeconfig", path_str, "use", "prod", "staging"]);
        assert!(result.is_ok());
        assert_eq!(output, "Switched to context 'prod' with namespace 'staging'\n");

        let (_, output) = run(&["--kubeconfig", path_str, "ls"]);
        assert_eq!(output, "  dev\n* prod (namespace: staging)\n");
    }
}
