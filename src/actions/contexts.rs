use crate::{
    configuration,
    error::CliError,
    model::Config,
};
use std::{io::Write, path::Path};
use tracing::trace;

pub const NO_CONTEXTS_MESSAGE: &str = "No contexts found";

/// Print every context, marking the current one.
pub fn list_contexts<W: Write>(kubeconfig: &Path, out: &mut W) -> Result<(), CliError> {
    let config = configuration::load(kubeconfig)?;
    print_contexts(&config, out)
}

/// Writes one line per context: `<marker> <name>[ (namespace: <ns>)]`.
///
/// The marker is `*` for the current context. Only the current context shows
/// its namespace, and only when one is set.
pub fn print_contexts<W: Write>(config: &Config, out: &mut W) -> Result<(), CliError> {
    if config.contexts().is_empty() {
        writeln!(out, "{}", NO_CONTEXTS_MESSAGE)?;
        return Ok(());
    }

    let current_namespace = config.current_namespace();
    for context in config.contexts() {
        let is_current = context.name() == config.current_context();
        let marker = if is_current { '*' } else { ' ' };
        write!(out, "{} {}", marker, context.name())?;

        if is_current && !current_namespace.is_empty() {
            write!(out, " (namespace: {})", current_namespace)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Make `name` the current context, optionally binding a namespace to it.
pub fn use_context<W: Write>(
    kubeconfig: &Path,
    name: &str,
    namespace: Option<&str>,
    out: &mut W,
) -> Result<(), CliError> {
    let mut config = configuration::load(kubeconfig)?;

    if !config.context_exists(name) {
        return Err(CliError::ContextNotFound {
            name: name.to_string(),
        });
    }

    config.set_current_context(name, namespace.unwrap_or_default())?;
    configuration::save(&config, kubeconfig)?;

    match namespace {
        Some(namespace) if !namespace.is_empty() => writeln!(
            out,
            "Switched to context '{}' with namespace '{}'",
            name, namespace
        )?,
        _ => writeln!(out, "Switched to context '{}'", name)?,
    }

    Ok(())
}

/// Remove a context that is not the current one.
pub fn remove_context<W: Write>(
    kubeconfig: &Path,
    name: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let mut config = configuration::load(kubeconfig)?;

    if !config.context_exists(name) {
        return Err(CliError::ContextNotFound {
            name: name.to_string(),
        });
    }

    if config.current_context() == name {
        return Err(CliError::ActiveContext {
            name: name.to_string(),
        });
    }

    let removed = config.remove_context(name)?;
    trace!("Removed {:?}", removed);
    configuration::save(&config, kubeconfig)?;

    writeln!(out, "Removed context '{}'", name)?;
    Ok(())
}
