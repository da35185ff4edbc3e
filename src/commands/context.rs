//! Context command definitions.

use crate::commands::params::{
    context_parameter, namespace_parameter, COMMAND_LIST, COMMAND_REMOVE, COMMAND_USE,
};
use clap::Command;

pub const USE_USAGE: &str = "ctx use <context> [namespace]";
pub const REMOVE_USAGE: &str = "ctx rm <context>";

pub fn list_command() -> Command {
    Command::new(COMMAND_LIST)
        .about("List all contexts")
        .disable_help_flag(true)
}

pub fn use_command() -> Command {
    Command::new(COMMAND_USE)
        .about("Switch to a context and optionally set its namespace")
        .disable_help_flag(true)
        .arg(context_parameter())
        .arg(namespace_parameter())
}

pub fn remove_command() -> Command {
    Command::new(COMMAND_REMOVE)
        .about("Remove a context")
        .disable_help_flag(true)
        .arg(context_parameter())
}
