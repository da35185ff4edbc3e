//! The ctx library.
//!
//! This crate lists, switches and removes kubectl contexts stored in a
//! kubeconfig file.
//!
//! # Modules
//!
//! - `actions`: Implementations of the `ls`, `use` and `rm` commands
//! - `cli`: Command line dispatch
//! - `codec`: Reading and writing the kubeconfig text format
//! - `commands`: CLI command and parameter definitions
//! - `configuration`: Kubeconfig path resolution, loading and saving
//! - `model`: Data model of a kubeconfig document
//! - `store`: Context operations on a loaded document

pub mod actions;
pub mod cli;
pub mod codec;
pub mod commands;
pub mod configuration;
pub mod error;
pub mod exit_codes;
pub mod model;
pub mod store;
