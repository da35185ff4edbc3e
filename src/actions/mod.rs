//! Command implementations.
//!
//! Each action loads the kubeconfig from the path it is given, performs one
//! operation and writes its result to the supplied writer.

pub mod contexts;
