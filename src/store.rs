//! Context operations on a loaded [`Config`].
//!
//! These operations only enforce what the document itself requires. Policies
//! such as refusing to remove the active context belong to the caller.

use crate::model::{Config, Context};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("context '{name}' not found")]
    ContextNotFound { name: String },
}

impl Config {
    /// All contexts in file order.
    pub fn contexts(&self) -> &[Context] {
        &self.contexts
    }

    pub fn context_exists(&self, name: &str) -> bool {
        self.contexts.iter().any(|context| context.name() == name)
    }

    /// Namespace of the current context, or an empty string when the current
    /// context is unset or does not match any context.
    pub fn current_namespace(&self) -> &str {
        self.contexts
            .iter()
            .find(|context| context.name() == self.current_context)
            .map(Context::namespace)
            .unwrap_or_default()
    }

    /// Makes `name` the current context and binds `namespace` to it.
    ///
    /// An empty namespace clears the one previously bound. Nothing changes if
    /// the context does not exist.
    pub fn set_current_context(&mut self, name: &str, namespace: &str) -> Result<(), StoreError> {
        let context = self
            .contexts
            .iter_mut()
            .find(|context| context.name() == name)
            .ok_or_else(|| StoreError::ContextNotFound {
                name: name.to_string(),
            })?;

        context.set_namespace(namespace.to_string());
        self.current_context = name.to_string();
        debug!("Current context set to {:?} (namespace {:?})", name, namespace);
        Ok(())
    }

    /// Removes the first context named `name` and returns it.
    ///
    /// `current_context` is left untouched, even when it names the removed context.
    pub fn remove_context(&mut self, name: &str) -> Result<Context, StoreError> {
        let index = self
            .contexts
            .iter()
            .position(|context| context.name() == name)
            .ok_or_else(|| StoreError::ContextNotFound {
                name: name.to_string(),
            })?;

        debug!("Removing context {:?} at position {}", name, index);
        Ok(self.contexts.remove(index))
    }
}
