//! In-memory model of a kubeconfig document.
//!
//! Only contexts are understood in depth. Clusters and users are carried as
//! opaque records so they survive a load/save cycle, and preferences only
//! matter by their presence.

use std::collections::BTreeMap;
use thiserror::Error;

pub const DEFAULT_API_VERSION: &str = "v1";
pub const DEFAULT_KIND: &str = "Config";

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("missing property value {name:?}")]
    MissingPropertyValue { name: String },
}

/// The root kubeconfig document.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub(crate) api_version: String,
    pub(crate) kind: String,
    pub(crate) current_context: String,
    pub(crate) preferences: BTreeMap<String, String>,
    pub(crate) contexts: Vec<Context>,
    pub(crate) clusters: Vec<Cluster>,
    pub(crate) users: Vec<User>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            kind: DEFAULT_KIND.to_string(),
            current_context: String::new(),
            preferences: BTreeMap::new(),
            contexts: Vec::new(),
            clusters: Vec::new(),
            users: Vec::new(),
        }
    }
}

impl Config {
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Name of the active context, empty when none is selected.
    pub fn current_context(&self) -> &str {
        &self.current_context
    }

    pub fn preferences(&self) -> &BTreeMap<String, String> {
        &self.preferences
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn set_api_version(&mut self, api_version: String) {
        self.api_version = api_version;
    }

    pub fn set_kind(&mut self, kind: String) {
        self.kind = kind;
    }

    pub fn set_preference(&mut self, key: String, value: String) {
        self.preferences.insert(key, value);
    }

    pub fn push_context(&mut self, context: Context) {
        self.contexts.push(context);
    }

    pub fn push_cluster(&mut self, cluster: Cluster) {
        self.clusters.push(cluster);
    }

    pub fn push_user(&mut self, user: User) {
        self.users.push(user);
    }
}

/// A named binding of cluster, user and optional namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    name: String,
    cluster: String,
    user: String,
    namespace: String,
}

impl Context {
    pub fn new(name: String, cluster: String, user: String, namespace: String) -> Context {
        Context {
            name,
            cluster,
            user,
            namespace,
        }
    }

    pub fn builder() -> ContextBuilder {
        ContextBuilder::new()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Namespace bound to this context, empty when unset.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn set_namespace(&mut self, namespace: String) {
        self.namespace = namespace;
    }
}

/// Collects context properties in the order they are read.
///
/// Every setter keeps the first value it receives and ignores later ones.
#[derive(Debug, Default)]
pub struct ContextBuilder {
    name: Option<String>,
    cluster: Option<String>,
    user: Option<String>,
    namespace: Option<String>,
}

impl ContextBuilder {
    fn new() -> ContextBuilder {
        ContextBuilder::default()
    }

    pub fn name(&mut self, name: String) -> &mut ContextBuilder {
        self.name.get_or_insert(name);
        self
    }

    pub fn cluster(&mut self, cluster: String) -> &mut ContextBuilder {
        self.cluster.get_or_insert(cluster);
        self
    }

    pub fn user(&mut self, user: String) -> &mut ContextBuilder {
        self.user.get_or_insert(user);
        self
    }

    pub fn namespace(&mut self, namespace: String) -> &mut ContextBuilder {
        self.namespace.get_or_insert(namespace);
        self
    }

    pub fn build(&self) -> Result<Context, ModelError> {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => {
                return Err(ModelError::MissingPropertyValue {
                    name: "name".to_string(),
                })
            }
        };

        Ok(Context::new(
            name,
            self.cluster.clone().unwrap_or_default(),
            self.user.clone().unwrap_or_default(),
            self.namespace.clone().unwrap_or_default(),
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    name: String,
    server: String,
    certificate_authority: Option<String>,
    certificate_authority_data: Option<String>,
}

impl Cluster {
    pub fn new(name: String, server: String) -> Cluster {
        Cluster {
            name,
            server,
            certificate_authority: None,
            certificate_authority_data: None,
        }
    }

    pub fn builder() -> ClusterBuilder {
        ClusterBuilder::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn certificate_authority(&self) -> Option<&str> {
        self.certificate_authority.as_deref()
    }

    pub fn certificate_authority_data(&self) -> Option<&str> {
        self.certificate_authority_data.as_deref()
    }
}

#[derive(Debug, Default)]
pub struct ClusterBuilder {
    name: Option<String>,
    server: Option<String>,
    certificate_authority: Option<String>,
    certificate_authority_data: Option<String>,
}

impl ClusterBuilder {
    pub fn name(&mut self, name: String) -> &mut ClusterBuilder {
        self.name.get_or_insert(name);
        self
    }

    pub fn server(&mut self, server: String) -> &mut ClusterBuilder {
        self.server.get_or_insert(server);
        self
    }

    pub fn certificate_authority(&mut self, path: String) -> &mut ClusterBuilder {
        self.certificate_authority.get_or_insert(path);
        self
    }

    pub fn certificate_authority_data(&mut self, data: String) -> &mut ClusterBuilder {
        self.certificate_authority_data.get_or_insert(data);
        self
    }

    pub fn build(&self) -> Result<Cluster, ModelError> {
        let name = self
            .name
            .clone()
            .ok_or_else(|| ModelError::MissingPropertyValue {
                name: "name".to_string(),
            })?;

        Ok(Cluster {
            name,
            server: self.server.clone().unwrap_or_default(),
            certificate_authority: self.certificate_authority.clone(),
            certificate_authority_data: self.certificate_authority_data.clone(),
        })
    }
}

/// Authentication fields of a user entry. Never inspected, only carried.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserAuth {
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub client_certificate: Option<String>,
    pub client_certificate_data: Option<String>,
    pub client_key: Option<String>,
    pub client_key_data: Option<String>,
}

impl UserAuth {
    pub fn is_empty(&self) -> bool {
        *self == UserAuth::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    auth: UserAuth,
}

impl User {
    pub fn new(name: String, auth: UserAuth) -> User {
        User { name, auth }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn auth(&self) -> &UserAuth {
        &self.auth
    }
}
