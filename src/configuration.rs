//! Locating, loading and saving the kubeconfig file.
//!
//! The resolved path is a plain value handed to [`load`] and [`save`]; nothing
//! here keeps a process-wide default.

use crate::{codec, model::Config};
use std::{
    ffi::OsString,
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

pub const KUBECONFIG_ENV_VAR: &str = "KUBECONFIG";
pub const DEFAULT_KUBECONFIG_DIRECTORY: &str = ".kube";
pub const DEFAULT_KUBECONFIG_FILE_NAME: &str = "config";
/// Used verbatim when the home directory cannot be determined. Not tilde-expanded.
pub const FALLBACK_KUBECONFIG_PATH: &str = "~/.kube/config";

#[cfg(unix)]
const DIRECTORY_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("failed to read kubeconfig file {path:?}: {cause}")]
    FailedToReadFile {
        path: PathBuf,
        cause: std::io::Error,
    },
    #[error("failed to create config directory {path:?}: {cause}")]
    FailedToCreateDirectory {
        path: PathBuf,
        cause: std::io::Error,
    },
    #[error("failed to write config file {path:?}: {cause}")]
    FailedToWriteFile {
        path: PathBuf,
        cause: std::io::Error,
    },
}

/// Picks the kubeconfig path from, in order: an explicit value, the
/// environment variable value, the home directory.
pub fn resolve_kubeconfig_path(
    explicit: Option<PathBuf>,
    env_value: Option<OsString>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }

    if let Some(value) = env_value.filter(|value| !value.is_empty()) {
        return PathBuf::from(value);
    }

    match home {
        Some(mut path) => {
            path.push(DEFAULT_KUBECONFIG_DIRECTORY);
            path.push(DEFAULT_KUBECONFIG_FILE_NAME);
            path
        }
        None => PathBuf::from(FALLBACK_KUBECONFIG_PATH),
    }
}

/// Resolves the kubeconfig path against the real process environment.
pub fn default_kubeconfig_path(explicit: Option<PathBuf>) -> PathBuf {
    let path = resolve_kubeconfig_path(
        explicit,
        std::env::var_os(KUBECONFIG_ENV_VAR),
        dirs::home_dir(),
    );
    debug!("Using kubeconfig at {}", path.display());
    path
}

pub fn load(path: &Path) -> Result<Config, ConfigurationError> {
    debug!("Loading kubeconfig from {}...", path.display());
    let text = fs::read_to_string(path).map_err(|cause| ConfigurationError::FailedToReadFile {
        path: path.to_path_buf(),
        cause,
    })?;

    let config = codec::decode(&text);
    debug!(
        "Loaded {} contexts, current context {:?}",
        config.contexts().len(),
        config.current_context()
    );
    Ok(config)
}

fn create_directory(directory: &Path) -> Result<(), ConfigurationError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIRECTORY_MODE);
    }

    // no-op when the directory already exists
    builder
        .create(directory)
        .map_err(|cause| ConfigurationError::FailedToCreateDirectory {
            path: directory.to_path_buf(),
            cause,
        })
}

/// Encodes the whole document, then replaces the file atomically.
pub fn save(config: &Config, path: &Path) -> Result<(), ConfigurationError> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    create_directory(&directory)?;

    let data = codec::encode(config);
    let write_error = |cause: std::io::Error| ConfigurationError::FailedToWriteFile {
        path: path.to_path_buf(),
        cause,
    };

    let mut file = tempfile::NamedTempFile::new_in(&directory).map_err(write_error)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.as_file()
            .set_permissions(fs::Permissions::from_mode(FILE_MODE))
            .map_err(write_error)?;
    }
    file.write_all(data.as_bytes()).map_err(write_error)?;
    file.as_file().sync_all().map_err(write_error)?;
    file.persist(path).map_err(|e| write_error(e.error))?;

    debug!("Saved kubeconfig to {}", path.display());
    Ok(())
}
