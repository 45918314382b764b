//! Host settings persisted as JSON.
//!
//! These only feed the demo host. The element itself never reads files or
//! environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::XdgDirs;
use crate::auth::AuthContext;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// What the host shell configures the element with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub tenant_id: String,
    pub bff_base_url: String,
    pub user_id: Option<String>,
    pub roles: Vec<String>,
}

impl Settings {
    /// Load from the XDG settings file.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&XdgDirs::new().settings_file())
    }

    /// Load from `path`. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// The signed-in user, if one is configured.
    pub fn auth_context(&self) -> Option<AuthContext> {
        self.user_id
            .as_ref()
            .map(|user_id| AuthContext::new(user_id.clone(), self.roles.iter().cloned()))
    }
}
