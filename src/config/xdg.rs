//! XDG Base Directory support.

use std::path::PathBuf;

const APP_DIR: &str = "activity-mfe";
const SETTINGS_FILE: &str = "settings.json";

/// XDG directory paths for the activity host.
pub struct XdgDirs {
    /// Config directory (~/.config/activity-mfe or XDG_CONFIG_HOME/activity-mfe)
    pub config: PathBuf,
}

impl XdgDirs {
    /// Get XDG directories, respecting environment variables.
    pub fn new() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        Self {
            config: std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .unwrap_or_else(|_| home.join(".config"))
                .join(APP_DIR),
        }
    }

    /// Where [`Settings`](super::Settings) are read from by default.
    pub fn settings_file(&self) -> PathBuf {
        self.config.join(SETTINGS_FILE)
    }

    /// Ensure the config directory exists.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config)
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_respects_xdg_config_home() {
        let temp = tempfile::tempdir().unwrap();
        std::env::set_var("XDG_CONFIG_HOME", temp.path());

        let dirs = XdgDirs::new();
        assert_eq!(dirs.config, temp.path().join("activity-mfe"));
        assert_eq!(
            dirs.settings_file(),
            temp.path().join("activity-mfe").join("settings.json")
        );

        dirs.ensure_dirs().unwrap();
        assert!(dirs.config.is_dir());

        std::env::remove_var("XDG_CONFIG_HOME");
    }
}
