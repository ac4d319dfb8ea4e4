use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", "minitype")
    }

    /// Preferences live with the rest of the user's configuration.
    pub fn preferences_path() -> PathBuf {
        Self::project()
            .map(|pd| pd.config_dir().join("preferences.json"))
            .unwrap_or_else(|| PathBuf::from("minitype_preferences.json"))
    }

    /// The log goes under `$HOME/.local/state/minitype`, falling back to the
    /// platform's local data directory.
    pub fn log_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("minitype")
                .join("minitype.log");
        }
        Self::project()
            .map(|pd| pd.data_local_dir().join("minitype.log"))
            .unwrap_or_else(|| PathBuf::from("minitype.log"))
    }
}
