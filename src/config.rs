use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::app_dirs::AppDirs;
use crate::error::Result;
use crate::theme::Theme;

pub const THEME_KEY: &str = "minitype-theme";
pub const SOUND_KEY: &str = "minitype-sound";

/// String key/value persistence for user preferences.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self::with_path(AppDirs::preferences_path())
    }

    /// Open the store at `p`. A missing, unreadable or malformed file starts
    /// empty; only a missing one does so without a warning.
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        let path = p.as_ref().to_path_buf();
        let values = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "ignoring malformed preferences");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read preferences");
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&self.values)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Theme and sound choices that survive restarts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub sound_enabled: bool,
}

impl Preferences {
    /// Unknown or missing values fall back to the defaults.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let theme = store
            .get(THEME_KEY)
            .and_then(|id| Theme::from_id(&id))
            .unwrap_or_default();
        let sound_enabled = store.get(SOUND_KEY).is_some_and(|v| v == "true");
        Self {
            theme,
            sound_enabled,
        }
    }

    pub fn set_theme(&mut self, theme: Theme, store: &mut dyn PreferenceStore) -> Result<()> {
        self.theme = theme;
        store.set(THEME_KEY, &theme.to_string())
    }

    pub fn set_sound(&mut self, enabled: bool, store: &mut dyn PreferenceStore) -> Result<()> {
        self.sound_enabled = enabled;
        store.set(SOUND_KEY, if enabled { "true" } else { "false" })
    }
}
