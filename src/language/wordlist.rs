use include_dir::{include_dir, Dir};
use serde::Deserialize;

use crate::error::{Error, Result};

static LANG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/lang");

/// A bundled word list plus the quotes offered in quote mode.
#[derive(Deserialize, Clone, Debug)]
pub struct Language {
    pub name: String,
    pub size: u32,
    pub words: Vec<String>,
    #[serde(default)]
    pub quotes: Vec<String>,
}

impl Language {
    /// Load `<name>.json` from the embedded language directory.
    pub fn load(name: &str) -> Result<Self> {
        let file = LANG_DIR
            .get_file(format!("{name}.json"))
            .ok_or_else(|| Error::UnknownLanguage(name.to_string()))?;

        let contents = file
            .contents_utf8()
            .ok_or_else(|| Error::UnknownLanguage(name.to_string()))?;

        let lang: Language = serde_json::from_str(contents)?;
        if lang.words.is_empty() {
            return Err(Error::UnknownLanguage(name.to_string()));
        }
        Ok(lang)
    }
}
