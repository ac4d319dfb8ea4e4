pub mod wordlist;
pub mod provider;
pub mod snippets;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use wordlist::Language;
pub use provider::{ContentProvider, ScriptedProvider, WordListProvider};

use crate::error::Result;

#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SupportedLanguage {
    #[default]
    English,
    Spanish,
    French,
    German,
}

impl SupportedLanguage {
    pub const ALL: [SupportedLanguage; 4] = [
        SupportedLanguage::English,
        SupportedLanguage::Spanish,
        SupportedLanguage::French,
        SupportedLanguage::German,
    ];

    pub fn as_lang(&self) -> Result<Language> {
        Language::load(&self.to_string())
    }

    pub fn next(&self) -> SupportedLanguage {
        let idx = Self::ALL.iter().position(|l| l == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }
}
