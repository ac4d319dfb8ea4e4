use std::time::{Duration, SystemTime};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::language::SupportedLanguage;

/// Hard cap on the number of letters a single word may grow to through
/// extra keystrokes.
pub const MAX_WORD_LETTERS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterStatus {
    Pending,
    Correct,
    Incorrect,
    /// Typed past the end of the word; removed again by backspace.
    Extra,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Letter {
    pub char: char,
    pub status: LetterStatus,
}

impl Letter {
    pub fn pending(char: char) -> Self {
        Self {
            char,
            status: LetterStatus::Pending,
        }
    }

    pub fn extra(char: char) -> Self {
        Self {
            char,
            status: LetterStatus::Extra,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Word {
    pub letters: Vec<Letter>,
}

impl Word {
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn count(&self, status: LetterStatus) -> usize {
        self.letters.iter().filter(|l| l.status == status).count()
    }

    /// The word as the user is expected to type it, extra letters excluded.
    pub fn target(&self) -> String {
        self.letters
            .iter()
            .filter(|l| l.status != LetterStatus::Extra)
            .map(|l| l.char)
            .collect()
    }
}

impl From<&str> for Word {
    fn from(s: &str) -> Self {
        Self {
            letters: s.chars().map(Letter::pending).collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    pub word_index: usize,
    pub letter_index: usize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Running,
    Finished,
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
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
pub enum Mode {
    #[default]
    Time,
    Words,
    Quote,
    Numbers,
    Code,
    Zen,
    Custom,
}

impl Mode {
    /// Selector order.
    pub const ALL: [Mode; 7] = [
        Mode::Time,
        Mode::Words,
        Mode::Quote,
        Mode::Numbers,
        Mode::Code,
        Mode::Zen,
        Mode::Custom,
    ];

    pub fn next(&self) -> Mode {
        let idx = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Mode {
        let idx = Self::ALL.iter().position(|m| m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Modes whose content keeps growing while the session runs.
    pub fn is_endless(&self) -> bool {
        matches!(self, Mode::Time | Mode::Zen)
    }

    /// Whether `config` means anything for this mode.
    pub fn uses_config(&self) -> bool {
        matches!(self, Mode::Time | Mode::Words | Mode::Numbers)
    }

    pub fn defaults(&self) -> ModeDefaults {
        match self {
            Mode::Time => ModeDefaults {
                config: 30,
                presets: &[15, 30, 60, 120],
            },
            Mode::Words | Mode::Numbers => ModeDefaults {
                config: 25,
                presets: &[10, 25, 50, 100],
            },
            Mode::Quote | Mode::Code | Mode::Zen | Mode::Custom => ModeDefaults {
                config: 25,
                presets: &[],
            },
        }
    }
}

/// Per-mode configuration table: the value `config` is reset to when the
/// mode is selected, and the choices offered by the config selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeDefaults {
    pub config: u32,
    pub presets: &'static [u32],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WpmSample {
    pub elapsed_secs: u64,
    pub wpm: u32,
}

/// Everything the engine knows about one typing test.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub words: Vec<Word>,
    pub cursor: Cursor,
    pub status: SessionStatus,
    pub started_at: Option<SystemTime>,
    pub ended_at: Option<SystemTime>,
    pub mode: Mode,
    pub config: u32,
    /// Seconds left; only meaningful in [`Mode::Time`].
    pub time_remaining: u32,
    pub wpm_history: Vec<WpmSample>,
    pub language: SupportedLanguage,
    pub custom_text: String,
}

impl Default for SessionState {
    fn default() -> Self {
        let mode = Mode::default();
        let config = mode.defaults().config;
        Self {
            words: Vec::new(),
            cursor: Cursor::default(),
            status: SessionStatus::Idle,
            started_at: None,
            ended_at: None,
            mode,
            config,
            time_remaining: config,
            wpm_history: Vec::new(),
            language: SupportedLanguage::default(),
            custom_text: String::new(),
        }
    }
}

impl SessionState {
    pub fn current_word(&self) -> Option<&Word> {
        self.words.get(self.cursor.word_index)
    }

    pub fn is_idle(&self) -> bool {
        self.status == SessionStatus::Idle
    }

    pub fn is_running(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn is_finished(&self) -> bool {
        self.status == SessionStatus::Finished
    }

    pub fn on_last_word(&self) -> bool {
        self.cursor.word_index + 1 >= self.words.len()
    }

    /// Words at or after the cursor that have not been submitted yet.
    pub fn remaining_words(&self) -> usize {
        self.words.len().saturating_sub(self.cursor.word_index)
    }

    pub fn count(&self, status: LetterStatus) -> usize {
        self.words.iter().map(|w| w.count(status)).sum()
    }

    /// Time between start and `until` (or the recorded end when finished).
    pub fn elapsed(&self, until: SystemTime) -> Duration {
        match self.started_at {
            Some(start) => self
                .ended_at
                .unwrap_or(until)
                .duration_since(start)
                .unwrap_or_default(),
            None => Duration::ZERO,
        }
    }
}
