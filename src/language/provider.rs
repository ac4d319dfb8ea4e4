use std::collections::HashMap;

use rand::{seq::SliceRandom, Rng};

use super::{wordlist::Language, snippets::CODE_SNIPPETS, SupportedLanguage};
use crate::error::Result;
use crate::session::Mode;

/// Words generated up front for the endless modes.
pub const INITIAL_WORD_COUNT: usize = 50;

/// Shown in custom mode until the user supplies text.
pub const CUSTOM_PLACEHOLDER: [&str; 7] = ["Click", "custom", "mode", "to", "enter", "your", "text"];

/// Source of the words a session asks the user to type.
pub trait ContentProvider {
    /// Full content for a fresh session.
    fn provide(
        &self,
        mode: Mode,
        config: u32,
        language: SupportedLanguage,
        custom_text: &str,
    ) -> Vec<String>;

    /// A further batch of words for the endless modes.
    fn extend(&self, language: SupportedLanguage, count: usize) -> Vec<String>;
}

/// Splits on single spaces and drops the empty pieces double spaces leave.
pub fn split_words(text: &str) -> Vec<String> {
    text.split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Production provider backed by the bundled word lists.
#[derive(Debug, Clone)]
pub struct WordListProvider {
    languages: HashMap<SupportedLanguage, Language>,
    fallback: Language,
}

impl WordListProvider {
    pub fn new() -> Result<Self> {
        let languages = SupportedLanguage::ALL
            .iter()
            .map(|l| Ok((*l, l.as_lang()?)))
            .collect::<Result<HashMap<_, _>>>()?;
        let fallback = SupportedLanguage::English.as_lang()?;
        Ok(Self {
            languages,
            fallback,
        })
    }

    fn language(&self, language: SupportedLanguage) -> &Language {
        self.languages.get(&language).unwrap_or(&self.fallback)
    }

    fn random_words(&self, language: SupportedLanguage, count: usize) -> Vec<String> {
        let rng = &mut rand::thread_rng();
        let words = &self.language(language).words;
        (0..count)
            .filter_map(|_| words.choose(rng).cloned())
            .collect()
    }

    fn random_numbers(&self, count: usize) -> Vec<String> {
        let mut rng = rand::thread_rng();
        (0..count)
            .map(|_| rng.gen_range(0..1000u32).to_string())
            .collect()
    }

    fn random_quote(&self, language: SupportedLanguage) -> Vec<String> {
        let rng = &mut rand::thread_rng();
        let quotes = match &self.language(language).quotes {
            q if q.is_empty() => &self.fallback.quotes,
            q => q,
        };
        quotes
            .choose(rng)
            .map(|q| split_words(q))
            .unwrap_or_else(|| self.random_words(language, INITIAL_WORD_COUNT))
    }

    fn random_snippet(&self) -> Vec<String> {
        let rng = &mut rand::thread_rng();
        CODE_SNIPPETS
            .choose(rng)
            .map(|s| split_words(s))
            .unwrap_or_default()
    }
}

impl ContentProvider for WordListProvider {
    fn provide(
        &self,
        mode: Mode,
        config: u32,
        language: SupportedLanguage,
        custom_text: &str,
    ) -> Vec<String> {
        match mode {
            Mode::Words => self.random_words(language, config as usize),
            Mode::Time | Mode::Zen => self.random_words(language, INITIAL_WORD_COUNT),
            Mode::Numbers => self.random_numbers(config as usize),
            Mode::Quote => self.random_quote(language),
            Mode::Code => self.random_snippet(),
            Mode::Custom => match split_words(custom_text) {
                words if words.is_empty() => {
                    CUSTOM_PLACEHOLDER.iter().map(|w| w.to_string()).collect()
                }
                words => words,
            },
        }
    }

    fn extend(&self, language: SupportedLanguage, count: usize) -> Vec<String> {
        self.random_words(language, count)
    }
}

/// Deterministic provider: hands out a fixed script of words, cycling it for
/// extensions. Used for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    words: Vec<String>,
}

impl ScriptedProvider {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl ContentProvider for ScriptedProvider {
    fn provide(
        &self,
        mode: Mode,
        _config: u32,
        _language: SupportedLanguage,
        custom_text: &str,
    ) -> Vec<String> {
        if mode == Mode::Custom && !custom_text.trim().is_empty() {
            return split_words(custom_text);
        }
        self.words.clone()
    }

    fn extend(&self, _language: SupportedLanguage, count: usize) -> Vec<String> {
        self.words.iter().cycle().take(count).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> WordListProvider {
        WordListProvider::new().unwrap()
    }

    #[test]
    fn test_words_mode_uses_config_count() {
        let words = provider().provide(Mode::Words, 10, SupportedLanguage::English, "");
        assert_eq!(words.len(), 10);
    }

    #[test]
    fn test_endless_modes_start_with_initial_batch() {
        let p = provider();
        for mode in [Mode::Time, Mode::Zen] {
            let words = p.provide(mode, 15, SupportedLanguage::German, "");
            assert_eq!(words.len(), INITIAL_WORD_COUNT);
        }
    }

    #[test]
    fn test_numbers_are_below_one_thousand() {
        let words = provider().provide(Mode::Numbers, 25, SupportedLanguage::English, "");
        assert_eq!(words.len(), 25);
        for w in words {
            let n: u32 = w.parse().unwrap();
            assert!(n < 1000);
        }
    }

    #[test]
    fn test_quote_comes_from_language_list() {
        let p = provider();
        let words = p.provide(Mode::Quote, 0, SupportedLanguage::French, "");
        let joined = words.join(" ");
        let french = SupportedLanguage::French.as_lang().unwrap();
        assert!(french.quotes.contains(&joined));
    }

    #[test]
    fn test_code_snippet_is_split_on_spaces() {
        let words = provider().provide(Mode::Code, 0, SupportedLanguage::English, "");
        let joined = words.join(" ");
        assert!(CODE_SNIPPETS.contains(&joined.as_str()));
    }

    #[test]
    fn test_custom_text_and_placeholder() {
        let p = provider();
        let words = p.provide(Mode::Custom, 0, SupportedLanguage::English, "hello  there world");
        assert_eq!(words, vec!["hello", "there", "world"]);

        let placeholder = p.provide(Mode::Custom, 0, SupportedLanguage::English, "");
        assert_eq!(placeholder, CUSTOM_PLACEHOLDER.to_vec());
    }

    #[test]
    fn test_extend_returns_requested_batch() {
        let words = provider().extend(SupportedLanguage::Spanish, 25);
        assert_eq!(words.len(), 25);
        let spanish = SupportedLanguage::Spanish.as_lang().unwrap();
        assert!(words.iter().all(|w| spanish.words.contains(w)));
    }

    #[test]
    fn test_scripted_provider_cycles_on_extend() {
        let p = ScriptedProvider::new(["a", "b"]);
        assert_eq!(p.provide(Mode::Words, 3, SupportedLanguage::English, ""), vec!["a", "b"]);
        assert_eq!(p.extend(SupportedLanguage::English, 5), vec!["a", "b", "a", "b", "a"]);
    }
}
