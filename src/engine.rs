//! The typing session state machine.
//!
//! [`reduce`] is the transition function: it consumes a [`SessionState`] and
//! an [`Event`] and returns the next state. Content and time come in through
//! the [`ContentProvider`] and [`Clock`] seams so the reducer itself stays
//! deterministic under test. [`Engine`] owns a state plus those two
//! collaborators and is what the application drives.

use std::cell::Cell;
use std::time::{Duration, SystemTime};

use tracing::debug;

use crate::error::Result;
use crate::language::{ContentProvider, SupportedLanguage};
use crate::session::{
    Cursor, Letter, LetterStatus, Mode, SessionState, SessionStatus, Word, WpmSample,
    MAX_WORD_LETTERS,
};
use crate::stats::{self, Stats};

/// Endless modes top up once fewer than this many words remain ahead.
pub const LOOKAHEAD_WORDS: usize = 10;

/// Words added per top-up.
pub const APPEND_BATCH: usize = 25;

/// Inputs to the session state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Reset,
    SetMode(Mode),
    SetConfig(u32),
    SetLanguage(SupportedLanguage),
    SetCustomText(String),
    KeyChar(char),
    KeyBackspace,
    KeySpace,
    Tick,
    AppendContent,
}

/// Source of wall-clock time for the engine.
pub trait Clock {
    fn now(&self) -> SystemTime;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock that only moves when told to. Starts at the Unix epoch.
#[derive(Debug, Default)]
pub struct ManualClock {
    offset: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        SystemTime::UNIX_EPOCH + self.offset.get()
    }
}

/// Apply one event to `state`.
///
/// Parameter changes (`Reset`, `SetMode`, `SetConfig`, `SetLanguage`) build a
/// fresh session and are accepted in any status. Everything else is a no-op
/// once the session is finished.
pub fn reduce<P, C>(state: SessionState, event: &Event, provider: &P, clock: &C) -> SessionState
where
    P: ContentProvider + ?Sized,
    C: Clock + ?Sized,
{
    match event {
        Event::Reset => fresh_session(state, provider),
        Event::SetMode(mode) => fresh_session(
            SessionState {
                mode: *mode,
                config: mode.defaults().config,
                ..state
            },
            provider,
        ),
        Event::SetConfig(config) => fresh_session(
            SessionState {
                config: *config,
                ..state
            },
            provider,
        ),
        Event::SetLanguage(language) => fresh_session(
            SessionState {
                language: *language,
                ..state
            },
            provider,
        ),
        Event::SetCustomText(text) => SessionState {
            custom_text: text.clone(),
            ..state
        },
        _ if state.is_finished() => state,
        Event::KeyChar(c) => type_char(start_if_idle(state, clock), *c),
        Event::KeyBackspace => backspace(start_if_idle(state, clock)),
        Event::KeySpace => submit_word(start_if_idle(state, clock), clock),
        Event::Tick => tick(state, clock),
        Event::AppendContent => append_content(state, provider),
    }
}

fn to_words(raw: Vec<String>) -> Vec<Word> {
    raw.iter().map(|w| Word::from(w.as_str())).collect()
}

fn fresh_session<P: ContentProvider + ?Sized>(state: SessionState, provider: &P) -> SessionState {
    let words = to_words(provider.provide(
        state.mode,
        state.config,
        state.language,
        &state.custom_text,
    ));
    debug!(
        mode = %state.mode,
        config = state.config,
        language = %state.language,
        words = words.len(),
        "new session"
    );
    SessionState {
        words,
        cursor: Cursor::default(),
        status: SessionStatus::Idle,
        started_at: None,
        ended_at: None,
        time_remaining: if state.mode == Mode::Time {
            state.config
        } else {
            0
        },
        wpm_history: Vec::new(),
        ..state
    }
}

fn start_if_idle<C: Clock + ?Sized>(mut state: SessionState, clock: &C) -> SessionState {
    if state.status == SessionStatus::Idle {
        state.status = SessionStatus::Running;
        state.started_at = Some(clock.now());
        state.wpm_history.clear();
        debug!(mode = %state.mode, "session started");
    }
    state
}

fn finish<C: Clock + ?Sized>(mut state: SessionState, clock: &C) -> SessionState {
    state.status = SessionStatus::Finished;
    state.ended_at = Some(clock.now());
    debug!(
        mode = %state.mode,
        words = state.cursor.word_index + 1,
        "session finished"
    );
    state
}

fn type_char(mut state: SessionState, c: char) -> SessionState {
    let cursor = state.cursor;
    let Some(word) = state.words.get_mut(cursor.word_index) else {
        return state;
    };

    if let Some(letter) = word.letters.get_mut(cursor.letter_index) {
        letter.status = if letter.char == c {
            LetterStatus::Correct
        } else {
            LetterStatus::Incorrect
        };
    } else if word.len() < MAX_WORD_LETTERS {
        word.letters.push(Letter::extra(c));
    } else {
        return state;
    }

    state.cursor.letter_index += 1;
    state
}

// Crossing back into the previous word only moves the cursor; the letters
// already judged there keep their status.
fn backspace(mut state: SessionState) -> SessionState {
    let cursor = state.cursor;
    if cursor.letter_index > 0 {
        let idx = cursor.letter_index - 1;
        if let Some(word) = state.words.get_mut(cursor.word_index) {
            match word.letters.get(idx).map(|l| l.status) {
                Some(LetterStatus::Extra) => {
                    word.letters.remove(idx);
                }
                Some(_) => word.letters[idx].status = LetterStatus::Pending,
                None => {}
            }
            state.cursor.letter_index = idx;
        }
    } else if cursor.word_index > 0 {
        let previous = cursor.word_index - 1;
        state.cursor = Cursor {
            word_index: previous,
            letter_index: state.words.get(previous).map_or(0, Word::len),
        };
    }
    state
}

fn submit_word<C: Clock + ?Sized>(mut state: SessionState, clock: &C) -> SessionState {
    if state.on_last_word() {
        return finish(state, clock);
    }
    state.cursor = Cursor {
        word_index: state.cursor.word_index + 1,
        letter_index: 0,
    };
    state
}

fn tick<C: Clock + ?Sized>(mut state: SessionState, clock: &C) -> SessionState {
    if !state.is_running() {
        return state;
    }

    let now = clock.now();
    let sample = WpmSample {
        elapsed_secs: (state.elapsed(now).as_millis() as f64 / 1000.0).round() as u64,
        wpm: stats::live_wpm(&state, now),
    };
    state.wpm_history.push(sample);

    if state.mode == Mode::Time {
        if state.time_remaining <= 1 {
            state.time_remaining = 0;
            return finish(state, clock);
        }
        state.time_remaining -= 1;
    }
    state
}

fn needs_content(state: &SessionState) -> bool {
    state.mode.is_endless() && !state.is_finished() && state.remaining_words() < LOOKAHEAD_WORDS
}

fn append_content<P: ContentProvider + ?Sized>(mut state: SessionState, provider: &P) -> SessionState {
    if !needs_content(&state) {
        return state;
    }
    let batch = to_words(provider.extend(state.language, APPEND_BATCH));
    debug!(added = batch.len(), total = state.words.len() + batch.len(), "content extended");
    state.words.extend(batch);
    state
}

/// Owns the live session together with its content source and clock.
#[derive(Debug)]
pub struct Engine<P, C = SystemClock> {
    state: SessionState,
    provider: P,
    clock: C,
}

impl<P: ContentProvider, C: Clock> Engine<P, C> {
    /// A fresh, idle session with the default mode and language.
    pub fn new(provider: P, clock: C) -> Self {
        Self::with_state(SessionState::default(), provider, clock)
    }

    /// Start from the parameters in `seed` (mode, config, language, custom
    /// text); content and progress are regenerated.
    pub fn with_state(seed: SessionState, provider: P, clock: C) -> Self {
        let mut engine = Self {
            state: seed,
            provider,
            clock,
        };
        engine.apply(Event::Reset);
        engine
    }

    pub fn apply(&mut self, event: Event) {
        let state = std::mem::take(&mut self.state);
        let mut next = reduce(state, &event, &self.provider, &self.clock);
        if needs_content(&next) {
            next = reduce(next, &Event::AppendContent, &self.provider, &self.clock);
        }
        self.state = next;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn summary(&self) -> Result<Stats> {
        stats::summarize(&self.state)
    }
}
