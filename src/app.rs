//! Application controller: turns terminal input into engine events and owns
//! everything around the session (modals, preferences, sound, the tick timer).

use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

use crate::config::{PreferenceStore, Preferences};
use crate::engine::{Clock, Engine, Event, SystemClock};
use crate::language::ContentProvider;
use crate::runtime::{AppEvent, TickTimer};
use crate::session::{LetterStatus, Mode, SessionState};
use crate::sound::{Cue, Feedback};
use crate::stats::{self, Stats};
use crate::theme::Theme;

/// Session ticks arrive once per second.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Modal {
    Shortcuts,
    /// Custom text being edited.
    CustomText(String),
}

/// What a key press asks for once the modal layer has had its say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Session(Event),
    Quit,
    ShowShortcuts,
    CycleTheme,
    ToggleSound,
    CycleLanguage,
    EditCustomText,
    ToggleLiveWpm,
    PreviousMode,
    NextMode,
    NextPreset,
    PreviousPreset,
}

/// Maps a key with no modal open to a command; `None` for keys nobody uses.
pub fn classify(key: &KeyEvent) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER);

    let command = match key.code {
        KeyCode::Char('c') if ctrl => Command::Quit,
        KeyCode::Char('k') if ctrl => Command::ShowShortcuts,
        KeyCode::Char('t') if ctrl => Command::CycleTheme,
        KeyCode::Char('s') if ctrl => Command::ToggleSound,
        KeyCode::Char('l') if ctrl => Command::CycleLanguage,
        KeyCode::Char('e') if ctrl => Command::EditCustomText,
        KeyCode::Char('w') if ctrl => Command::ToggleLiveWpm,
        KeyCode::Esc => Command::Quit,
        KeyCode::Tab => Command::Session(Event::Reset),
        KeyCode::Left => Command::PreviousMode,
        KeyCode::Right => Command::NextMode,
        KeyCode::Up => Command::NextPreset,
        KeyCode::Down => Command::PreviousPreset,
        KeyCode::Backspace if plain => Command::Session(Event::KeyBackspace),
        KeyCode::Char(' ') if plain => Command::Session(Event::KeySpace),
        KeyCode::Char(c) if plain && !c.is_control() => Command::Session(Event::KeyChar(c)),
        _ => return None,
    };
    Some(command)
}

/// The preset after (or before) `current`, wrapping. A value that is not a
/// preset jumps to the first one.
fn step_preset(presets: &[u32], current: u32, forward: bool) -> Option<u32> {
    if presets.is_empty() {
        return None;
    }
    let len = presets.len();
    let next = match presets.iter().position(|p| *p == current) {
        Some(idx) if forward => (idx + 1) % len,
        Some(idx) => (idx + len - 1) % len,
        None => 0,
    };
    Some(presets[next])
}

pub struct App<P: ContentProvider, C: Clock = SystemClock> {
    engine: Engine<P, C>,
    prefs: Preferences,
    store: Box<dyn PreferenceStore>,
    feedback: Box<dyn Feedback>,
    modal: Option<Modal>,
    show_live_wpm: bool,
    summary: Option<Stats>,
    ticks: Option<Sender<AppEvent>>,
    tick_interval: Duration,
    timer: Option<TickTimer>,
    ticking: bool,
    epoch: u64,
    should_quit: bool,
}

impl<P: ContentProvider, C: Clock> App<P, C> {
    pub fn new(
        engine: Engine<P, C>,
        store: Box<dyn PreferenceStore>,
        feedback: Box<dyn Feedback>,
    ) -> Self {
        let prefs = Preferences::load(store.as_ref());
        debug!(theme = %prefs.theme, sound = prefs.sound_enabled, "preferences loaded");
        Self {
            engine,
            prefs,
            store,
            feedback,
            modal: None,
            show_live_wpm: false,
            summary: None,
            ticks: None,
            tick_interval: TICK_INTERVAL,
            timer: None,
            ticking: false,
            epoch: 0,
            should_quit: false,
        }
    }

    /// Have a timer thread deliver `AppEvent::Tick` to `sender` while a
    /// session runs. Without this, ticks must be fed in by hand.
    pub fn with_ticks(mut self, sender: Sender<AppEvent>, interval: Duration) -> Self {
        self.ticks = Some(sender);
        self.tick_interval = interval;
        self
    }

    pub fn session(&self) -> &SessionState {
        self.engine.state()
    }

    pub fn engine(&self) -> &Engine<P, C> {
        &self.engine
    }

    pub fn summary(&self) -> Option<&Stats> {
        self.summary.as_ref()
    }

    pub fn modal(&self) -> Option<&Modal> {
        self.modal.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.prefs.theme
    }

    pub fn sound_enabled(&self) -> bool {
        self.prefs.sound_enabled
    }

    pub fn show_live_wpm(&self) -> bool {
        self.show_live_wpm
    }

    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }

    /// Epoch of the current (or most recent) running session's ticks.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn has_timer(&self) -> bool {
        self.timer.is_some()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// WPM right now, for the live readout.
    pub fn live_wpm(&self) -> u32 {
        stats::live_wpm(self.engine.state(), self.engine.clock().now())
    }

    pub fn handle(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Tick(epoch) => self.on_tick(epoch),
            AppEvent::Resize | AppEvent::Frame => {}
        }
    }

    fn on_tick(&mut self, epoch: u64) {
        if !self.ticking || epoch != self.epoch {
            debug!(epoch, current = self.epoch, "discarding stale tick");
            return;
        }
        self.dispatch(Event::Tick);
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.modal.take() {
            Some(Modal::Shortcuts) => {}
            Some(Modal::CustomText(text)) => self.edit_custom_text(text, key),
            None => {
                if let Some(command) = classify(&key) {
                    self.run(command);
                }
            }
        }
    }

    fn edit_custom_text(&mut self, mut text: String, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {}
            KeyCode::Enter => self.submit_custom_text(text),
            KeyCode::Backspace => {
                text.pop();
                self.modal = Some(Modal::CustomText(text));
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                text.push(c);
                self.modal = Some(Modal::CustomText(text));
            }
            _ => self.modal = Some(Modal::CustomText(text)),
        }
    }

    fn submit_custom_text(&mut self, text: String) {
        info!(words = text.split_whitespace().count(), "custom text submitted");
        self.dispatch(Event::SetCustomText(text));
        if self.session().mode == Mode::Custom {
            self.dispatch(Event::Reset);
        } else {
            self.dispatch(Event::SetMode(Mode::Custom));
        }
    }

    fn run(&mut self, command: Command) {
        match command {
            Command::Session(event) => {
                let typed = matches!(event, Event::KeyChar(_));
                self.dispatch(event);
                if typed {
                    self.keystroke_cue();
                }
            }
            Command::Quit => self.should_quit = true,
            Command::ShowShortcuts => self.modal = Some(Modal::Shortcuts),
            Command::CycleTheme => {
                let theme = self.prefs.theme.next();
                self.persist(|prefs, store| prefs.set_theme(theme, store));
            }
            Command::ToggleSound => {
                let enabled = !self.prefs.sound_enabled;
                self.persist(|prefs, store| prefs.set_sound(enabled, store));
            }
            Command::CycleLanguage => {
                let language = self.session().language.next();
                self.dispatch(Event::SetLanguage(language));
            }
            Command::EditCustomText => {
                self.modal = Some(Modal::CustomText(self.session().custom_text.clone()));
            }
            Command::ToggleLiveWpm => self.show_live_wpm = !self.show_live_wpm,
            Command::PreviousMode => self.select_mode(self.session().mode.previous()),
            Command::NextMode => self.select_mode(self.session().mode.next()),
            Command::NextPreset | Command::PreviousPreset => {
                let state = self.session();
                let presets = state.mode.defaults().presets;
                let forward = command == Command::NextPreset;
                if let Some(config) = step_preset(presets, state.config, forward) {
                    self.dispatch(Event::SetConfig(config));
                }
            }
        }
    }

    fn select_mode(&mut self, mode: Mode) {
        self.dispatch(Event::SetMode(mode));
        if mode == Mode::Custom && self.session().custom_text.trim().is_empty() {
            self.modal = Some(Modal::CustomText(String::new()));
        }
    }

    fn persist<F>(&mut self, change: F)
    where
        F: FnOnce(&mut Preferences, &mut dyn PreferenceStore) -> crate::Result<()>,
    {
        if let Err(e) = change(&mut self.prefs, self.store.as_mut()) {
            warn!(error = %e, "failed to save preferences");
        }
        debug!(theme = %self.prefs.theme, sound = self.prefs.sound_enabled, "preferences changed");
    }

    fn keystroke_cue(&mut self) {
        if !self.prefs.sound_enabled || self.session().is_finished() {
            return;
        }
        let state = self.session();
        let last = state
            .cursor
            .letter_index
            .checked_sub(1)
            .and_then(|idx| state.current_word()?.letters.get(idx));
        let cue = match last.map(|l| l.status) {
            Some(LetterStatus::Incorrect) | Some(LetterStatus::Extra) => Cue::Error,
            _ => Cue::KeyPress,
        };
        self.feedback.play(cue);
    }

    /// Apply `event` to the engine and reconcile everything that hangs off
    /// the session status.
    pub fn dispatch(&mut self, event: Event) {
        let was_finished = self.session().is_finished();
        self.engine.apply(event);
        self.sync_timer();

        let state = self.engine.state();
        if state.is_finished() && !was_finished {
            match self.engine.summary() {
                Ok(stats) => {
                    info!(
                        mode = %stats.mode,
                        wpm = stats.wpm,
                        accuracy = stats.accuracy,
                        consistency = stats.consistency,
                        "session complete"
                    );
                    self.summary = Some(stats);
                }
                Err(e) => warn!(error = %e, "could not summarise session"),
            }
            if self.prefs.sound_enabled {
                self.feedback.play(Cue::Complete);
            }
        } else if !state.is_finished() {
            self.summary = None;
        }
    }

    // The timer lives exactly as long as the Running status.
    fn sync_timer(&mut self) {
        let running = self.engine.state().is_running();
        if running && !self.ticking {
            self.epoch += 1;
            self.ticking = true;
            self.timer = self
                .ticks
                .as_ref()
                .map(|tx| TickTimer::start(tx.clone(), self.tick_interval, self.epoch));
        } else if !running && self.ticking {
            self.ticking = false;
            self.timer = None;
        }
    }
}
