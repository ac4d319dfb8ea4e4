use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{backend::TestBackend, Terminal};

use minitype::app::App;
use minitype::config::MemoryStore;
use minitype::engine::{Engine, ManualClock};
use minitype::language::ScriptedProvider;
use minitype::runtime::{AppEvent, AppEventSource, FixedTicker, Runner, TestEventSource};
use minitype::session::{LetterStatus, Mode, SessionState};
use minitype::sound::Silent;

type HeadlessApp = App<ScriptedProvider, ManualClock>;

fn headless_app(words: &[&str], mode: Mode, config: u32) -> HeadlessApp {
    let seed = SessionState {
        mode,
        config,
        ..SessionState::default()
    };
    let engine = Engine::with_state(
        seed,
        ScriptedProvider::new(words.to_vec()),
        ManualClock::new(),
    );
    App::new(engine, Box::new(MemoryStore::new()), Box::new(Silent))
}

fn send_keys<E: AppEventSource>(runner: &Runner<E, FixedTicker>, text: &str) {
    let tx = runner.sender();
    for c in text.chars() {
        tx.send(AppEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )))
        .unwrap();
    }
}

// Drives the app through Runner/TestEventSource without a TTY.
#[test]
fn test_headless_words_session_completes() {
    let mut app = headless_app(&["cat", "dog", "run"], Mode::Words, 3);
    let runner = Runner::new(
        TestEventSource::new(),
        FixedTicker::new(Duration::from_millis(5)),
    );
    send_keys(&runner, "c");

    for _ in 0..100u32 {
        let event = runner.step();
        app.handle(event);
        if app.session().is_running() {
            break;
        }
    }
    app.engine().clock().advance(Duration::from_secs(6));
    send_keys(&runner, "at dog run ");

    for _ in 0..100u32 {
        app.handle(runner.step());
        if app.session().is_finished() {
            break;
        }
    }

    assert!(app.session().is_finished());
    let stats = app.summary().expect("summary computed on finish");
    assert_eq!(stats.wpm, 18);
    assert_eq!(stats.accuracy, 100);
    assert_eq!(stats.correct_chars, 9);
}

#[test]
fn test_headless_time_session_runs_out() {
    let mut app = headless_app(&["tick"; 30], Mode::Time, 15);
    app.handle(AppEvent::Key(KeyEvent::new(
        KeyCode::Char('t'),
        KeyModifiers::NONE,
    )));
    let epoch = app.epoch();

    for _ in 0..15 {
        assert!(app.session().is_running());
        app.engine().clock().advance(Duration::from_secs(1));
        app.handle(AppEvent::Tick(epoch));
    }

    let state = app.session();
    assert!(state.is_finished());
    assert_eq!(state.time_remaining, 0);
    assert_eq!(state.wpm_history.len(), 15);
    assert_eq!(app.summary().unwrap().elapsed_secs, 15);
}

#[test]
fn test_zen_session_keeps_growing() {
    let mut app = headless_app(&["z"; 12], Mode::Zen, 25);
    for _ in 0..40 {
        for c in "z ".chars() {
            app.handle(AppEvent::Key(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::NONE,
            )));
        }
    }
    let state = app.session();
    assert!(state.is_running());
    assert!(state.remaining_words() >= 10);
    assert_eq!(state.count(LetterStatus::Correct), 40);
}

#[test]
fn test_draws_typing_and_results_frames() {
    let mut app = headless_app(&["go"], Mode::Words, 1);
    let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();

    terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();
    let typing: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(typing.contains("0/1"));

    for c in "gx ".chars() {
        app.handle(AppEvent::Key(KeyEvent::new(
            KeyCode::Char(c),
            KeyModifiers::NONE,
        )));
    }
    terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();
    let results: String = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect();
    assert!(results.contains("50%"));
    assert!(results.contains("1/1/0/0"));
}
