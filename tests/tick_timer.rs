// The session timer is a scoped resource: it exists only while a session
// runs, and ticks from an earlier session never reach the engine.

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use minitype::app::App;
use minitype::config::MemoryStore;
use minitype::engine::{Engine, ManualClock};
use minitype::language::ScriptedProvider;
use minitype::runtime::{AppEvent, AppEventSource, TestEventSource, TickTimer};
use minitype::session::{Mode, SessionState};
use minitype::sound::Silent;

const FAST: Duration = Duration::from_millis(5);

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

fn tab() -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE))
}

fn ticking_app(source: &TestEventSource, mode: Mode, config: u32) -> App<ScriptedProvider, ManualClock> {
    let seed = SessionState {
        mode,
        config,
        ..SessionState::default()
    };
    let engine = Engine::with_state(seed, ScriptedProvider::new(["ab"; 40]), ManualClock::new());
    App::new(engine, Box::new(MemoryStore::new()), Box::new(Silent)).with_ticks(source.sender(), FAST)
}

#[test]
fn test_no_timer_until_the_first_keystroke() {
    let source = TestEventSource::new();
    let app = ticking_app(&source, Mode::Time, 15);
    assert!(!app.has_timer());
    assert!(source.recv_timeout(Duration::from_millis(30)).is_err());
}

#[test]
fn test_reset_releases_the_timer_and_stale_ticks_are_dropped() {
    let source = TestEventSource::new();
    let mut app = ticking_app(&source, Mode::Time, 60);

    app.handle(key('a'));
    let first = app.epoch();
    let tick = source.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(tick, AppEvent::Tick(first));

    app.handle(tab());
    assert!(!app.has_timer());
    assert!(app.session().is_idle());

    // Whatever the old timer queued before it was joined is stale now.
    while let Ok(stale) = source.recv_timeout(Duration::from_millis(10)) {
        app.handle(stale);
    }
    assert_eq!(app.session().time_remaining, 60);
    assert!(app.session().wpm_history.is_empty());

    app.handle(key('a'));
    assert!(app.has_timer());
    assert_eq!(app.epoch(), first + 1);
    app.handle(AppEvent::Tick(first));
    assert_eq!(app.session().time_remaining, 60);

    let fresh = source.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(fresh, AppEvent::Tick(first + 1));
    app.handle(fresh);
    assert_eq!(app.session().time_remaining, 59);
}

#[test]
fn test_timer_stops_when_the_clock_runs_out() {
    let source = TestEventSource::new();
    let mut app = ticking_app(&source, Mode::Time, 15);
    app.handle(key('a'));

    for _ in 0..200 {
        if app.session().is_finished() {
            break;
        }
        if let Ok(event) = source.recv_timeout(Duration::from_secs(2)) {
            app.handle(event);
        }
    }

    assert!(app.session().is_finished());
    assert!(!app.has_timer());
    assert_eq!(app.session().time_remaining, 0);
    assert_eq!(app.session().wpm_history.len(), 15);
}

#[test]
fn test_dropping_a_timer_joins_its_thread() {
    let source = TestEventSource::new();
    let timer = TickTimer::start(source.sender(), Duration::from_secs(3600), 3);
    // Cancellation must not wait out the interval.
    let started = std::time::Instant::now();
    drop(timer);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(source.recv_timeout(Duration::from_millis(10)).is_err());
}
