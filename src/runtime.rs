use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::{debug, warn};

/// Everything the main loop reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// One-second session tick, stamped with the epoch of the timer that sent it.
    Tick(u64),
    /// Nothing arrived within the frame interval; redraw.
    Frame,
}

/// Source of terminal events (keyboard, resize, timer ticks)
pub trait AppEventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError>;

    /// Handle for injecting events, used by the session timer.
    fn sender(&self) -> Sender<AppEvent>;
}

/// Production event source; a reader thread forwards crossterm events.
pub struct CrosstermEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let reader = tx.clone();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                // Windows reports key releases too; only presses are input.
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    reader.send(AppEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => reader.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(e) => {
                    warn!(error = %e, "terminal event reader stopped");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self { tx, rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AppEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

/// Channel-backed event source for tests
pub struct TestEventSource {
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl TestEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }
}

impl Default for TestEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl AppEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<AppEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }
}

/// Configurable frame interval
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Runner that advances the application one event at a time
pub struct Runner<E: AppEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: AppEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Blocks up to the frame interval and returns the next event, or Frame on timeout
    pub fn step(&self) -> AppEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                AppEvent::Frame
            }
        }
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.event_source.sender()
    }
}

/// Sends `AppEvent::Tick(epoch)` every `interval` until dropped.
///
/// Dropping the timer stops the thread and waits for it, so no tick from this
/// timer is enqueued after `drop` returns. Ticks already queued still carry
/// the old epoch and are discarded by the receiver.
pub struct TickTimer {
    epoch: u64,
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl TickTimer {
    pub fn start(events: Sender<AppEvent>, interval: Duration, epoch: u64) -> Self {
        let (cancel, cancelled) = mpsc::channel::<()>();
        let handle = std::thread::spawn(move || loop {
            match cancelled.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    if events.send(AppEvent::Tick(epoch)).is_err() {
                        break;
                    }
                }
                // Sender dropped or an explicit cancel
                _ => break,
            }
        });
        debug!(epoch, ?interval, "tick timer started");

        Self {
            epoch,
            cancel: Some(cancel),
            handle: Some(handle),
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        drop(self.cancel.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!(epoch = self.epoch, "tick timer thread panicked");
            }
        }
        debug!(epoch = self.epoch, "tick timer stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_step_returns_frame_on_timeout() {
        let runner = Runner::new(
            TestEventSource::new(),
            FixedTicker::new(Duration::from_millis(1)),
        );
        assert_eq!(runner.step(), AppEvent::Frame);
    }

    #[test]
    fn test_step_passes_through_events() {
        let runner = Runner::new(
            TestEventSource::new(),
            FixedTicker::new(Duration::from_millis(10)),
        );
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        runner.sender().send(AppEvent::Key(key)).unwrap();
        runner.sender().send(AppEvent::Resize).unwrap();

        assert_eq!(runner.step(), AppEvent::Key(key));
        assert_eq!(runner.step(), AppEvent::Resize);
    }

    #[test]
    fn test_tick_timer_sends_stamped_ticks() {
        let source = TestEventSource::new();
        let timer = TickTimer::start(source.sender(), Duration::from_millis(5), 7);
        assert_eq!(timer.epoch(), 7);

        let ev = source.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(ev, AppEvent::Tick(7));
    }

    #[test]
    fn test_dropped_tick_timer_sends_nothing_more() {
        let source = TestEventSource::new();
        let timer = TickTimer::start(source.sender(), Duration::from_millis(2), 1);
        source.recv_timeout(Duration::from_secs(2)).unwrap();
        drop(timer);

        // drain anything queued before the drop completed
        while source.recv_timeout(Duration::from_millis(1)).is_ok() {}
        assert_eq!(
            source.recv_timeout(Duration::from_millis(30)),
            Err(RecvTimeoutError::Timeout)
        );
    }
}
