use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use tracing::trace;

/// What just happened, from the point of view of audio feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    KeyPress,
    Error,
    Complete,
}

pub trait Feedback {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell for mistakes and completion. Plain keypresses
/// stay silent; a bell per keystroke is unbearable.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Feedback for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        if cue == Cue::KeyPress {
            return;
        }
        trace!(?cue, "bell");
        // A lost bell is not worth surfacing.
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }
}

/// Remembers every cue. Clones share one log, so a test can keep a handle
/// while the app owns another.
#[derive(Debug, Default, Clone)]
pub struct RecordingFeedback {
    cues: Rc<RefCell<Vec<Cue>>>,
}

impl RecordingFeedback {
    pub fn cues(&self) -> Vec<Cue> {
        self.cues.borrow().clone()
    }
}

impl Feedback for RecordingFeedback {
    fn play(&mut self, cue: Cue) {
        self.cues.borrow_mut().push(cue);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Feedback for Silent {
    fn play(&mut self, _cue: Cue) {}
}
