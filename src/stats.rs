//! Results for a typing session: speed, accuracy and consistency.
//!
//! Every figure is a whole number. Zero elapsed time, zero typed characters
//! or an empty sample set produce 0 rather than NaN or infinity.

use std::time::{Duration, SystemTime};

use crate::error::{Error, Result};
use crate::language::SupportedLanguage;
use crate::session::{LetterStatus, Mode, SessionState, WpmSample};

/// Characters per word in every per-minute figure.
pub const CHARS_PER_WORD: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    pub wpm: u32,
    pub raw_wpm: u32,
    pub accuracy: u32,
    pub consistency: u32,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
    pub extra_chars: usize,
    pub elapsed_secs: u64,
    pub mode: Mode,
    pub config: u32,
    pub language: SupportedLanguage,
}

impl Stats {
    pub fn total_typed(&self) -> usize {
        self.correct_chars + self.incorrect_chars + self.extra_chars
    }
}

/// Summarise a finished session.
pub fn summarize(state: &SessionState) -> Result<Stats> {
    let (Some(_), Some(end)) = (state.started_at, state.ended_at) else {
        return Err(Error::SessionNotFinished);
    };
    if !state.is_finished() {
        return Err(Error::SessionNotFinished);
    }

    let elapsed = state.elapsed(end);
    let correct_chars = state.count(LetterStatus::Correct);
    let incorrect_chars = state.count(LetterStatus::Incorrect);
    let extra_chars = state.count(LetterStatus::Extra);
    let total = correct_chars + incorrect_chars + extra_chars;

    Ok(Stats {
        wpm: per_minute(correct_chars, elapsed),
        raw_wpm: per_minute(total, elapsed),
        accuracy: accuracy(correct_chars, total),
        consistency: consistency(&state.wpm_history),
        correct_chars,
        incorrect_chars,
        extra_chars,
        elapsed_secs: (elapsed.as_millis() as f64 / 1000.0).round() as u64,
        mode: state.mode,
        config: state.config,
        language: state.language,
    })
}

/// Instantaneous WPM from the correct characters typed so far.
pub fn live_wpm(state: &SessionState, now: SystemTime) -> u32 {
    per_minute(state.count(LetterStatus::Correct), state.elapsed(now))
}

/// `(chars / 5) / minutes`, rounded.
pub fn per_minute(chars: usize, elapsed: Duration) -> u32 {
    let minutes = elapsed.as_secs_f64() / 60.0;
    whole((chars as f64 / CHARS_PER_WORD) / minutes)
}

pub fn accuracy(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    whole(correct as f64 / total as f64 * 100.0).min(100)
}

/// `100 - round(stddev / mean * 100)` over the per-tick samples, floored at 0.
pub fn consistency(samples: &[WpmSample]) -> u32 {
    let values: Vec<f64> = samples.iter().map(|s| s.wpm as f64).collect();
    match (mean(&values), std_dev(&values)) {
        (Some(m), Some(sd)) if m > 0.0 => {
            let spread = (sd / m * 100.0).round();
            if spread.is_finite() {
                (100.0 - spread).clamp(0.0, 100.0) as u32
            } else {
                0
            }
        }
        _ => 0,
    }
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

/// Population standard deviation.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    let variance = data.iter().map(|v| (v - m).powi(2)).sum::<f64>() / data.len() as f64;
    Some(variance.sqrt())
}

// NaN, infinities and negatives all collapse to 0.
fn whole(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}
