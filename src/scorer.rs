use crate::session::Session;
use crate::timer::{TimerMode, TimerState};

/// Floor for the effective elapsed time so an instantly-ended session
/// cannot divide by zero.
pub const MIN_EFFECTIVE_SECS: f64 = 1.0;

/// Final results surfaced at session end.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub wpm: f64,
    pub accuracy: f64,
    pub error_count: usize,
    pub total_penalty_secs: f64,
}

/// Derive the summary from the state machine's counters and the clock.
///
/// Accuracy judges only completed words (skips are excluded from the
/// denominator but still surface in `error_count`). In countdown mode the
/// effective time is capped at the configured limit; in count-up mode the
/// accumulated penalty inflates it, since a count-up clock cannot be
/// shortened while running.
pub fn score(session: &Session, timer: &TimerState) -> Summary {
    let completed = session.completed_words();
    let accuracy = if completed == 0 {
        0.0
    } else {
        (session.correct_words() as f64 / completed as f64 * 100.0).round()
    };

    let effective_secs = match timer.mode() {
        TimerMode::Countdown => timer.elapsed_secs().min(timer.limit_secs()),
        TimerMode::Countup => timer.elapsed_secs() + session.total_penalty_secs(),
    }
    .max(MIN_EFFECTIVE_SECS);

    let wpm = (session.correct_words() as f64 / (effective_secs / 60.0)).round();

    Summary {
        wpm,
        accuracy,
        error_count: session.incorrect_words(),
        total_penalty_secs: session.total_penalty_secs(),
    }
}
