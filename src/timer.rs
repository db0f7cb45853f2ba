/// Direction of the session clock: fixed-duration tests count down,
/// fixed-word-count tests count up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerMode {
    Countdown,
    Countup,
}

/// Session clock, advanced only by injected ticks so tests can simulate
/// time. Starts lazily on the first character input and stops exactly once.
#[derive(Debug, Clone)]
pub struct TimerState {
    mode: TimerMode,
    limit_secs: f64,
    seconds_remaining: f64,
    elapsed_secs: f64,
    started: bool,
    ended: bool,
}

impl TimerState {
    pub fn countdown(limit_secs: f64) -> Self {
        Self {
            mode: TimerMode::Countdown,
            limit_secs,
            seconds_remaining: limit_secs,
            elapsed_secs: 0.0,
            started: false,
            ended: false,
        }
    }

    pub fn countup() -> Self {
        Self {
            mode: TimerMode::Countup,
            limit_secs: 0.0,
            seconds_remaining: 0.0,
            elapsed_secs: 0.0,
            started: false,
            ended: false,
        }
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    /// Starting an already-started or already-ended timer is a no-op.
    pub fn start(&mut self) {
        if self.started || self.ended {
            return;
        }
        self.started = true;
    }

    /// Advance the clock by one tick. No-op before start and after end.
    pub fn on_tick(&mut self, dt_secs: f64) {
        if !self.started || self.ended {
            return;
        }
        self.elapsed_secs += dt_secs;
        if self.mode == TimerMode::Countdown {
            self.seconds_remaining = (self.seconds_remaining - dt_secs).max(0.0);
        }
    }

    /// Subtract a mistake penalty from the remaining time. Meaningless for a
    /// count-up clock (the penalty inflates scoring instead), so only
    /// countdown timers are touched.
    pub fn apply_penalty(&mut self, secs: f64) {
        if self.mode != TimerMode::Countdown || self.ended {
            return;
        }
        self.seconds_remaining = (self.seconds_remaining - secs).max(0.0);
    }

    /// A countdown that has hit zero. Count-up clocks never expire.
    pub fn expired(&self) -> bool {
        self.mode == TimerMode::Countdown && self.seconds_remaining <= 0.0
    }

    /// Idempotent; synchronous with the end-session transition.
    pub fn stop(&mut self) {
        self.ended = true;
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    /// Value for display: remaining seconds (floored at 0) or elapsed.
    pub fn display_secs(&self) -> f64 {
        match self.mode {
            TimerMode::Countdown => self.seconds_remaining.max(0.0),
            TimerMode::Countup => self.elapsed_secs,
        }
    }

    /// Wall-clock seconds accumulated from ticks since the lazy start.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed_secs
    }

    pub fn limit_secs(&self) -> f64 {
        self.limit_secs
    }
}
