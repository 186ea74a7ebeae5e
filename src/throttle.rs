//! Rate limiting for high-frequency event callbacks.
//!
//! Gates classification passes behind a throttle (scroll events) or a
//! debounce (resize events). The gate owns no timers: the host reports
//! event arrivals through [`RateGate::poll_call`] and drives deferred
//! work by calling [`RateGate::poll_tick`] from its own loop, passing an
//! explicit `Instant` so behavior is deterministic under test.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut gate = RateGate::new(Duration::from_millis(100), Mode::Throttle);
//!
//! // On every scroll event:
//! if gate.poll_call(Instant::now()) {
//!     spy.update();
//! }
//! // On every loop tick:
//! if gate.poll_tick(Instant::now()) {
//!     spy.update();
//! }
//! ```

use std::time::{Duration, Instant};

/// Rate-limiting discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Run immediately, then at most once per interval; a suppressed
    /// call is deferred to the end of the interval (trailing edge).
    Throttle,
    /// Run only after a full interval of call-silence.
    Debounce,
}

/// Poll-driven throttle/debounce gate.
#[derive(Debug, Clone)]
pub struct RateGate {
    mode: Mode,
    interval: Duration,
    /// Instant of the last run (leading or trailing).
    last_run: Option<Instant>,
    /// Instant of the most recent suppressed call.
    last_call: Option<Instant>,
    /// A deferred run is pending.
    armed: bool,
}

impl RateGate {
    pub fn new(interval: Duration, mode: Mode) -> Self {
        Self {
            mode,
            interval,
            last_run: None,
            last_call: None,
            armed: false,
        }
    }

    /// Report a call attempt at `now`. Returns true when the wrapped
    /// work should run immediately (throttle leading edge); otherwise
    /// the call is recorded and deferred.
    pub fn poll_call(&mut self, now: Instant) -> bool {
        match self.mode {
            Mode::Throttle => match self.last_run {
                Some(last) if now.duration_since(last) < self.interval => {
                    // Inside the interval: defer. A newer call supersedes
                    // the previous pending one.
                    self.last_call = Some(now);
                    self.armed = true;
                    false
                }
                _ => {
                    self.last_run = Some(now);
                    self.armed = false;
                    true
                }
            },
            Mode::Debounce => {
                self.last_call = Some(now);
                self.armed = true;
                false
            }
        }
    }

    /// Check whether a deferred run has matured at `now`. Returns true at
    /// most once per armed call; the host runs the wrapped work when it
    /// does.
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        if !self.armed {
            return false;
        }
        let matured = match self.mode {
            Mode::Throttle => self
                .last_run
                .is_none_or(|last| now.duration_since(last) >= self.interval),
            Mode::Debounce => self
                .last_call
                .is_none_or(|last| now.duration_since(last) >= self.interval),
        };
        if matured {
            self.armed = false;
            self.last_run = Some(now);
        }
        matured
    }

    /// Drop any pending deferred run and forget history.
    pub fn reset(&mut self) {
        self.last_run = None;
        self.last_call = None;
        self.armed = false;
    }

    /// A deferred run is waiting for its interval to mature.
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}
