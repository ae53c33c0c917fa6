use std::time::{Duration, Instant};

/// The one recurring game timer. Only armed while the game runs, so at most
/// one step is ever pending.
pub struct Ticker {
    interval: Duration,
    next_deadline: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Ticker { interval, next_deadline: None }
    }

    /// No-op when already armed, so re-entering Running never doubles up.
    pub fn arm(&mut self, now: Instant) {
        if self.next_deadline.is_none() {
            self.next_deadline = Some(now + self.interval);
        }
    }

    pub fn disarm(&mut self) {
        self.next_deadline = None;
    }

    /// Arms or disarms to match whether the game is running.
    pub fn sync(&mut self, running: bool, now: Instant) {
        if running {
            self.arm(now);
        } else {
            self.disarm();
        }
    }

    /// True at most once per call when the deadline has passed. Late polls
    /// don't catch up with a burst of steps.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next_deadline {
            Some(deadline) if now >= deadline => {
                self.next_deadline = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }
}
