use std::time::{Duration, Instant};

use crate::foundation::core::Fps;

/// Fixed-period tick deadlines.
///
/// A late caller gets one tick and the schedule jumps forward; missed ticks are dropped
/// rather than replayed in a burst.
#[derive(Clone, Copy, Debug)]
pub struct TickClock {
    period: Duration,
    next: Instant,
}

impl TickClock {
    pub fn new(fps: Fps) -> Self {
        Self::starting_at(fps, Instant::now())
    }

    pub fn starting_at(fps: Fps, start: Instant) -> Self {
        Self {
            period: fps.frame_duration(),
            next: start,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    /// Time left before the next tick is due.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// Consume the pending tick if it is due at `now`.
    pub fn advance(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }

    /// Block until the next tick is due, then consume it.
    pub fn wait(&mut self) {
        let left = self.remaining(Instant::now());
        if !left.is_zero() {
            std::thread::sleep(left);
        }
        while !self.advance(Instant::now()) {
            std::thread::sleep(self.remaining(Instant::now()));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/clock.rs"]
mod tests;
