/// Cancellable timers polled from the main loop.
///
/// Nothing runs on another thread: the owner calls `poll(now)` once per
/// tick and reacts when it returns `true`. A cancelled timer never fires
/// again. Both kinds are owned by the view that created them and are
/// cancelled with it.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerState {
    Pending,
    Fired,
    Cancelled,
}

/// One-shot timer firing once at `start + delay`.
#[derive(Clone, Debug)]
pub struct Deferred {
    due: Instant,
    state: TimerState,
}

impl Deferred {
    pub fn new(start: Instant, delay: Duration) -> Self {
        Deferred { due: start + delay, state: TimerState::Pending }
    }

    /// `true` exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state == TimerState::Pending && now >= self.due {
            self.state = TimerState::Fired;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        if self.state == TimerState::Pending {
            self.state = TimerState::Cancelled;
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_pending(&self) -> bool {
        self.state == TimerState::Pending
    }
}

/// Fixed-cadence timer. After a stall it fires once and re-anchors
/// instead of replaying every missed period.
#[derive(Clone, Debug)]
pub struct Repeating {
    period: Duration,
    next: Instant,
    cancelled: bool,
}

impl Repeating {
    /// First fire happens immediately at `start`.
    pub fn new(start: Instant, period: Duration) -> Self {
        Repeating { period, next: start, cancelled: false }
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next {
            return false;
        }
        self.next += self.period;
        if self.next <= now {
            self.next = now + self.period;
        }
        true
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[allow(dead_code)]
    pub fn is_active(&self) -> bool {
        !self.cancelled
    }

    #[allow(dead_code)]
    pub fn period(&self) -> Duration {
        self.period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn deferred_fires_once_at_deadline() {
        let t0 = Instant::now();
        let mut d = Deferred::new(t0, 100 * MS);
        assert!(!d.poll(t0));
        assert!(!d.poll(t0 + 99 * MS));
        assert!(d.poll(t0 + 100 * MS));
        assert!(!d.poll(t0 + 200 * MS));
        assert_eq!(d.state(), TimerState::Fired);
    }

    #[test]
    fn cancelled_deferred_never_fires() {
        let t0 = Instant::now();
        let mut d = Deferred::new(t0, 10 * MS);
        d.cancel();
        assert!(!d.poll(t0 + 1000 * MS));
        assert_eq!(d.state(), TimerState::Cancelled);
    }

    #[test]
    fn cancel_after_fire_keeps_fired_state() {
        let t0 = Instant::now();
        let mut d = Deferred::new(t0, Duration::ZERO);
        assert!(d.poll(t0));
        d.cancel();
        assert_eq!(d.state(), TimerState::Fired);
    }

    #[test]
    fn repeating_fires_each_period() {
        let t0 = Instant::now();
        let mut r = Repeating::new(t0, 220 * MS);
        assert!(r.poll(t0));
        assert!(!r.poll(t0 + 100 * MS));
        assert!(r.poll(t0 + 220 * MS));
        assert!(!r.poll(t0 + 300 * MS));
        assert!(r.poll(t0 + 440 * MS));
    }

    #[test]
    fn repeating_does_not_burst_after_stall() {
        let t0 = Instant::now();
        let mut r = Repeating::new(t0, 10 * MS);
        assert!(r.poll(t0));
        assert!(r.poll(t0 + 1000 * MS));
        assert!(!r.poll(t0 + 1005 * MS));
        assert!(r.poll(t0 + 1010 * MS));
    }

    #[test]
    fn cancelled_repeating_stops() {
        let t0 = Instant::now();
        let mut r = Repeating::new(t0, 10 * MS);
        r.cancel();
        assert!(!r.is_active());
        assert!(!r.poll(t0 + 50 * MS));
    }
}
