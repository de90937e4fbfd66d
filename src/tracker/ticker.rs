use tracing::trace;

use crate::types::Millis;

/// A cancellable periodic schedule, polled by the event loop.
#[derive(Debug)]
pub struct Ticker {
    period: Millis,
    next_due: Option<Millis>,
}

impl Ticker {
    pub fn new(period: Millis) -> Self {
        Self {
            period: period.max(1),
            next_due: None,
        }
    }

    pub fn schedule(&mut self, now: Millis) {
        self.next_due = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// True when a period has elapsed. A late poll fires once and reschedules from `now`.
    pub fn poll(&mut self, now: Millis) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                let next = if now - due >= self.period {
                    now + self.period
                } else {
                    due + self.period
                };
                trace!(due, next, "Ticker fired");
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_per_period() {
        let mut ticker = Ticker::new(1_000);
        ticker.schedule(0);
        assert!(!ticker.poll(250));
        assert!(!ticker.poll(999));
        assert!(ticker.poll(1_000));
        assert!(!ticker.poll(1_250));
        assert!(ticker.poll(2_100));
        assert!(ticker.poll(3_000));
    }

    #[test]
    fn late_poll_does_not_burst() {
        let mut ticker = Ticker::new(1_000);
        ticker.schedule(0);
        assert!(ticker.poll(5_500));
        assert!(!ticker.poll(5_600));
        assert!(ticker.poll(6_500));
    }

    #[test]
    fn cancelled_ticker_never_fires() {
        let mut ticker = Ticker::new(1_000);
        assert!(!ticker.poll(10_000));
        ticker.schedule(0);
        ticker.cancel();
        assert!(!ticker.is_active());
        assert!(!ticker.poll(10_000));
    }
}
