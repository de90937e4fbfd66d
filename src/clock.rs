use chrono::Utc;

use crate::types::Millis;

/// Source of the current instant for the tracker. Swapped for a manual clock in tests.
pub trait Clock {
    fn now_ms(&self) -> Millis;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> Millis {
        Utc::now().timestamp_millis()
    }
}

#[cfg(test)]
pub use manual::ManualClock;
