use anyhow::{Result, bail};
use tracing::info;

use crate::types::{LiveSession, Millis};

/// Whether a timer is running, and against what.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Running { category: String, started_at: Millis },
}

/// A session that was just stopped, ready for the commit policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EndedSession {
    pub category: String,
    pub start: Millis,
    pub end: Millis,
}

/// The running-session state machine. Also carries the chart refresh throttle, which is
/// scoped to a single session.
#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
    last_chart_refresh: Option<Millis>,
}

impl Session {
    pub fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running { .. })
    }

    pub fn category(&self) -> Option<&str> {
        match &self.state {
            SessionState::Running { category, .. } => Some(category),
            SessionState::Idle => None,
        }
    }

    /// Idle -> Running. Refused for an empty category or when a session is already running.
    pub fn start(&mut self, category: &str, now: Millis) -> Result<()> {
        if self.is_running() {
            bail!("A session is already running.");
        }
        if category.trim().is_empty() {
            bail!("Please select a category before starting the timer.");
        }
        self.state = SessionState::Running {
            category: category.to_string(),
            started_at: now,
        };
        self.last_chart_refresh = None;
        info!(category, started_at = now, "Session started");
        Ok(())
    }

    /// Running -> Idle. Returns the ended session, or `None` if nothing was running.
    pub fn stop(&mut self, now: Millis) -> Option<EndedSession> {
        let SessionState::Running {
            category,
            started_at,
        } = std::mem::take(&mut self.state)
        else {
            return None;
        };
        self.last_chart_refresh = None;
        info!(%category, elapsed = now - started_at, "Session stopped");
        Some(EndedSession {
            category,
            start: started_at,
            end: now,
        })
    }

    pub fn elapsed(&self, now: Millis) -> Option<Millis> {
        match &self.state {
            SessionState::Running { started_at, .. } => Some((now - started_at).max(0)),
            SessionState::Idle => None,
        }
    }

    /// The in-progress session as an unpersisted pseudo-entry for live aggregation.
    pub fn live(&self, now: Millis) -> Option<LiveSession<'_>> {
        match &self.state {
            SessionState::Running {
                category,
                started_at,
            } => Some(LiveSession {
                category,
                elapsed: (now - started_at).max(0),
            }),
            SessionState::Idle => None,
        }
    }

    /// Consumes the throttle: true at most once per `interval`, and always on the first
    /// call of a session.
    pub fn take_chart_refresh(&mut self, now: Millis, interval: Millis) -> bool {
        let (fire, last) = throttle(self.last_chart_refresh, now, interval);
        self.last_chart_refresh = last;
        fire
    }
}

/// `(last refresh, now, interval) -> (refresh now?, new last refresh)`.
/// `None` means nothing has been refreshed yet, which always fires.
pub fn throttle(last: Option<Millis>, now: Millis, interval: Millis) -> (bool, Option<Millis>) {
    match last {
        Some(last) if now - last < interval => (false, Some(last)),
        _ => (true, Some(now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_then_stop_yields_the_session() {
        let mut session = Session::default();
        session.start("Reading", 0).unwrap();
        assert!(session.is_running());
        assert_eq!(session.category(), Some("Reading"));
        assert_eq!(session.elapsed(1_500), Some(1_500));

        let ended = session.stop(1_500).unwrap();
        assert_eq!(
            ended,
            EndedSession {
                category: "Reading".into(),
                start: 0,
                end: 1_500
            }
        );
        assert!(!session.is_running());
        assert_eq!(session.category(), None);
    }

    #[test]
    fn empty_category_is_refused() {
        let mut session = Session::default();
        assert!(session.start("", 10).is_err());
        assert!(session.start("   ", 10).is_err());
        assert!(!session.is_running());
    }

    #[test]
    fn no_nested_sessions() {
        let mut session = Session::default();
        session.start("Work", 10).unwrap();
        assert!(session.start("Play", 20).is_err());
        assert_eq!(session.category(), Some("Work"));
    }

    #[test]
    fn double_stop_yields_nothing() {
        let mut session = Session::default();
        session.start("Work", 10).unwrap();
        assert!(session.stop(2_000).is_some());
        assert_eq!(session.stop(3_000), None);
    }

    #[test]
    fn live_session_reports_elapsed() {
        let mut session = Session::default();
        assert_eq!(session.live(100), None);
        session.start("Work", 0).unwrap();
        assert_eq!(
            session.live(2_000),
            Some(LiveSession {
                category: "Work",
                elapsed: 2_000
            })
        );
    }

    #[test]
    fn throttle_fires_first_then_once_per_interval() {
        assert_eq!(throttle(None, 5, 1_000), (true, Some(5)));
        assert_eq!(throttle(Some(5), 999, 1_000), (false, Some(5)));
        assert_eq!(throttle(Some(5), 1_005, 1_000), (true, Some(1_005)));
        assert_eq!(throttle(Some(5), 4_000, 1_000), (true, Some(4_000)));
    }

    #[test]
    fn throttle_resets_with_each_session() {
        let mut session = Session::default();
        session.start("Work", 0).unwrap();
        assert!(session.take_chart_refresh(0, 1_000));
        assert!(!session.take_chart_refresh(500, 1_000));
        session.stop(600);

        session.start("Work", 700).unwrap();
        assert!(session.take_chart_refresh(700, 1_000));
    }
}
