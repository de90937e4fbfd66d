use serde::{Deserialize, Serialize};

pub type EntryId = String;

/// Milliseconds since the Unix epoch, or a span of milliseconds.
pub type Millis = i64;

pub const MS_IN_SECOND: Millis = 1_000;
pub const MS_IN_HOUR: Millis = 3_600_000;

///A committed record of one finished timed session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: EntryId,
    #[serde(default)]
    pub category: String,
    pub start: Millis,
    pub end: Millis,
    pub duration: Millis,
}

/// The running session as seen by aggregation: a category and its elapsed time so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LiveSession<'a> {
    pub category: &'a str,
    pub elapsed: Millis,
}
