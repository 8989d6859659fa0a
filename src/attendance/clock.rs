use chrono::{Local, NaiveDateTime};
use std::sync::Arc;

/// Source of the wall-clock time stamped on each scan. The date half keys the
/// day's record and the time half drives classification, so both come from
/// the same reading.
#[derive(Clone)]
pub struct ScanClock(Arc<dyn Fn() -> NaiveDateTime + Send + Sync>);

impl ScanClock {
    pub fn new(now: impl Fn() -> NaiveDateTime + Send + Sync + 'static) -> Self {
        Self(Arc::new(now))
    }

    /// Server local time.
    pub fn local() -> Self {
        Self::new(|| Local::now().naive_local())
    }

    pub fn now(&self) -> NaiveDateTime {
        (self.0)()
    }
}
