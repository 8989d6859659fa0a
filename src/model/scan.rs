use chrono::NaiveDateTime;

use crate::model::office::Coordinate;

/// A single location-stamped attendance event. Consumed once by the scan
/// processor and never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScanEvent {
    pub user_id: u64,
    pub office_id: u64,
    pub latitude: f64,
    pub longitude: f64,
    /// Local wall-clock time the scan was received.
    pub scanned_at: NaiveDateTime,
}

impl ScanEvent {
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
