use thiserror::Error;

use crate::attendance::geofence::GEOFENCE_RADIUS_METERS;
use crate::store::StoreError;

/// Outcome of a rejected scan. Everything except `StoreUnavailable` is an
/// expected business result the caller should render to the user.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Office not found")]
    OfficeNotFound(u64),

    #[error(
        "You are too far from the office ({distance_meters}m). You must be within {}m range.",
        GEOFENCE_RADIUS_METERS
    )]
    OutOfRange { distance_meters: u64 },

    #[error("You have already checked out for today.")]
    AlreadyCompleted,

    /// Another scan for the same user and day won the write. Safe to retry.
    #[error("Attendance was updated concurrently, please retry")]
    Conflict,

    #[error("Attendance store unavailable")]
    StoreUnavailable(#[source] StoreError),
}

impl ScanError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ScanError::Conflict)
    }
}

impl From<StoreError> for ScanError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict(_) => ScanError::Conflict,
            other => ScanError::StoreUnavailable(other),
        }
    }
}
