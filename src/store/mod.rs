use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

use crate::model::attendance::{AttendanceEntry, AttendanceRecord, AttendanceStatus};
use crate::model::office::Office;

#[cfg(test)]
pub mod memory;
pub mod mysql;
pub mod office_cache;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A conditional write lost a race (duplicate day record, or the record
    /// was already checked out).
    #[error("write conflict: {0}")]
    Conflict(String),

    #[error("invalid stored value: {0}")]
    InvalidData(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Filter for the attendance listing. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub status: Option<AttendanceStatus>,
    pub date: Option<NaiveDate>,
}

/// Persistence of daily attendance records. At most one record exists per
/// (user, date); implementations reject writes that would break that.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn find_today_record(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>>;

    /// Fails with `StoreError::Conflict` if a record for (user, date) exists.
    async fn create_record(
        &self,
        user_id: u64,
        date: NaiveDate,
        check_in_time: NaiveDateTime,
        status: AttendanceStatus,
    ) -> StoreResult<AttendanceRecord>;

    /// Fails with `StoreError::Conflict` unless the record is still open
    /// (no check-out yet).
    async fn update_record(
        &self,
        id: u64,
        check_out_time: NaiveDateTime,
        status: AttendanceStatus,
    ) -> StoreResult<AttendanceRecord>;

    /// Newest date first.
    async fn list_user_records(&self, user_id: u64) -> StoreResult<Vec<AttendanceRecord>>;

    /// Newest date first, each record joined with its owner's public profile.
    async fn list_records(&self, filter: &RecordFilter) -> StoreResult<Vec<AttendanceEntry>>;
}

#[async_trait]
pub trait OfficeDirectory: Send + Sync {
    async fn get_office(&self, office_id: u64) -> StoreResult<Option<Office>>;
}
