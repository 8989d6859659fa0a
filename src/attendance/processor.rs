use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::attendance::classifier::{classify_check_in, classify_check_out};
use crate::attendance::error::ScanError;
use crate::attendance::geofence::{GEOFENCE_RADIUS_METERS, distance_meters, is_within_range};
use crate::attendance::locks::ScanLocks;
use crate::model::attendance::{AttendanceRecord, AttendanceStatus};
use crate::model::scan::ScanEvent;
use crate::store::{OfficeDirectory, RecordStore, StoreError};

/// Where a user's record for one calendar day stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    NoRecord,
    CheckedIn(AttendanceStatus),
    CheckedOut(AttendanceStatus),
}

impl DayState {
    pub fn of(record: Option<&AttendanceRecord>) -> Self {
        match record {
            None => DayState::NoRecord,
            Some(r) if r.is_checked_out() => DayState::CheckedOut(r.status),
            Some(r) => DayState::CheckedIn(r.status),
        }
    }
}

/// Turns scans into attendance record transitions.
///
/// First scan of a day checks in, second checks out, anything after is
/// rejected. The office is resolved and the geofence checked before any
/// record is touched.
#[derive(Clone)]
pub struct ScanProcessor {
    records: Arc<dyn RecordStore>,
    offices: Arc<dyn OfficeDirectory>,
    locks: ScanLocks,
}

impl ScanProcessor {
    pub fn new(records: Arc<dyn RecordStore>, offices: Arc<dyn OfficeDirectory>) -> Self {
        Self {
            records,
            offices,
            locks: ScanLocks::new(),
        }
    }

    #[instrument(
        name = "process_scan",
        skip(self, scan),
        fields(user_id = scan.user_id, office_id = scan.office_id, date = %scan.scanned_at.date())
    )]
    pub async fn process_scan(&self, scan: ScanEvent) -> Result<AttendanceRecord, ScanError> {
        // Any resolvable office is accepted; the user's assigned office is not
        // consulted.
        let office = self
            .offices
            .get_office(scan.office_id)
            .await
            .map_err(store_failure)?
            .ok_or(ScanError::OfficeNotFound(scan.office_id))?;

        let distance = distance_meters(scan.position(), office.coordinate());
        if !is_within_range(distance, GEOFENCE_RADIUS_METERS) {
            info!(distance, "Scan rejected: outside geofence");
            return Err(ScanError::OutOfRange {
                distance_meters: distance.round() as u64,
            });
        }

        let date = scan.scanned_at.date();
        let now = scan.scanned_at.time();

        let _guard = self.locks.acquire(scan.user_id, date).await;

        let existing = self
            .records
            .find_today_record(scan.user_id, date)
            .await
            .map_err(store_failure)?;

        let result = match (DayState::of(existing.as_ref()), existing) {
            (DayState::NoRecord, _) => {
                let status = classify_check_in(now, office.check_in_time);
                self.records
                    .create_record(scan.user_id, date, scan.scanned_at, status)
                    .await
            }
            (DayState::CheckedIn(current), Some(record)) => {
                let status = classify_check_out(now, office.check_out_time, current);
                self.records
                    .update_record(record.id, scan.scanned_at, status)
                    .await
            }
            _ => {
                info!("Scan rejected: day already completed");
                return Err(ScanError::AlreadyCompleted);
            }
        };

        match result {
            Ok(record) => {
                info!(distance, record_id = record.id, status = %record.status, "Scan recorded");
                Ok(record)
            }
            Err(e) => Err(store_failure(e)),
        }
    }
}

fn store_failure(err: StoreError) -> ScanError {
    match &err {
        StoreError::Conflict(detail) => warn!(detail = %detail, "Scan lost a write race"),
        other => error!(error = %other, "Attendance store failure"),
    }
    err.into()
}
