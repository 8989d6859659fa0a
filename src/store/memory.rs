use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::model::attendance::{AttendanceEntry, AttendanceRecord, AttendanceStatus, UserSummary};
use crate::model::office::Office;
use crate::store::{OfficeDirectory, RecordFilter, RecordStore, StoreError, StoreResult};

/// Vec-backed record store with the same conditional-write rules as the MySQL
/// store. Reads yield to the scheduler so concurrent callers interleave.
#[derive(Default)]
pub struct InMemoryRecordStore {
    records: Mutex<Vec<AttendanceRecord>>,
    users: HashMap<u64, UserSummary>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<AttendanceRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            users: HashMap::new(),
        }
    }

    pub fn with_users(mut self, users: Vec<UserSummary>) -> Self {
        self.users = users.into_iter().map(|u| (u.id, u)).collect();
        self
    }

    pub fn snapshot(&self) -> Vec<AttendanceRecord> {
        self.records.lock().unwrap().clone()
    }

    fn sorted_newest_first(mut records: Vec<AttendanceRecord>) -> Vec<AttendanceRecord> {
        records.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        records
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn find_today_record(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let found = self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.user_id == user_id && r.date == date)
            .cloned();

        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn create_record(
        &self,
        user_id: u64,
        date: NaiveDate,
        check_in_time: NaiveDateTime,
        status: AttendanceStatus,
    ) -> StoreResult<AttendanceRecord> {
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|r| r.user_id == user_id && r.date == date) {
            return Err(StoreError::Conflict(format!(
                "record for user {user_id} on {date} already exists"
            )));
        }

        let record = AttendanceRecord {
            id: records.iter().map(|r| r.id).max().unwrap_or(0) + 1,
            user_id,
            date,
            check_in_time: Some(check_in_time),
            check_out_time: None,
            status,
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn update_record(
        &self,
        id: u64,
        check_out_time: NaiveDateTime,
        status: AttendanceStatus,
    ) -> StoreResult<AttendanceRecord> {
        let mut records = self.records.lock().unwrap();
        match records.iter_mut().find(|r| r.id == id) {
            Some(record) if record.check_out_time.is_none() => {
                record.check_out_time = Some(check_out_time);
                record.status = status;
                Ok(record.clone())
            }
            _ => Err(StoreError::Conflict(format!(
                "attendance {id} is missing or already checked out"
            ))),
        }
    }

    async fn list_user_records(&self, user_id: u64) -> StoreResult<Vec<AttendanceRecord>> {
        let records = self
            .snapshot()
            .into_iter()
            .filter(|r| r.user_id == user_id)
            .collect();
        Ok(Self::sorted_newest_first(records))
    }

    async fn list_records(&self, filter: &RecordFilter) -> StoreResult<Vec<AttendanceEntry>> {
        let records = self
            .snapshot()
            .into_iter()
            .filter(|r| matches_filter(filter, r))
            .collect();

        Ok(Self::sorted_newest_first(records)
            .into_iter()
            .map(|record| AttendanceEntry {
                user: self.users.get(&record.user_id).cloned(),
                record,
            })
            .collect())
    }
}

fn matches_filter(filter: &RecordFilter, record: &AttendanceRecord) -> bool {
    filter.status.is_none_or(|s| s == record.status) && filter.date.is_none_or(|d| d == record.date)
}

pub struct InMemoryOfficeDirectory {
    offices: HashMap<u64, Office>,
}

impl InMemoryOfficeDirectory {
    pub fn new(offices: Vec<Office>) -> Self {
        Self {
            offices: offices.into_iter().map(|o| (o.id, o)).collect(),
        }
    }
}

#[async_trait]
impl OfficeDirectory for InMemoryOfficeDirectory {
    async fn get_office(&self, office_id: u64) -> StoreResult<Option<Office>> {
        Ok(self.offices.get(&office_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn second_create_for_same_day_conflicts() {
        let store = InMemoryRecordStore::new();
        let date = at(2, 9, 0).date();

        store
            .create_record(1, date, at(2, 9, 0), AttendanceStatus::Present)
            .await
            .unwrap();
        let err = store
            .create_record(1, date, at(2, 9, 5), AttendanceStatus::Late)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn closed_record_cannot_be_updated_again() {
        let store = InMemoryRecordStore::new();
        let created = store
            .create_record(1, at(2, 9, 0).date(), at(2, 9, 0), AttendanceStatus::Present)
            .await
            .unwrap();

        store
            .update_record(created.id, at(2, 17, 0), AttendanceStatus::Present)
            .await
            .unwrap();
        let err = store
            .update_record(created.id, at(2, 18, 0), AttendanceStatus::HalfDay)
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::Conflict(_)));
        assert_eq!(store.snapshot()[0].check_out_time, Some(at(2, 17, 0)));
    }

    #[tokio::test]
    async fn listings_are_filtered_and_newest_first() {
        let store = InMemoryRecordStore::new().with_users(vec![UserSummary {
            id: 1,
            username: "emp001".to_string(),
            name: "Ayesha".to_string(),
            employee_code: Some("EMP-001".to_string()),
            office_id: Some(1),
        }]);
        store
            .create_record(1, at(2, 9, 0).date(), at(2, 9, 0), AttendanceStatus::Present)
            .await
            .unwrap();
        store
            .create_record(1, at(3, 9, 30).date(), at(3, 9, 30), AttendanceStatus::Late)
            .await
            .unwrap();
        store
            .create_record(2, at(3, 8, 50).date(), at(3, 8, 50), AttendanceStatus::Present)
            .await
            .unwrap();

        let mine = store.list_user_records(1).await.unwrap();
        assert_eq!(
            mine.iter().map(|r| r.date).collect::<Vec<_>>(),
            vec![at(3, 0, 0).date(), at(2, 0, 0).date()]
        );

        let late = store
            .list_records(&RecordFilter {
                status: Some(AttendanceStatus::Late),
                date: None,
            })
            .await
            .unwrap();
        assert_eq!(late.len(), 1);
        assert_eq!(late[0].record.user_id, 1);
        assert_eq!(late[0].user.as_ref().map(|u| u.name.as_str()), Some("Ayesha"));

        let third = store
            .list_records(&RecordFilter {
                status: None,
                date: Some(at(3, 0, 0).date()),
            })
            .await
            .unwrap();
        assert_eq!(third.len(), 2);
        // user 2 has no account row
        assert!(third.iter().any(|e| e.record.user_id == 2 && e.user.is_none()));

        assert_eq!(store.list_records(&RecordFilter::default()).await.unwrap().len(), 3);
    }
}
