use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::{FromRow, MySqlPool};
use tracing::debug;

use crate::model::attendance::{AttendanceEntry, AttendanceRecord, AttendanceStatus, UserSummary};
use crate::model::office::Office;
use crate::store::{OfficeDirectory, RecordFilter, RecordStore, StoreError, StoreResult};

/// MySQL reports unique and foreign key violations under this SQLSTATE.
const INTEGRITY_CONSTRAINT_VIOLATION: &str = "23000";

const RECORD_COLUMNS: &str = "id, user_id, date, check_in_time, check_out_time, status";

#[derive(FromRow)]
struct AttendanceRow {
    id: u64,
    user_id: u64,
    date: NaiveDate,
    check_in_time: Option<NaiveDateTime>,
    check_out_time: Option<NaiveDateTime>,
    status: String,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let status = row.status.parse::<AttendanceStatus>().map_err(|_| {
            StoreError::InvalidData(format!(
                "attendance {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;

        Ok(AttendanceRecord {
            id: row.id,
            user_id: row.user_id,
            date: row.date,
            check_in_time: row.check_in_time,
            check_out_time: row.check_out_time,
            status,
        })
    }
}

/// Attendance row left-joined with `users`; the `u_` columns are null when
/// the account is gone.
#[derive(FromRow)]
struct AttendanceEntryRow {
    #[sqlx(flatten)]
    record: AttendanceRow,
    u_id: Option<u64>,
    u_username: Option<String>,
    u_name: Option<String>,
    u_employee_code: Option<String>,
    u_office_id: Option<u64>,
}

impl TryFrom<AttendanceEntryRow> for AttendanceEntry {
    type Error = StoreError;

    fn try_from(row: AttendanceEntryRow) -> Result<Self, Self::Error> {
        let user = match (row.u_id, row.u_username, row.u_name) {
            (Some(id), Some(username), Some(name)) => Some(UserSummary {
                id,
                username,
                name,
                employee_code: row.u_employee_code,
                office_id: row.u_office_id,
            }),
            _ => None,
        };

        Ok(AttendanceEntry {
            record: row.record.try_into()?,
            user,
        })
    }
}

fn into_records(rows: Vec<AttendanceRow>) -> StoreResult<Vec<AttendanceRecord>> {
    rows.into_iter().map(AttendanceRecord::try_from).collect()
}

fn is_constraint_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some(INTEGRITY_CONSTRAINT_VIOLATION)
        }
        _ => false,
    }
}

#[derive(Clone)]
pub struct MySqlRecordStore {
    pool: MySqlPool,
}

impl MySqlRecordStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn fetch_by_id(&self, id: u64) -> StoreResult<AttendanceRecord> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM attendance WHERE id = ?");
        let row = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        row.try_into()
    }
}

#[async_trait]
impl RecordStore for MySqlRecordStore {
    async fn find_today_record(
        &self,
        user_id: u64,
        date: NaiveDate,
    ) -> StoreResult<Option<AttendanceRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM attendance WHERE user_id = ? AND date = ?");
        let row = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(user_id)
            .bind(date)
            .fetch_optional(&self.pool)
            .await?;

        row.map(AttendanceRecord::try_from).transpose()
    }

    async fn create_record(
        &self,
        user_id: u64,
        date: NaiveDate,
        check_in_time: NaiveDateTime,
        status: AttendanceStatus,
    ) -> StoreResult<AttendanceRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (user_id, date, check_in_time, status)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(check_in_time)
        .bind(status.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_constraint_violation(&e) {
                StoreError::Conflict(format!("record for user {user_id} on {date} already exists"))
            } else {
                StoreError::Database(e)
            }
        })?;

        let id = result.last_insert_id();
        debug!(id, user_id, %date, "Attendance record created");

        self.fetch_by_id(id).await
    }

    async fn update_record(
        &self,
        id: u64,
        check_out_time: NaiveDateTime,
        status: AttendanceStatus,
    ) -> StoreResult<AttendanceRecord> {
        let result = sqlx::query(
            r#"
            UPDATE attendance
            SET check_out_time = ?, status = ?
            WHERE id = ?
            AND check_out_time IS NULL
            "#,
        )
        .bind(check_out_time)
        .bind(status.to_string())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Conflict(format!(
                "attendance {id} is missing or already checked out"
            )));
        }

        self.fetch_by_id(id).await
    }

    async fn list_user_records(&self, user_id: u64) -> StoreResult<Vec<AttendanceRecord>> {
        let sql = format!(
            "SELECT {RECORD_COLUMNS} FROM attendance WHERE user_id = ? ORDER BY date DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, AttendanceRow>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        into_records(rows)
    }

    async fn list_records(&self, filter: &RecordFilter) -> StoreResult<Vec<AttendanceEntry>> {
        // ---------- build WHERE clause dynamically ----------
        let mut conditions = Vec::new();
        if filter.status.is_some() {
            conditions.push("a.status = ?");
        }
        if filter.date.is_some() {
            conditions.push("a.date = ?");
        }

        let where_clause = if conditions.is_empty() {
            "".to_string()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let sql = format!(
            r#"
            SELECT a.id, a.user_id, a.date, a.check_in_time, a.check_out_time, a.status,
                   u.id AS u_id, u.username AS u_username, u.name AS u_name,
                   u.employee_code AS u_employee_code, u.office_id AS u_office_id
            FROM attendance a
            LEFT JOIN users u ON u.id = a.user_id
            {where_clause}
            ORDER BY a.date DESC, a.id DESC
            "#
        );
        debug!(sql = %sql, ?filter, "Listing attendance");

        let mut query = sqlx::query_as::<_, AttendanceEntryRow>(&sql);
        if let Some(status) = filter.status {
            query = query.bind(status.to_string());
        }
        if let Some(date) = filter.date {
            query = query.bind(date);
        }

        query
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(AttendanceEntry::try_from)
            .collect()
    }
}

#[derive(Clone)]
pub struct MySqlOfficeDirectory {
    pool: MySqlPool,
}

impl MySqlOfficeDirectory {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfficeDirectory for MySqlOfficeDirectory {
    async fn get_office(&self, office_id: u64) -> StoreResult<Option<Office>> {
        let office = sqlx::query_as::<_, Office>(
            r#"
            SELECT id, name, latitude, longitude, check_in_time, check_out_time
            FROM offices
            WHERE id = ?
            "#,
        )
        .bind(office_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(office)
    }
}
