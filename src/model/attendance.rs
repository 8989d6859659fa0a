use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Daily attendance classification.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, Display, EnumString, ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Late,
    HalfDay,
    /// Only written by an end-of-day sweep, never by scan processing.
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "id": 1,
    "userId": 42,
    "date": "2026-01-05",
    "checkInTime": "2026-01-05T09:15:00",
    "checkOutTime": null,
    "status": "late"
}))]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 42)]
    pub user_id: u64,

    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "2026-01-05T09:15:00", value_type = Option<String>, format = "date-time")]
    pub check_in_time: Option<NaiveDateTime>,

    #[schema(example = "2026-01-05T17:02:00", value_type = Option<String>, format = "date-time")]
    pub check_out_time: Option<NaiveDateTime>,

    pub status: AttendanceStatus,
}

impl AttendanceRecord {
    pub fn is_checked_out(&self) -> bool {
        self.check_out_time.is_some()
    }
}

/// Public profile of the employee a record belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[schema(example = 42)]
    pub id: u64,
    #[schema(example = "emp042")]
    pub username: String,
    #[schema(example = "Rahim Uddin")]
    pub name: String,
    #[schema(example = "EMP-042")]
    pub employee_code: Option<String>,
    #[schema(example = 1)]
    pub office_id: Option<u64>,
}

/// Row of the HR/Admin listing. `user` is null when the account no longer
/// exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceEntry {
    #[serde(flatten)]
    pub record: AttendanceRecord,
    pub user: Option<UserSummary>,
}
