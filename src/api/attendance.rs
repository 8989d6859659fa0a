use crate::attendance::{ScanClock, ScanError, ScanProcessor};
use crate::auth::auth::AuthUser;
use crate::model::attendance::{AttendanceEntry, AttendanceRecord, AttendanceStatus};
use crate::model::scan::ScanEvent;
use crate::store::{RecordFilter, RecordStore};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, ResponseError, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, instrument};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
    #[schema(example = 1)]
    pub office_id: u64,
    #[schema(example = 23.8103)]
    pub latitude: f64,
    #[schema(example = 90.4125)]
    pub longitude: f64,
}

impl ScanRequest {
    fn has_valid_coordinates(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AttendanceFilter {
    /// Filter by attendance status
    pub status: Option<AttendanceStatus>,
    /// Filter by calendar date (YYYY-MM-DD)
    #[param(value_type = Option<String>, example = "2026-01-05")]
    pub date: Option<NaiveDate>,
}

impl ResponseError for ScanError {
    fn status_code(&self) -> StatusCode {
        match self {
            ScanError::OfficeNotFound(_) => StatusCode::NOT_FOUND,
            ScanError::OutOfRange { .. } | ScanError::AlreadyCompleted => StatusCode::BAD_REQUEST,
            ScanError::Conflict => StatusCode::CONFLICT,
            ScanError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ScanError::OutOfRange { distance_meters } => json!({
                "message": self.to_string(),
                "distance": distance_meters
            }),
            ScanError::Conflict => json!({
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }),
            _ => json!({ "message": self.to_string() }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

/// Scan endpoint: first scan of the day checks in, second checks out
#[utoipa::path(
    post,
    path = "/attendance/scan",
    request_body = ScanRequest,
    responses(
        (status = 200, description = "Scan recorded", body = AttendanceRecord),
        (status = 400, description = "Too far from the office, already checked out today, or invalid coordinates", body = Object, example = json!({
            "message": "You are too far from the office (80m). You must be within 50m range.",
            "distance": 80
        })),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Office not found", body = Object, example = json!({
            "message": "Office not found"
        })),
        (status = 409, description = "Concurrent scan for the same day, retry", body = Object, example = json!({
            "message": "Attendance was updated concurrently, please retry",
            "retryable": true
        })),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
#[instrument(
    name = "attendance_scan",
    skip(auth, processor, clock, payload),
    fields(user_id = auth.user_id, username = %auth.username, scan_id = %Uuid::new_v4())
)]
pub async fn scan(
    auth: AuthUser,
    processor: web::Data<ScanProcessor>,
    clock: web::Data<ScanClock>,
    payload: web::Json<ScanRequest>,
) -> Result<HttpResponse, ScanError> {
    if !payload.has_valid_coordinates() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "message": "Invalid coordinates"
        })));
    }

    let event = ScanEvent {
        user_id: auth.user_id,
        office_id: payload.office_id,
        latitude: payload.latitude,
        longitude: payload.longitude,
        scanned_at: clock.now(),
    };

    let record = processor.process_scan(event).await?;

    Ok(HttpResponse::Ok().json(record))
}

/// The caller's own attendance history
#[utoipa::path(
    get,
    path = "/attendance/me",
    responses(
        (status = 200, description = "Own attendance records, newest first", body = [AttendanceRecord]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn my_attendance(
    auth: AuthUser,
    records: web::Data<dyn RecordStore>,
) -> actix_web::Result<impl Responder> {
    let user_id = auth.user_id;

    let data = records.list_user_records(user_id).await.map_err(|e| {
        error!(error = %e, user_id, "Failed to fetch own attendance");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(data))
}

/// All attendance records (HR/Admin)
#[utoipa::path(
    get,
    path = "/attendance",
    params(AttendanceFilter),
    responses(
        (status = 200, description = "Attendance records with the employee's public profile, newest first", body = [AttendanceEntry]),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 500, description = "Internal server error")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Attendance"
)]
pub async fn list_attendance(
    auth: AuthUser,
    records: web::Data<dyn RecordStore>,
    query: web::Query<AttendanceFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let filter = RecordFilter {
        status: query.status,
        date: query.date,
    };

    let data = records.list_records(&filter).await.map_err(|e| {
        error!(error = %e, ?filter, "Failed to list attendance");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(data))
}
