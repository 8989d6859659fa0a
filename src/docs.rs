use crate::api::attendance::ScanRequest;
use crate::model::attendance::{AttendanceEntry, AttendanceRecord, AttendanceStatus, UserSummary};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::openapi::server::Server;
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Geo Attendance API",
        version = "1.0.0",
        description = r#"
## Geofenced Attendance

Employees scan the code posted at their office. Each scan carries the device's
location and is accepted only within **50 m** of the office.

### 🔹 Daily lifecycle
- **First scan** checks in: `present`, or `late` after the office start time
- **Second scan** checks out: `half-day` when leaving before the office end time,
  otherwise the check-in status is kept
- **Third scan** is rejected

### 🔐 Security
All endpoints require a **JWT Bearer** access token. Listing everyone's
attendance is limited to **HR** and **Admin**.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::scan,
        crate::api::attendance::my_attendance,
        crate::api::attendance::list_attendance
    ),
    components(
        schemas(
            ScanRequest,
            AttendanceRecord,
            AttendanceEntry,
            AttendanceStatus,
            UserSummary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Attendance scan and history APIs"),
    )
)]
pub struct ApiDoc;

/// Paths are declared relative to the API scope; the configured prefix is
/// published as the server URL so the document follows `API_PREFIX`.
pub fn api_doc(api_prefix: &str) -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![Server::new(api_prefix)]);
    doc
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
