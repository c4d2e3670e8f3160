use crate::api::questionnaire::{ExitResponseView, SubmitResponses};
use crate::api::resignation::{ConcludeResignation, ResignationWithEmployee, SubmitResignation};
use crate::model::exit_questionnaire::QuestionnaireAnswer;
use crate::model::notification::Notification;
use crate::model::resignation::{Resignation, ResignationStatus};
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Offboard API",
        version = "1.0.0",
        description = r#"
## Employee Resignation & Offboarding Service

This API manages the resignation lifecycle of an organization's employees.

### 🔹 Key Features
- **Resignation Workflow**
  - Submit a resignation with a proposed last working day
  - Weekend and public-holiday validation of the last working day
  - Admin approval/rejection, applied exactly once
- **Exit Questionnaire**
  - Collected after a resignation is approved
- **Notifications**
  - Employees are notified of every decision; unread listing and acknowledgement

### 🔐 Security
Most endpoints are protected using **JWT Bearer authentication**.
Admin-only operations require the **Admin** role.

### 📦 Response Format
- JSON-based RESTful responses

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::resignation::submit_resignation,
        crate::api::resignation::resignation_status,
        crate::api::resignation::list_resignations,
        crate::api::resignation::conclude_resignation,

        crate::api::questionnaire::submit_responses,
        crate::api::questionnaire::list_exit_responses,

        crate::api::notification::list_notifications,
        crate::api::notification::mark_notification_read
    ),
    components(
        schemas(
            Resignation,
            ResignationStatus,
            ResignationWithEmployee,
            SubmitResignation,
            ConcludeResignation,
            QuestionnaireAnswer,
            SubmitResponses,
            ExitResponseView,
            Notification
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Resignation", description = "Resignation workflow APIs"),
        (name = "Questionnaire", description = "Exit questionnaire APIs"),
        (name = "Notification", description = "Notification APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
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
