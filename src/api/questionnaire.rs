use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{MySqlPool, prelude::FromRow};
use utoipa::ToSchema;

use crate::api::workflow_error_response;
use crate::auth::auth::AuthUser;
use crate::model::exit_questionnaire::QuestionnaireAnswer;
use crate::workflow::questionnaire;

#[derive(Deserialize, ToSchema)]
pub struct SubmitResponses {
    pub responses: Vec<QuestionnaireAnswer>,
}

#[derive(FromRow)]
struct ExitResponseRow {
    id: u64,
    employee_id: u64,
    username: String,
    responses: String,
    submitted_at: Option<DateTime<Utc>>,
}

/// Questionnaire submission joined with the employee's username, for the
/// admin listing.
#[derive(Serialize, ToSchema)]
pub struct ExitResponseView {
    #[schema(example = 3)]
    pub id: u64,
    #[schema(example = 42)]
    pub employee_id: u64,
    #[schema(example = "jdoe")]
    pub username: String,
    pub responses: Vec<QuestionnaireAnswer>,
    #[schema(example = "2026-08-05T10:00:00Z", value_type = Option<String>, format = "date-time")]
    pub submitted_at: Option<DateTime<Utc>>,
}

/* =========================
Submit exit questionnaire (employee)
========================= */
#[utoipa::path(
    post,
    path = "/api/user/responses",
    request_body(
        content = SubmitResponses,
        description = "Exit questionnaire answers",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Questionnaire recorded", body = Object, example = json!({
            "message": "Exit questionnaire submitted successfully"
        })),
        (status = 400, description = "Empty or incomplete answer list"),
        (status = 409, description = "Latest resignation is not approved"),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Questionnaire"
)]
pub async fn submit_responses(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<SubmitResponses>,
) -> actix_web::Result<impl Responder> {
    match questionnaire::submit(pool.get_ref(), auth.user_id, &payload.responses).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Exit questionnaire submitted successfully"
        }))),
        Err(err) => Ok(workflow_error_response(err)),
    }
}

/* =========================
List exit responses (admin)
========================= */
#[utoipa::path(
    get,
    path = "/api/admin/exit_responses",
    responses(
        (status = 200, description = "All questionnaire submissions, newest first", body = Object, example = json!({
            "data": [{
                "id": 3,
                "employee_id": 42,
                "username": "jdoe",
                "responses": [{
                    "questionText": "What is your primary reason for leaving?",
                    "response": "Relocating to another city."
                }],
                "submitted_at": "2026-08-05T10:00:00Z"
            }]
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Questionnaire"
)]
pub async fn list_exit_responses(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let rows = sqlx::query_as::<_, ExitResponseRow>(
        r#"
        SELECT e.id, e.employee_id, u.username, e.responses, e.submitted_at
        FROM exit_responses e
        JOIN users u ON u.id = e.employee_id
        ORDER BY e.submitted_at DESC, e.id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch exit responses");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    let data: Vec<ExitResponseView> = rows
        .into_iter()
        .map(|row| {
            let responses = serde_json::from_str(&row.responses).unwrap_or_else(|e| {
                tracing::warn!(error = %e, response_id = row.id, "Stored responses failed to parse");
                Vec::new()
            });

            ExitResponseView {
                id: row.id,
                employee_id: row.employee_id,
                username: row.username,
                responses,
                submitted_at: row.submitted_at,
            }
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "data": data
    })))
}
