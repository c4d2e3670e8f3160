use actix_web::{HttpResponse, Responder, web};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{MySqlPool, prelude::FromRow};
use utoipa::ToSchema;

use crate::api::workflow_error_response;
use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::holiday::CalendarificClient;
use crate::model::resignation::ResignationStatus;
use crate::workflow::lifecycle;

#[derive(Deserialize, ToSchema)]
pub struct SubmitResignation {
    /// Proposed last working day
    #[schema(example = "2026-09-15", format = "date", value_type = String)]
    pub lwd: NaiveDate,
}

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConcludeResignation {
    #[schema(example = 1)]
    pub resignation_id: u64,
    #[schema(example = true)]
    pub approved: bool,
    /// Approved last working day; required when `approved` is true
    #[schema(example = "2026-09-15", format = "date", value_type = Option<String>)]
    pub lwd: Option<NaiveDate>,
}

/// Resignation row joined with the submitting employee's identity, for the
/// admin listing.
#[derive(Serialize, FromRow, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "employee_id": 42,
    "username": "jdoe",
    "email": "jdoe@company.com",
    "requested_lwd": "2026-09-15",
    "approved_lwd": null,
    "status": "pending",
    "created_at": "2026-08-01T09:30:00Z"
}))]
pub struct ResignationWithEmployee {
    pub id: u64,
    pub employee_id: u64,
    #[schema(example = "jdoe")]
    pub username: String,
    #[schema(example = "jdoe@company.com")]
    pub email: String,
    #[schema(example = "2026-09-15", value_type = String, format = "date")]
    pub requested_lwd: NaiveDate,
    #[schema(example = "2026-09-15", value_type = Option<String>, format = "date", nullable = true)]
    pub approved_lwd: Option<NaiveDate>,
    #[schema(example = "pending")]
    pub status: ResignationStatus,
    #[schema(example = "2026-08-01T09:30:00Z", value_type = Option<String>, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

/* =========================
Submit resignation (employee)
========================= */
#[utoipa::path(
    post,
    path = "/api/user/resignation",
    request_body(
        content = SubmitResignation,
        description = "Proposed last working day",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Resignation submitted", body = Object, example = json!({
            "resignation": { "id": 1 }
        })),
        (status = 400, description = "Last working day falls on a weekend or holiday", body = Object, example = json!({
            "message": "Last working day cannot be on a weekend"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Resignation"
)]
pub async fn submit_resignation(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    oracle: web::Data<CalendarificClient>,
    config: web::Data<Config>,
    payload: web::Json<SubmitResignation>,
) -> actix_web::Result<impl Responder> {
    let outcome = lifecycle::submit(
        pool.get_ref(),
        oracle.get_ref(),
        auth.user_id,
        payload.lwd,
        &config.holiday_country,
    )
    .await;

    match outcome {
        Ok(id) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "resignation": { "id": id }
        }))),
        Err(err) => Ok(workflow_error_response(err)),
    }
}

/* =========================
Resignation status (employee)
========================= */
#[utoipa::path(
    get,
    path = "/api/user/resignation_status",
    responses(
        (status = 200, description = "Most recent resignation for the caller, or null", body = Object, example = json!({
            "resignation": {
                "id": 1,
                "employee_id": 42,
                "requested_lwd": "2026-09-15",
                "approved_lwd": null,
                "status": "pending",
                "created_at": "2026-08-01T09:30:00Z"
            }
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Resignation"
)]
pub async fn resignation_status(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let resignation = lifecycle::latest_for_employee(pool.get_ref(), auth.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = auth.user_id, "Failed to fetch resignation status");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "resignation": resignation
    })))
}

/* =========================
List resignations (admin)
========================= */
#[utoipa::path(
    get,
    path = "/api/admin/resignations",
    responses(
        (status = 200, description = "All resignations, newest first", body = Object, example = json!({
            "data": [{
                "id": 1,
                "employee_id": 42,
                "username": "jdoe",
                "email": "jdoe@company.com",
                "requested_lwd": "2026-09-15",
                "approved_lwd": null,
                "status": "pending",
                "created_at": "2026-08-01T09:30:00Z"
            }]
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Resignation"
)]
pub async fn list_resignations(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let resignations = sqlx::query_as::<_, ResignationWithEmployee>(
        r#"
        SELECT r.id, r.employee_id, u.username, u.email,
               r.requested_lwd, r.approved_lwd, r.status, r.created_at
        FROM resignations r
        JOIN users u ON u.id = r.employee_id
        ORDER BY r.created_at DESC, r.id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to fetch resignation list");
        actix_web::error::ErrorInternalServerError("Internal Server Error")
    })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "data": resignations
    })))
}

/* =========================
Conclude resignation (admin)
========================= */
#[utoipa::path(
    put,
    path = "/api/admin/conclude_resignation",
    request_body(
        content = ConcludeResignation,
        description = "Decision payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Resignation concluded", body = Object, example = json!({
            "message": "Resignation updated successfully"
        })),
        (status = 400, description = "Approved without a last working day"),
        (status = 404, description = "Resignation not found", body = Object, example = json!({
            "message": "Resignation not found"
        })),
        (status = 409, description = "Resignation already concluded", body = Object, example = json!({
            "message": "Resignation has already been concluded"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Resignation"
)]
pub async fn conclude_resignation(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<ConcludeResignation>,
) -> actix_web::Result<impl Responder> {
    auth.require_admin()?;

    let outcome = lifecycle::conclude(
        pool.get_ref(),
        payload.resignation_id,
        payload.approved,
        payload.lwd,
    )
    .await;

    match outcome {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Resignation updated successfully"
        }))),
        Err(err) => Ok(workflow_error_response(err)),
    }
}
