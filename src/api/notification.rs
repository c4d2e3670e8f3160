use actix_web::{HttpResponse, Responder, web};
use sqlx::MySqlPool;

use crate::api::workflow_error_response;
use crate::auth::auth::AuthUser;
use crate::workflow::notifier;

/* =========================
Unread notifications (recipient)
========================= */
#[utoipa::path(
    get,
    path = "/api/user/notifications",
    responses(
        (status = 200, description = "Unread notifications, newest first", body = Object, example = json!({
            "notifications": [{
                "id": 7,
                "user_id": 42,
                "title": "Resignation Approved",
                "message": "Your resignation has been approved. Last working day: 2026-09-15",
                "is_read": false,
                "created_at": "2026-08-02T14:00:00Z"
            }]
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notification"
)]
pub async fn list_notifications(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
) -> actix_web::Result<impl Responder> {
    let notifications = notifier::list_unread(pool.get_ref(), auth.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = auth.user_id, "Failed to fetch notifications");
            actix_web::error::ErrorInternalServerError("Internal Server Error")
        })?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "notifications": notifications
    })))
}

/* =========================
Mark notification read (recipient)
========================= */
#[utoipa::path(
    patch,
    path = "/api/user/notifications/{id}/read",
    params(
        ("id" = u64, Path, description = "ID of the notification to acknowledge")
    ),
    responses(
        (status = 200, description = "Notification marked as read (idempotent)", body = Object, example = json!({
            "message": "Notification marked as read"
        })),
        (status = 404, description = "Notification not found", body = Object, example = json!({
            "message": "Notification not found"
        })),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Notification"
)]
pub async fn mark_notification_read(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    let notification_id = path.into_inner();

    match notifier::mark_read(pool.get_ref(), notification_id, auth.user_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "message": "Notification marked as read"
        }))),
        Err(err) => Ok(workflow_error_response(err)),
    }
}
