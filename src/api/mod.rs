pub mod notification;
pub mod questionnaire;
pub mod resignation;

use actix_web::HttpResponse;
use serde_json::json;

use crate::error::WorkflowError;

/// Map a workflow failure to its HTTP response. Persistence failures are
/// logged and answered with a generic body.
pub(crate) fn workflow_error_response(err: WorkflowError) -> HttpResponse {
    match err {
        WorkflowError::Validation(message) => {
            HttpResponse::BadRequest().json(json!({ "message": message }))
        }
        WorkflowError::NotFound(resource) => {
            HttpResponse::NotFound().json(json!({ "message": format!("{resource} not found") }))
        }
        WorkflowError::InvalidState(message) => {
            HttpResponse::Conflict().json(json!({ "message": message }))
        }
        WorkflowError::Persistence(e) => {
            tracing::error!(error = %e, "Workflow persistence failure");
            HttpResponse::InternalServerError().json(json!({
                "message": "Internal Server Error"
            }))
        }
    }
}
