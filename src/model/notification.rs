use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 7,
        "user_id": 42,
        "title": "Resignation Approved",
        "message": "Your resignation has been approved. Last working day: 2026-09-15",
        "is_read": false,
        "created_at": "2026-08-02T14:00:00Z"
    })
)]
pub struct Notification {
    #[schema(example = 7)]
    pub id: u64,

    #[schema(example = 42)]
    pub user_id: u64,

    #[schema(example = "Resignation Approved")]
    pub title: String,

    #[schema(example = "Your resignation has been approved. Last working day: 2026-09-15")]
    pub message: String,

    #[schema(example = false)]
    pub is_read: bool,

    #[schema(example = "2026-08-02T14:00:00Z", value_type = Option<String>, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}
