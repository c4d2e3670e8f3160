use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// Lifecycle states of a resignation request.
///
/// `Pending` is the only state with outgoing transitions; `Approved` and
/// `Rejected` are terminal. The transition itself is applied as a conditional
/// update in `workflow::lifecycle`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, sqlx::Type, ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum ResignationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 42,
        "requested_lwd": "2026-09-15",
        "approved_lwd": null,
        "status": "pending",
        "created_at": "2026-08-01T09:30:00Z"
    })
)]
pub struct Resignation {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 42)]
    pub employee_id: u64,

    /// Last working day as requested by the employee
    #[schema(example = "2026-09-15", value_type = String, format = "date")]
    pub requested_lwd: NaiveDate,

    /// Set only once the resignation has been approved
    #[schema(example = "2026-09-15", value_type = Option<String>, format = "date", nullable = true)]
    pub approved_lwd: Option<NaiveDate>,

    #[schema(example = "pending")]
    pub status: ResignationStatus,

    #[schema(example = "2026-08-01T09:30:00Z", value_type = Option<String>, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(ResignationStatus::Pending.to_string(), "pending");
        assert_eq!(ResignationStatus::Approved.to_string(), "approved");
        assert_eq!(ResignationStatus::Rejected.to_string(), "rejected");
    }

    #[test]
    fn status_parses_from_column_value() {
        assert_eq!(
            ResignationStatus::from_str("approved").unwrap(),
            ResignationStatus::Approved
        );
        assert!(ResignationStatus::from_str("cancelled").is_err());
    }
}
