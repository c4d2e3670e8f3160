use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::error::WorkflowError;
use crate::holiday::HolidayOracle;
use crate::model::resignation::{Resignation, ResignationStatus};
use crate::workflow::{notifier, validation};

const RESIGNATION_COLUMNS: &str =
    "id, employee_id, requested_lwd, approved_lwd, status, created_at";

/// Submit a new resignation. The proposed last working day must pass
/// validation; the record starts out `pending`.
pub async fn submit<O: HolidayOracle>(
    pool: &MySqlPool,
    oracle: &O,
    employee_id: u64,
    lwd: NaiveDate,
    country: &str,
) -> Result<u64, WorkflowError> {
    validation::validate_last_working_day(oracle, lwd, country).await?;

    let result = sqlx::query("INSERT INTO resignations (employee_id, requested_lwd) VALUES (?, ?)")
        .bind(employee_id)
        .bind(lwd)
        .execute(pool)
        .await?;

    let id = result.last_insert_id();
    tracing::info!(employee_id, resignation_id = id, %lwd, "Resignation submitted");

    Ok(id)
}

/// Most recently created resignation for an employee, if any.
pub async fn latest_for_employee(
    pool: &MySqlPool,
    employee_id: u64,
) -> Result<Option<Resignation>, sqlx::Error> {
    let sql = format!(
        "SELECT {RESIGNATION_COLUMNS} FROM resignations \
         WHERE employee_id = ? ORDER BY created_at DESC, id DESC LIMIT 1"
    );

    sqlx::query_as::<_, Resignation>(&sql)
        .bind(employee_id)
        .fetch_optional(pool)
        .await
}

/// Conclude a pending resignation as approved or rejected.
///
/// The transition is a conditional update on `status = 'pending'`, so of two
/// racing conclusions exactly one wins and the other observes `InvalidState`.
/// The status update and the notification insert share one transaction:
/// either both land or neither does, so exactly one notification exists per
/// concluded resignation.
pub async fn conclude(
    pool: &MySqlPool,
    resignation_id: u64,
    approved: bool,
    lwd: Option<NaiveDate>,
) -> Result<(), WorkflowError> {
    let approved_lwd = match (approved, lwd) {
        (true, Some(day)) => Some(day),
        (true, None) => {
            return Err(WorkflowError::Validation(
                "An approved last working day is required".to_string(),
            ));
        }
        (false, _) => None,
    };

    let mut tx = pool.begin().await?;

    let sql = format!("SELECT {RESIGNATION_COLUMNS} FROM resignations WHERE id = ?");
    let resignation = sqlx::query_as::<_, Resignation>(&sql)
        .bind(resignation_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(WorkflowError::NotFound("Resignation"))?;

    let next = if approved {
        ResignationStatus::Approved
    } else {
        ResignationStatus::Rejected
    };

    // Check-and-set: only the first decision on a pending record lands.
    let result = sqlx::query(
        "UPDATE resignations SET status = ?, approved_lwd = ? \
         WHERE id = ? AND status = 'pending'",
    )
    .bind(next.to_string())
    .bind(approved_lwd)
    .bind(resignation_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(WorkflowError::InvalidState(
            "Resignation has already been concluded",
        ));
    }

    let (title, message) = decision_notification(approved, approved_lwd);
    notifier::notify(&mut *tx, resignation.employee_id, title, &message).await?;

    tx.commit().await?;

    tracing::info!(
        resignation_id,
        employee_id = resignation.employee_id,
        status = %next,
        "Resignation concluded"
    );

    Ok(())
}

/// Title and message of the notification sent to the employee on conclusion.
pub(crate) fn decision_notification(
    approved: bool,
    approved_lwd: Option<NaiveDate>,
) -> (&'static str, String) {
    if let Some(lwd) = approved_lwd.filter(|_| approved) {
        (
            "Resignation Approved",
            format!("Your resignation has been approved. Last working day: {lwd}"),
        )
    } else {
        (
            "Resignation Rejected",
            "Your resignation request has been rejected.".to_string(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holiday::HolidayOracle;
    use crate::workflow::testutil::{notification_count, seed_employee, test_pool};

    struct NoHolidays;

    impl HolidayOracle for NoHolidays {
        async fn is_holiday(&self, _date: NaiveDate, _country: &str) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    fn workday() -> NaiveDate {
        // a Tuesday
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    #[test]
    fn approval_notification_carries_the_date() {
        let lwd = NaiveDate::from_ymd_opt(2026, 9, 15).unwrap();
        let (title, message) = decision_notification(true, Some(lwd));

        assert_eq!(title, "Resignation Approved");
        assert!(message.contains("2026-09-15"));
    }

    #[test]
    fn rejection_notification_has_no_date() {
        let (title, message) = decision_notification(false, None);

        assert_eq!(title, "Resignation Rejected");
        assert_eq!(message, "Your resignation request has been rejected.");
    }

    #[actix_web::test]
    async fn approval_lands_once_and_notifies_once() {
        let Some(pool) = test_pool().await else { return };
        let employee_id = seed_employee(&pool).await;
        let lwd = workday();

        let id = submit(&pool, &NoHolidays, employee_id, lwd, "US")
            .await
            .unwrap();

        conclude(&pool, id, true, Some(lwd)).await.unwrap();

        let resignation = latest_for_employee(&pool, employee_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resignation.status, ResignationStatus::Approved);
        assert_eq!(resignation.approved_lwd, Some(lwd));
        assert_eq!(notification_count(&pool, employee_id).await, 1);

        let unread = notifier::list_unread(&pool, employee_id).await.unwrap();
        assert!(unread[0].message.contains("2026-03-10"));

        // a second decision must neither land nor notify again
        let verdict = conclude(&pool, id, false, None).await;
        assert!(matches!(verdict, Err(WorkflowError::InvalidState(_))));
        assert_eq!(notification_count(&pool, employee_id).await, 1);

        let resignation = latest_for_employee(&pool, employee_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resignation.status, ResignationStatus::Approved);
    }

    #[actix_web::test]
    async fn rejection_leaves_approved_lwd_unset() {
        let Some(pool) = test_pool().await else { return };
        let employee_id = seed_employee(&pool).await;

        let id = submit(&pool, &NoHolidays, employee_id, workday(), "US")
            .await
            .unwrap();

        conclude(&pool, id, false, None).await.unwrap();

        let resignation = latest_for_employee(&pool, employee_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resignation.status, ResignationStatus::Rejected);
        assert_eq!(resignation.approved_lwd, None);
        assert_eq!(notification_count(&pool, employee_id).await, 1);
    }

    #[actix_web::test]
    async fn concluding_unknown_id_is_not_found() {
        let Some(pool) = test_pool().await else { return };

        let verdict = conclude(&pool, u64::MAX, true, Some(workday())).await;
        assert!(matches!(verdict, Err(WorkflowError::NotFound(_))));
    }

    #[actix_web::test]
    async fn approving_without_a_date_is_rejected() {
        let Some(pool) = test_pool().await else { return };
        let employee_id = seed_employee(&pool).await;

        let id = submit(&pool, &NoHolidays, employee_id, workday(), "US")
            .await
            .unwrap();

        let verdict = conclude(&pool, id, true, None).await;
        assert!(matches!(verdict, Err(WorkflowError::Validation(_))));

        // the record is untouched and no notification was written
        let resignation = latest_for_employee(&pool, employee_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(resignation.status, ResignationStatus::Pending);
        assert_eq!(notification_count(&pool, employee_id).await, 0);
    }

    #[actix_web::test]
    async fn racing_conclusions_have_one_winner() {
        let Some(pool) = test_pool().await else { return };
        let employee_id = seed_employee(&pool).await;
        let lwd = workday();

        let id = submit(&pool, &NoHolidays, employee_id, lwd, "US")
            .await
            .unwrap();

        let (approve, reject) = futures::join!(
            conclude(&pool, id, true, Some(lwd)),
            conclude(&pool, id, false, None)
        );

        let winners = approve.is_ok() as u8 + reject.is_ok() as u8;
        assert_eq!(winners, 1);

        let loser = if approve.is_ok() { reject } else { approve };
        assert!(matches!(loser, Err(WorkflowError::InvalidState(_))));

        assert_eq!(notification_count(&pool, employee_id).await, 1);
    }

    #[actix_web::test]
    async fn latest_resignation_wins_over_earlier_ones() {
        let Some(pool) = test_pool().await else { return };
        let employee_id = seed_employee(&pool).await;

        assert!(
            latest_for_employee(&pool, employee_id)
                .await
                .unwrap()
                .is_none()
        );

        let first = submit(&pool, &NoHolidays, employee_id, workday(), "US")
            .await
            .unwrap();
        let second = submit(&pool, &NoHolidays, employee_id, workday(), "US")
            .await
            .unwrap();
        assert!(second > first);

        let latest = latest_for_employee(&pool, employee_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(latest.id, second);
    }
}
