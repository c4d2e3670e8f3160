use sqlx::{MySql, MySqlPool};

use crate::error::WorkflowError;
use crate::model::notification::Notification;

/// Create a notification for a user. Content is immutable after creation;
/// only the read flag ever changes. Takes any executor so a caller can make
/// the insert part of its own transaction.
pub async fn notify<'e, E>(
    executor: E,
    user_id: u64,
    title: &str,
    message: &str,
) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = MySql>,
{
    let result = sqlx::query("INSERT INTO notifications (user_id, title, message) VALUES (?, ?, ?)")
        .bind(user_id)
        .bind(title)
        .bind(message)
        .execute(executor)
        .await?;

    Ok(result.last_insert_id())
}

/// Unread notifications for a user, newest first.
pub async fn list_unread(pool: &MySqlPool, user_id: u64) -> Result<Vec<Notification>, sqlx::Error> {
    sqlx::query_as::<_, Notification>(
        "SELECT id, user_id, title, message, is_read, created_at \
         FROM notifications \
         WHERE user_id = ? AND is_read = FALSE \
         ORDER BY created_at DESC, id DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

/// Mark a notification as read. Idempotent; scoped to the recipient so one
/// user cannot acknowledge another's notifications.
pub async fn mark_read(
    pool: &MySqlPool,
    notification_id: u64,
    user_id: u64,
) -> Result<(), WorkflowError> {
    let result = sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = ? AND user_id = ?")
        .bind(notification_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        // MySQL reports zero affected rows for a no-change update, so an
        // already-read notification and an unknown id look the same here.
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM notifications WHERE id = ? AND user_id = ?)",
        )
        .bind(notification_id)
        .bind(user_id)
        .fetch_one(pool)
        .await?;

        if !exists {
            return Err(WorkflowError::NotFound("Notification"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::testutil::{seed_employee, test_pool};

    #[actix_web::test]
    async fn mark_read_is_idempotent() {
        let Some(pool) = test_pool().await else { return };
        let user_id = seed_employee(&pool).await;

        let id = notify(&pool, user_id, "Resignation Approved", "See you soon")
            .await
            .unwrap();

        assert_eq!(list_unread(&pool, user_id).await.unwrap().len(), 1);

        mark_read(&pool, id, user_id).await.unwrap();
        // acknowledging again is a no-op, not an error
        mark_read(&pool, id, user_id).await.unwrap();

        assert!(list_unread(&pool, user_id).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn mark_read_unknown_id_is_not_found() {
        let Some(pool) = test_pool().await else { return };
        let user_id = seed_employee(&pool).await;

        let verdict = mark_read(&pool, u64::MAX, user_id).await;
        assert!(matches!(verdict, Err(WorkflowError::NotFound(_))));
    }

    #[actix_web::test]
    async fn mark_read_is_scoped_to_the_recipient() {
        let Some(pool) = test_pool().await else { return };
        let recipient = seed_employee(&pool).await;
        let stranger = seed_employee(&pool).await;

        let id = notify(&pool, recipient, "Resignation Rejected", "Decision made")
            .await
            .unwrap();

        let verdict = mark_read(&pool, id, stranger).await;
        assert!(matches!(verdict, Err(WorkflowError::NotFound(_))));

        // still unread for the actual recipient
        assert_eq!(list_unread(&pool, recipient).await.unwrap().len(), 1);
    }
}
