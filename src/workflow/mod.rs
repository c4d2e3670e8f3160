pub mod lifecycle;
pub mod notifier;
pub mod questionnaire;
pub mod validation;

#[cfg(test)]
pub(crate) mod testutil {
    use sqlx::MySqlPool;
    use uuid::Uuid;

    /// Connect to the database named by `DATABASE_URL` and make sure the
    /// schema exists. Tests that need a live database skip themselves when
    /// the variable is unset.
    pub(crate) async fn test_pool() -> Option<MySqlPool> {
        let url = std::env::var("DATABASE_URL").ok()?;
        let pool = MySqlPool::connect(&url).await.ok()?;

        for statement in include_str!("../../schema.sql").split(';') {
            let statement = statement.trim();
            if !statement.is_empty() {
                sqlx::query(statement).execute(&pool).await.ok()?;
            }
        }

        Some(pool)
    }

    /// Insert a throwaway employee account and return its id.
    pub(crate) async fn seed_employee(pool: &MySqlPool) -> u64 {
        let username = format!("emp-{}", Uuid::new_v4());
        let result =
            sqlx::query("INSERT INTO users (username, email, password, role_id) VALUES (?, ?, 'x', 2)")
                .bind(&username)
                .bind(format!("{username}@example.com"))
                .execute(pool)
                .await
                .unwrap();

        result.last_insert_id()
    }

    pub(crate) async fn notification_count(pool: &MySqlPool, user_id: u64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM notifications WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }
}
