use super::util::store_err;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::{MySqlPool, Row};

/// Refresh token records in the `refresh_token` table.
pub struct MySqlRefreshTokenStore {
    pool: MySqlPool,
}

impl MySqlRefreshTokenStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlRefreshTokenStore { pool }
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for MySqlRefreshTokenStore {
    async fn save(&self, user_id: UserId, token: &str) -> Result<(), AuthError> {
        sqlx::query(
            r#"
INSERT INTO refresh_token (user_id, token)
VALUES (?, ?)
"#,
        )
        .bind(user_id)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(store_err)?;

        Ok(())
    }

    async fn delete_and_get_owner(&self, token: &str) -> Result<Option<UserId>, AuthError> {
        let mut tx = self.pool.begin().await.map_err(store_err)?;

        // the row lock makes a concurrent caller wait, then read no row
        let row_opt = sqlx::query(
            r#"
SELECT id, user_id
FROM refresh_token
WHERE token = ?
LIMIT 1
FOR UPDATE
"#,
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await
        .map_err(store_err)?;

        let Some(row) = row_opt else {
            tx.rollback().await.map_err(store_err)?;
            return Ok(None);
        };

        let id: i64 = row.try_get("id").map_err(store_err)?;
        let user_id: UserId = row.try_get("user_id").map_err(store_err)?;

        sqlx::query("DELETE FROM refresh_token WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(store_err)?;

        tx.commit().await.map_err(store_err)?;

        Ok(Some(user_id))
    }

    async fn delete_all_for_identity(&self, user_id: UserId) -> Result<u64, AuthError> {
        let result = sqlx::query("DELETE FROM refresh_token WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(store_err)?;

        Ok(result.rows_affected())
    }
}
