use super::util::store_err;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

/// Reads login data from the `account` table.
pub struct MySqlIdentityRepo {
    pool: MySqlPool,
    lookup_field: LookupField,
    has_active_flag: bool,
    query: String,
}

impl MySqlIdentityRepo {
    /// Fails with a validation error if `lookup_field` is not a known identity field.
    pub fn try_new(
        pool: MySqlPool,
        lookup_field: &str,
        has_active_flag: bool,
    ) -> Result<Self, AuthError> {
        let lookup_field = lookup_field
            .parse::<LookupField>()
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        let query = Self::select_for(lookup_field, has_active_flag);

        Ok(MySqlIdentityRepo {
            pool,
            lookup_field,
            has_active_flag,
            query,
        })
    }

    fn select_for(lookup_field: LookupField, has_active_flag: bool) -> String {
        let active = if has_active_flag { ", is_active" } else { "" };
        format!(
            "SELECT id, password{active} FROM account WHERE {} = ? LIMIT 1",
            lookup_field.column()
        )
    }

    fn row_to_record(&self, row: MySqlRow) -> Result<IdentityRecord, AuthError> {
        let user_id: UserId = row.try_get("id").map_err(store_err)?;
        let password_hash: String = row.try_get("password").map_err(store_err)?;
        let is_active = if self.has_active_flag {
            Some(row.try_get::<bool, _>("is_active").map_err(store_err)?)
        } else {
            None
        };

        Ok(IdentityRecord {
            user_id,
            password_hash,
            is_active,
        })
    }
}

#[async_trait::async_trait]
impl IdentityRepo for MySqlIdentityRepo {
    fn lookup_field(&self) -> LookupField {
        self.lookup_field
    }

    async fn get_for_authenticate(
        &self,
        lookup_value: &str,
    ) -> Result<Option<IdentityRecord>, AuthError> {
        let row_opt: Option<MySqlRow> = sqlx::query(&self.query)
            .bind(lookup_value)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_err)?;

        row_opt.map(|row| self.row_to_record(row)).transpose()
    }
}
