use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Script};

const REFRESH_TOKEN_CONSUME: &str = include_str!("refresh_token_consume.lua");
const REFRESH_TOKEN_PURGE: &str = include_str!("refresh_token_purge.lua");

/// Refresh token records as presence-only keys `"<prefix>:<user_id>,<token>"`.
///
/// Lookup by token scans the key space of the prefix, which is fine for the number of
/// sessions a deployment keeps.
pub struct RedisRefreshTokenStore {
    conn: ConnectionManager,
    prefix: String,
    consume: Script,
    purge: Script,
}

impl RedisRefreshTokenStore {
    pub fn new(conn: ConnectionManager, prefix: impl Into<String>) -> Self {
        RedisRefreshTokenStore {
            conn,
            prefix: prefix.into(),
            consume: Script::new(REFRESH_TOKEN_CONSUME),
            purge: Script::new(REFRESH_TOKEN_PURGE),
        }
    }

    fn key(&self, user_id: UserId, token: &str) -> String {
        format!("{}:{},{}", self.prefix, user_id, token)
    }

    fn token_pattern(&self, token: &str) -> String {
        format!("{}:*,{}", escape_glob(&self.prefix), escape_glob(token))
    }

    fn identity_pattern(&self, user_id: UserId) -> String {
        format!("{}:{},*", escape_glob(&self.prefix), user_id)
    }
}

fn owner_from_key(prefix: &str, key: &str) -> Result<UserId, AuthError> {
    key.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix(':'))
        .and_then(|rest| rest.split_once(','))
        .and_then(|(user_id, _)| user_id.parse::<UserId>().ok())
        .ok_or_else(|| AuthError::Store(format!("malformed refresh token key: {key}")))
}

fn escape_glob(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\' | '^') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[async_trait::async_trait]
impl RefreshTokenStore for RedisRefreshTokenStore {
    async fn save(&self, user_id: UserId, token: &str) -> Result<(), AuthError> {
        let key = self.key(user_id, token);
        let mut conn = self.conn.clone();
        let _: () = conn
            .set(&key, 1)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(())
    }

    async fn delete_and_get_owner(&self, token: &str) -> Result<Option<UserId>, AuthError> {
        let mut conn = self.conn.clone();
        let key: Option<String> = self
            .consume
            .arg(self.token_pattern(token))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;

        key.map(|key| owner_from_key(&self.prefix, &key))
            .transpose()
    }

    async fn delete_all_for_identity(&self, user_id: UserId) -> Result<u64, AuthError> {
        let mut conn = self.conn.clone();
        let removed: u64 = self
            .purge
            .arg(self.identity_pattern(user_id))
            .invoke_async(&mut conn)
            .await
            .map_err(|e| AuthError::Store(e.to_string()))?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glob_metacharacters_are_escaped() {
        assert_eq!(escape_glob("a.b-c_d"), "a.b-c_d");
        assert_eq!(escape_glob("a*b?c[d]e\\"), "a\\*b\\?c\\[d\\]e\\\\");
    }

    #[test]
    fn owner_is_parsed_from_key_prefix() {
        let token = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMSJ9.sig";
        let key = format!("refresh:11,{token}");
        assert_eq!(owner_from_key("refresh", &key).unwrap(), UserId(11));
        assert!(owner_from_key("refresh", "refresh:abc,token").is_err());
        assert!(owner_from_key("refresh", "other:1,token").is_err());
        assert!(owner_from_key("refresh", "refresh:1").is_err());
    }
}
