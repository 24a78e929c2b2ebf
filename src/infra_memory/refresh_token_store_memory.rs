use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::sync::{Mutex, MutexGuard};

/// Process-local refresh token store. Every operation runs under one lock.
#[derive(Debug, Default)]
pub struct MemoryRefreshTokenStore {
    records: Mutex<Vec<(UserId, String)>>,
}

impl MemoryRefreshTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<(UserId, String)>>, AuthError> {
        self.records
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))
    }

    pub fn tokens_for(&self, user_id: UserId) -> Vec<String> {
        self.records
            .lock()
            .map(|records| {
                records
                    .iter()
                    .filter(|(owner, _)| *owner == user_id)
                    .map(|(_, token)| token.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.records
            .lock()
            .map(|records| records.iter().any(|(_, t)| t == token))
            .unwrap_or(false)
    }
}

#[async_trait::async_trait]
impl RefreshTokenStore for MemoryRefreshTokenStore {
    async fn save(&self, user_id: UserId, token: &str) -> Result<(), AuthError> {
        self.lock()?.push((user_id, token.to_string()));
        Ok(())
    }

    async fn delete_and_get_owner(&self, token: &str) -> Result<Option<UserId>, AuthError> {
        let mut records = self.lock()?;
        let owner = records
            .iter()
            .position(|(_, t)| t == token)
            .map(|idx| records.remove(idx).0);
        Ok(owner)
    }

    async fn delete_all_for_identity(&self, user_id: UserId) -> Result<u64, AuthError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|(owner, _)| *owner != user_id);
        Ok((before - records.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delete_and_get_owner_consumes_once() {
        let store = MemoryRefreshTokenStore::new();
        store.save(UserId(1), "a").await.unwrap();

        assert_eq!(store.delete_and_get_owner("a").await.unwrap(), Some(UserId(1)));
        assert_eq!(store.delete_and_get_owner("a").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_all_only_touches_one_identity() {
        let store = MemoryRefreshTokenStore::new();
        store.save(UserId(1), "a").await.unwrap();
        store.save(UserId(1), "b").await.unwrap();
        store.save(UserId(11), "c").await.unwrap();

        assert_eq!(store.delete_all_for_identity(UserId(1)).await.unwrap(), 2);
        assert!(store.tokens_for(UserId(1)).is_empty());
        assert_eq!(store.tokens_for(UserId(11)), vec!["c".to_string()]);
        assert_eq!(store.delete_all_for_identity(UserId(1)).await.unwrap(), 0);
    }
}
