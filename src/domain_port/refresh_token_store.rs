use crate::application_port::*;
use crate::domain_model::*;

/// Persisted `refresh token -> owning identity` records.
///
/// An identity may own any number of records, one per live session.
#[async_trait::async_trait]
pub trait RefreshTokenStore: Send + Sync {
    async fn save(&self, user_id: UserId, token: &str) -> Result<(), AuthError>;

    /// Remove the record for `token` and return its owner, or `None` if there was no record.
    ///
    /// The lookup and the removal must be a single atomic step: of two concurrent calls
    /// with the same token, at most one may observe the owner.
    async fn delete_and_get_owner(&self, token: &str) -> Result<Option<UserId>, AuthError>;

    /// Remove every record owned by `user_id`, returning how many were removed.
    async fn delete_all_for_identity(&self, user_id: UserId) -> Result<u64, AuthError>;
}
