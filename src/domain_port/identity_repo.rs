use crate::application_port::*;
use crate::domain_model::*;

#[derive(Debug, Clone)]
pub struct IdentityRecord {
    pub user_id: UserId,
    pub password_hash: String,
    /// `None` when the identity schema has no active flag.
    pub is_active: Option<bool>,
}

#[async_trait::async_trait]
pub trait IdentityRepo: Send + Sync {
    /// The field this repository matches `lookup_value` against.
    fn lookup_field(&self) -> LookupField;

    /// Fetch the identity whose lookup field equals `lookup_value` (for login).
    async fn get_for_authenticate(
        &self,
        lookup_value: &str,
    ) -> Result<Option<IdentityRecord>, AuthError>;
}
