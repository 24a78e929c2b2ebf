use crate::application_port::AuthError;
use crate::domain_model::UserId;

#[derive(Debug, Clone)]
pub struct AuthenticateInput {
    /// Value of the configured lookup field, e.g. an email address.
    pub lookup_value: String,
    pub input_password: String,
}

#[async_trait::async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError>;
    async fn verify_password(&self, password: &str, password_hash: &str)
    -> Result<bool, AuthError>;
}

#[async_trait::async_trait]
pub trait IdentityService: Send + Sync {
    async fn authenticate(&self, input: AuthenticateInput) -> Result<UserId, AuthError>;
}
