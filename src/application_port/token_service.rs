use crate::application_port::AuthError;
use crate::domain_model::{Claims, UserId};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct AccessToken(pub String);

#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RefreshToken(pub String);

#[derive(Debug, Clone, Serialize)]
pub struct AuthTokens {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

/// Extra access-token claims for an identity. Returning an empty map adds nothing.
pub type ExtraClaimsFn = Arc<dyn Fn(UserId) -> Claims + Send + Sync>;

pub fn no_extra_claims() -> ExtraClaimsFn {
    Arc::new(|_| Claims::new())
}

pub trait TokenCodec: Send + Sync {
    fn issue_access_token(&self, user: UserId, extra: Claims) -> Result<AccessToken, AuthError>;
    fn issue_refresh_token(&self, user: UserId) -> Result<RefreshToken, AuthError>;
    fn verify_access_token(&self, token: &AccessToken) -> Result<Claims, AuthError>;
    /// With `soft` set the expiry is not enforced; the signature still is.
    fn verify_refresh_token(&self, token: &RefreshToken, soft: bool) -> Result<Claims, AuthError>;
}

#[async_trait::async_trait]
pub trait TokenService: Send + Sync {
    async fn create_auth_tokens(&self, user_id: UserId) -> Result<AuthTokens, AuthError>;
    async fn refresh_auth_tokens(&self, refresh_token: &str) -> Result<AuthTokens, AuthError>;
    async fn delete_refresh_token(&self, refresh_token: &str) -> Result<(), AuthError>;
    async fn verify_access_token(&self, access_token: &str) -> Result<UserId, AuthError>;
}
