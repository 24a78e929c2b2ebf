use crate::application_port::*;
use crate::domain_model::UserId;
use std::sync::Arc;

/// Login, refresh and logout entry points for the transport layer.
pub struct SessionActions {
    identity_service: Arc<dyn IdentityService>,
    token_service: Arc<dyn TokenService>,
}

impl SessionActions {
    pub fn new(
        identity_service: Arc<dyn IdentityService>,
        token_service: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            identity_service,
            token_service,
        }
    }

    pub async fn login(&self, input: AuthenticateInput) -> Result<AuthTokens, AuthError> {
        let user_id = self.identity_service.authenticate(input).await?;
        self.token_service.create_auth_tokens(user_id).await
    }

    /// `refresh_token` is the raw cookie value, if the request carried one.
    pub async fn refresh(&self, refresh_token: Option<&str>) -> Result<AuthTokens, AuthError> {
        let token = refresh_token.ok_or(AuthError::TokenMissing)?;
        self.token_service.refresh_auth_tokens(token).await
    }

    pub async fn logout(&self, refresh_token: Option<&str>) -> Result<(), AuthError> {
        let token = refresh_token.ok_or(AuthError::TokenMissing)?;
        self.token_service.delete_refresh_token(token).await
    }

    /// Resolve the caller from an `Authorization` header value.
    pub async fn current_user(&self, authorization: Option<&str>) -> Result<UserId, AuthError> {
        let header = authorization.ok_or(AuthError::TokenMissing)?;
        self.token_service.verify_access_token(header).await
    }
}
