use super::subject_of;
use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use crate::logger::*;
use std::sync::Arc;

/// What the reuse check found for a presented refresh token.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RefreshTokenCheck {
    /// The record existed and has been consumed.
    Consumed { owner: UserId },
    /// No record: the token was already rotated away or never stored.
    /// Every session of `subject` has been revoked.
    ReuseDetected { subject: UserId, revoked: u64 },
}

pub struct RealTokenService {
    token_codec: Arc<dyn TokenCodec>,
    token_store: Arc<dyn RefreshTokenStore>,
    extra_claims: ExtraClaimsFn,
}

impl RealTokenService {
    pub fn new(token_codec: Arc<dyn TokenCodec>, token_store: Arc<dyn RefreshTokenStore>) -> Self {
        Self {
            token_codec,
            token_store,
            extra_claims: no_extra_claims(),
        }
    }

    pub fn with_extra_claims(mut self, extra_claims: ExtraClaimsFn) -> Self {
        self.extra_claims = extra_claims;
        self
    }

    /// Consume the record for `token`; if it is gone, revoke every session of the subject.
    pub async fn delete_user_tokens_if_not_exist(
        &self,
        token: &str,
        claims: &Claims,
    ) -> Result<RefreshTokenCheck, AuthError> {
        let subject = subject_of(claims)?;

        match self.token_store.delete_and_get_owner(token).await? {
            Some(owner) => {
                if owner != subject {
                    warn!(%owner, %subject, "refresh token stored under a different identity");
                }
                Ok(RefreshTokenCheck::Consumed { owner })
            }
            None => {
                let revoked = self.token_store.delete_all_for_identity(subject).await?;
                warn!(
                    user_id = %subject,
                    revoked,
                    "refresh token reuse detected, revoked all sessions"
                );
                Ok(RefreshTokenCheck::ReuseDetected { subject, revoked })
            }
        }
    }
}

#[async_trait::async_trait]
impl TokenService for RealTokenService {
    async fn create_auth_tokens(&self, user_id: UserId) -> Result<AuthTokens, AuthError> {
        let extra = (self.extra_claims)(user_id);
        let access_token = self.token_codec.issue_access_token(user_id, extra)?;
        let refresh_token = self.token_codec.issue_refresh_token(user_id)?;

        self.token_store.save(user_id, &refresh_token.0).await?;
        debug!(%user_id, "issued token pair");

        Ok(AuthTokens {
            access_token,
            refresh_token,
        })
    }

    async fn refresh_auth_tokens(&self, refresh_token: &str) -> Result<AuthTokens, AuthError> {
        let claims = self
            .token_codec
            .verify_refresh_token(&RefreshToken(refresh_token.to_string()), false)?;

        match self
            .delete_user_tokens_if_not_exist(refresh_token, &claims)
            .await?
        {
            RefreshTokenCheck::Consumed { .. } => {}
            RefreshTokenCheck::ReuseDetected { .. } => return Err(AuthError::TokenInvalid),
        }

        let user_id = subject_of(&claims)?;
        let tokens = self.create_auth_tokens(user_id).await?;
        info!(%user_id, "rotated refresh token");
        Ok(tokens)
    }

    async fn delete_refresh_token(&self, refresh_token: &str) -> Result<(), AuthError> {
        let claims = self
            .token_codec
            .verify_refresh_token(&RefreshToken(refresh_token.to_string()), true)?;

        if let RefreshTokenCheck::Consumed { owner } = self
            .delete_user_tokens_if_not_exist(refresh_token, &claims)
            .await?
        {
            info!(user_id = %owner, "refresh token revoked");
        }
        Ok(())
    }

    async fn verify_access_token(&self, access_token: &str) -> Result<UserId, AuthError> {
        let token = access_token
            .strip_prefix("Bearer ")
            .unwrap_or(access_token)
            .trim();
        if token.is_empty() {
            return Err(AuthError::TokenMissing);
        }

        let claims = self
            .token_codec
            .verify_access_token(&AccessToken(token.to_string()))?;
        subject_of(&claims)
    }
}
