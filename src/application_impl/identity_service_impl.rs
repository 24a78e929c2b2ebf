use crate::application_port::*;
use crate::domain_model::UserId;
use crate::domain_port::IdentityRepo;
use crate::logger::*;
use std::sync::Arc;

pub struct RealIdentityService {
    identity_repo: Arc<dyn IdentityRepo>,
    credential_hasher: Arc<dyn CredentialHasher>,
}

impl RealIdentityService {
    pub fn new(
        identity_repo: Arc<dyn IdentityRepo>,
        credential_hasher: Arc<dyn CredentialHasher>,
    ) -> Self {
        Self {
            identity_repo,
            credential_hasher,
        }
    }
}

#[async_trait::async_trait]
impl IdentityService for RealIdentityService {
    async fn authenticate(&self, input: AuthenticateInput) -> Result<UserId, AuthError> {
        let AuthenticateInput {
            lookup_value,
            input_password,
        } = input;

        let Some(rec) = self
            .identity_repo
            .get_for_authenticate(&lookup_value)
            .await?
        else {
            debug!(field = %self.identity_repo.lookup_field(), "no identity for lookup value");
            return Err(AuthError::InvalidCredentials);
        };

        let ok = self
            .credential_hasher
            .verify_password(&input_password, &rec.password_hash)
            .await?;
        if !ok {
            return Err(AuthError::InvalidCredentials);
        }

        if rec.is_active == Some(false) {
            return Err(AuthError::InactiveAccount);
        }

        Ok(rec.user_id)
    }
}
