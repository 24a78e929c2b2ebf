use crate::application_port::*;
use crate::domain_model::*;
use crate::domain_port::*;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct MemoryIdentity {
    pub user_id: UserId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub is_active: Option<bool>,
}

impl MemoryIdentity {
    fn field(&self, field: LookupField) -> &str {
        match field {
            LookupField::Email => &self.email,
            LookupField::Username => &self.username,
        }
    }
}

/// Identity repository over a fixed in-process table, for tests and local runs.
pub struct MemoryIdentityRepo {
    lookup_field: LookupField,
    identities: Mutex<HashMap<UserId, MemoryIdentity>>,
}

impl MemoryIdentityRepo {
    pub fn try_new(lookup_field: &str) -> Result<Self, AuthError> {
        let lookup_field = lookup_field
            .parse::<LookupField>()
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        Ok(Self {
            lookup_field,
            identities: Mutex::new(HashMap::new()),
        })
    }

    pub fn insert(&self, identity: MemoryIdentity) -> Result<(), AuthError> {
        self.identities
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))?
            .insert(identity.user_id, identity);
        Ok(())
    }
}

#[async_trait::async_trait]
impl IdentityRepo for MemoryIdentityRepo {
    fn lookup_field(&self) -> LookupField {
        self.lookup_field
    }

    async fn get_for_authenticate(
        &self,
        lookup_value: &str,
    ) -> Result<Option<IdentityRecord>, AuthError> {
        let identities = self
            .identities
            .lock()
            .map_err(|e| AuthError::Store(e.to_string()))?;

        let record = identities
            .values()
            .find(|identity| identity.field(self.lookup_field) == lookup_value)
            .map(|identity| IdentityRecord {
                user_id: identity.user_id,
                password_hash: identity.password_hash.clone(),
                is_active: identity.is_active,
            });
        Ok(record)
    }
}
