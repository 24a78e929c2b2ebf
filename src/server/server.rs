use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_memory::*;
use crate::infra_mysql::*;
use crate::infra_redis::*;
use crate::logger::*;
use crate::settings::Settings;
use sqlx::{MySql, Pool};
use std::sync::Arc;

/// Wires the services to the backends named in the settings.
///
/// Connection handles are created here and shared with the adapters; `shutdown` releases them.
pub struct Server {
    pub session_actions: Arc<SessionActions>,
    pub token_service: Arc<dyn TokenService>,
    pub identity_service: Arc<dyn IdentityService>,
    pool: Pool<MySql>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let pool = Pool::<MySql>::connect_lazy(&settings.mysql.dsn)?;

        let token_store: Arc<dyn RefreshTokenStore> = match settings.store.backend.as_str() {
            "redis" => {
                let redis_client = redis::Client::open(settings.store.redis_dsn.as_str())?;
                let redis_manager = redis_client.get_connection_manager().await?;
                Arc::new(RedisRefreshTokenStore::new(
                    redis_manager,
                    settings.store.key_prefix.clone(),
                ))
            }
            "mysql" => Arc::new(MySqlRefreshTokenStore::new(pool.clone())),
            "memory" => {
                warn!("refresh tokens are kept in process memory and lost on exit");
                Arc::new(MemoryRefreshTokenStore::new())
            }
            other => return Err(anyhow::anyhow!("Unknown store backend: {}", other)),
        };

        let identity_repo: Arc<dyn IdentityRepo> = Arc::new(MySqlIdentityRepo::try_new(
            pool.clone(),
            &settings.identity.lookup_field,
            settings.identity.has_active_flag,
        )?);

        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Pbkdf2PasswordHasher);
        let token_codec: Arc<dyn TokenCodec> = Arc::new(JwtCodec::new(settings.jwt.to_config()?));

        let token_service: Arc<dyn TokenService> =
            Arc::new(RealTokenService::new(token_codec, token_store));
        let identity_service: Arc<dyn IdentityService> = Arc::new(RealIdentityService::new(
            identity_repo,
            credential_hasher,
        ));
        let session_actions = Arc::new(SessionActions::new(
            identity_service.clone(),
            token_service.clone(),
        ));

        info!(
            store = %settings.store.backend,
            lookup_field = %settings.identity.lookup_field,
            "server started"
        );

        Ok(Self {
            session_actions,
            token_service,
            identity_service,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        info!("server shutting down...");
        self.pool.close().await;
    }
}
