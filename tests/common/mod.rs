#![allow(dead_code)]

use std::sync::Arc;
use tokenguard::application_impl::*;
use tokenguard::application_port::*;
use tokenguard::domain_model::UserId;
use tokenguard::domain_port::RefreshTokenStore;

/// Read a DSN for an optional backend; tests skip when it is unset.
pub fn dsn(var: &str) -> Option<String> {
    match std::env::var(var) {
        Ok(dsn) if !dsn.is_empty() => Some(dsn),
        _ => {
            eprintln!("{var} not set, skipping");
            None
        }
    }
}

/// Behaviour every `RefreshTokenStore` backend must share.
pub async fn check_store_contract(store: &dyn RefreshTokenStore, a: UserId, b: UserId) {
    store.delete_all_for_identity(a).await.unwrap();
    store.delete_all_for_identity(b).await.unwrap();

    store.save(a, "token-a1").await.unwrap();
    store.save(a, "token-a2").await.unwrap();
    store.save(b, "token-b1").await.unwrap();

    assert_eq!(store.delete_and_get_owner("token-a1").await.unwrap(), Some(a));
    assert_eq!(store.delete_and_get_owner("token-a1").await.unwrap(), None);
    assert_eq!(store.delete_and_get_owner("missing").await.unwrap(), None);

    assert_eq!(store.delete_all_for_identity(a).await.unwrap(), 1);
    assert_eq!(store.delete_and_get_owner("token-a2").await.unwrap(), None);
    assert_eq!(store.delete_and_get_owner("token-b1").await.unwrap(), Some(b));
}

/// Rotation and reuse detection through the token service on top of `store`.
pub async fn check_rotation(store: Arc<dyn RefreshTokenStore>, user: UserId) {
    store.delete_all_for_identity(user).await.unwrap();
    let service = RealTokenService::new(Arc::new(JwtCodec::new(JwtConfig::default())), store.clone());

    let first = service.create_auth_tokens(user).await.unwrap();
    let second = service
        .refresh_auth_tokens(&first.refresh_token.0)
        .await
        .unwrap();

    let err = service
        .refresh_auth_tokens(&first.refresh_token.0)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TokenInvalid));

    // reuse revoked the sibling as well
    assert_eq!(
        store
            .delete_and_get_owner(&second.refresh_token.0)
            .await
            .unwrap(),
        None
    );
}
