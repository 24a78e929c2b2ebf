#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("account is not active")]
    InactiveAccount,
    #[error("token missing")]
    TokenMissing,
    #[error("token invalid")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("store error: {0}")]
    Store(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

/// Coarse classification used by whatever transport sits in front of the services.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum AuthErrorKind {
    Validation,
    Authentication,
    Forbidden,
    StoreUnavailable,
    Internal,
}

impl AuthError {
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            AuthError::Validation(_) => AuthErrorKind::Validation,
            AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => AuthErrorKind::Authentication,
            AuthError::InactiveAccount => AuthErrorKind::Forbidden,
            AuthError::Store(_) => AuthErrorKind::StoreUnavailable,
            AuthError::InternalError(_) => AuthErrorKind::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::Validation(_) | AuthError::InvalidCredentials => 422,
            AuthError::TokenMissing | AuthError::TokenInvalid | AuthError::TokenExpired => 401,
            AuthError::InactiveAccount => 403,
            AuthError::Store(_) => 503,
            AuthError::InternalError(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_failures_are_client_errors() {
        for err in [
            AuthError::TokenMissing,
            AuthError::TokenInvalid,
            AuthError::TokenExpired,
            AuthError::InvalidCredentials,
        ] {
            assert_eq!(err.kind(), AuthErrorKind::Authentication);
            assert!((400..500).contains(&err.status_code()));
        }
    }

    #[test]
    fn forbidden_is_distinct_from_authentication() {
        let err = AuthError::InactiveAccount;
        assert_eq!(err.kind(), AuthErrorKind::Forbidden);
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn store_failures_are_not_client_errors() {
        let err = AuthError::Store("connection refused".to_string());
        assert_eq!(err.kind(), AuthErrorKind::StoreUnavailable);
        assert_eq!(err.status_code(), 503);
        assert_eq!(err.to_string(), "store error: connection refused");
    }
}
