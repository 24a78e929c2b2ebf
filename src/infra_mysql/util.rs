use crate::application_port::AuthError;

pub fn store_err(err: sqlx::Error) -> AuthError {
    AuthError::Store(err.to_string())
}
