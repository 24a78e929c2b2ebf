mod auth_error;
mod identity_service;
mod token_service;

pub use auth_error::*;
pub use identity_service::*;
pub use token_service::*;
