mod identity_service_impl;
mod jwt_codec;
mod pbkdf2_hasher;
mod session_actions;
mod token_service_impl;

pub use identity_service_impl::*;
pub use jwt_codec::*;
pub use pbkdf2_hasher::*;
pub use session_actions::*;
pub use token_service_impl::*;
