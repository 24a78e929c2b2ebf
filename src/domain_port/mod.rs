// store

mod refresh_token_store;

pub use refresh_token_store::*;

// repo

mod identity_repo;

pub use identity_repo::*;
