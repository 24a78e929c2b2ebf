//! In-process backends. They honour the same contracts as the Redis and MySQL adapters.

mod identity_repo_memory;
mod refresh_token_store_memory;

pub use identity_repo_memory::*;
pub use refresh_token_store_memory::*;
