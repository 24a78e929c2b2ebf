use serde_json::{Map, Value};

/// Payload of a signed token.
pub type Claims = Map<String, Value>;

pub const CLAIM_SUBJECT: &str = "sub";
pub const CLAIM_EXPIRY: &str = "exp";
pub const CLAIM_TOKEN_ID: &str = "jti";

/// Claims the extra-claims hook is not allowed to set.
pub const RESERVED_CLAIMS: [&str; 3] = [CLAIM_SUBJECT, CLAIM_EXPIRY, CLAIM_TOKEN_ID];
