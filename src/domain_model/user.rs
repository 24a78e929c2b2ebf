use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(UserId)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId(id)
    }
}

/// Unique identity attributes a login may be looked up by.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupField {
    Email,
    Username,
}

impl LookupField {
    pub const ALL: [LookupField; 2] = [LookupField::Email, LookupField::Username];

    pub fn column(&self) -> &'static str {
        match self {
            LookupField::Email => "email",
            LookupField::Username => "username",
        }
    }
}

impl fmt::Display for LookupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("no field \"{0}\" on identity")]
pub struct UnknownLookupField(pub String);

impl std::str::FromStr for LookupField {
    type Err = UnknownLookupField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LookupField::ALL
            .into_iter()
            .find(|field| field.column() == s)
            .ok_or_else(|| UnknownLookupField(s.to_string()))
    }
}
