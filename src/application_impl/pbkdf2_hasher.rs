use crate::application_port::*;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::Sha256;
use subtle::ConstantTimeEq;

pub const MIN_PASSWORD_LEN: usize = 4;
const ROUNDS: u32 = 100_000;
const KEY_LEN: usize = 32;
const SALT_LEN: usize = 32;
/// Hex width of the salt at the end of a hash record.
const SALT_HEX_LEN: usize = SALT_LEN * 2;

fn derive(password: &str, salt: &[u8]) -> [u8; KEY_LEN] {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, ROUNDS, &mut key);
    key
}

/// Hash `password` into a `hex(derived key) || hex(salt)` record.
pub fn make_password(password: &str) -> Result<String, AuthError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::Validation(format!(
            "password length must be >= {}",
            MIN_PASSWORD_LEN
        )));
    }

    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let key = derive(password, &salt);

    Ok(format!("{}{}", hex::encode(key), hex::encode(salt)))
}

/// Re-derive `password` with the salt stored in `record` and compare the whole record.
pub fn check_password(password: &str, record: &str) -> bool {
    if record.len() < SALT_HEX_LEN || !record.is_char_boundary(record.len() - SALT_HEX_LEN) {
        return false;
    }
    let Ok(salt) = hex::decode(&record[record.len() - SALT_HEX_LEN..]) else {
        return false;
    };

    let key = derive(password, &salt);
    let candidate = format!("{}{}", hex::encode(key), hex::encode(&salt));
    candidate.as_bytes().ct_eq(record.as_bytes()).into()
}

/// PBKDF2-HMAC-SHA256 hasher. Derivation runs on the blocking pool.
pub struct Pbkdf2PasswordHasher;

#[async_trait::async_trait]
impl CredentialHasher for Pbkdf2PasswordHasher {
    async fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || make_password(&password))
            .await
            .map_err(|e| AuthError::InternalError(e.to_string()))?
    }

    async fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, AuthError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        tokio::task::spawn_blocking(move || check_password(&password, &password_hash))
            .await
            .map_err(|e| AuthError::InternalError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_is_fixed_width_hex_with_trailing_salt() {
        let record = make_password("test").unwrap();
        assert_eq!(record.len(), 128);
        assert!(record.chars().all(|c| c.is_ascii_hexdigit()));

        let other = make_password("test").unwrap();
        assert_ne!(record[64..], other[64..]);
        assert_ne!(record, other);
    }

    #[test]
    fn verify_accepts_the_original_password() {
        for password in ["test", "correct horse battery staple", "пароль"] {
            let record = make_password(password).unwrap();
            assert!(check_password(password, &record), "{password}");
        }
    }

    #[test]
    fn verify_rejects_single_character_mutations() {
        let record = make_password("secret").unwrap();
        for candidate in ["secreT", "Secret", "secre", "secrett", "sucret"] {
            assert!(!check_password(candidate, &record), "{candidate}");
        }
    }

    #[test]
    fn short_passwords_are_a_validation_error() {
        for password in ["", "a", "abc"] {
            let err = make_password(password).unwrap_err();
            assert!(matches!(err, AuthError::Validation(_)));
        }
        assert!(make_password("abcd").is_ok());
    }

    #[test]
    fn malformed_records_never_verify() {
        assert!(!check_password("test", ""));
        assert!(!check_password("test", "abc"));
        assert!(!check_password("test", &"z".repeat(128)));
        let mut record = make_password("test").unwrap();
        record.replace_range(0..1, if record.starts_with('0') { "1" } else { "0" });
        assert!(!check_password("test", &record));
    }

    #[test]
    fn verify_compares_the_full_record() {
        let record = make_password("test").unwrap();
        let key = &record[..64];
        let salt = &record[64..];

        // trailing garbage or a truncated key changes the record length
        assert!(!check_password("test", &format!("{record}{salt}")));
        assert!(!check_password("test", &format!("{}{salt}", &key[..62])));
        assert!(check_password("test", &format!("{key}{salt}")));
    }

    #[tokio::test]
    async fn async_hasher_round_trips() {
        let hasher = Pbkdf2PasswordHasher;
        let record = hasher.hash_password("test").await.unwrap();
        assert!(hasher.verify_password("test", &record).await.unwrap());
        assert!(!hasher.verify_password("fail", &record).await.unwrap());
        assert!(hasher.hash_password("abc").await.is_err());
    }
}
