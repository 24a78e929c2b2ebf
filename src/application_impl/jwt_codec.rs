use crate::application_port::*;
use crate::domain_model::*;
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::Value;
use std::time::Duration;

/// Sign `claims` with an expiry of now + `lifetime`.
pub fn generate_jwt(
    claims: &Claims,
    lifetime: Duration,
    secret: &[u8],
    algorithm: Algorithm,
) -> Result<String, AuthError> {
    let mut to_encode = claims.clone();
    let exp = i64::try_from(lifetime.as_secs())
        .ok()
        .and_then(|secs| Utc::now().timestamp().checked_add(secs))
        .ok_or_else(|| {
            AuthError::InternalError(format!("token lifetime out of range: {lifetime:?}"))
        })?;
    to_encode.insert(CLAIM_EXPIRY.to_string(), Value::from(exp));

    encode(
        &Header::new(algorithm),
        &to_encode,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| AuthError::InternalError(e.to_string()))
}

/// Verify signature and expiry of `token` and return its claims.
///
/// A token whose `exp` is at or before the current second is expired. With `soft` set an
/// expired token is still accepted, a bad signature never is.
pub fn decode_jwt(
    token: &str,
    secret: &[u8],
    algorithm: Algorithm,
    soft: bool,
) -> Result<Claims, AuthError> {
    let mut v = Validation::new(algorithm);
    v.validate_exp = false;
    v.validate_aud = false;
    v.leeway = 0;
    v.set_required_spec_claims(&[CLAIM_EXPIRY]);

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &v)
        .map_err(|_| AuthError::TokenInvalid)?;
    let claims = data.claims;

    let exp = claims
        .get(CLAIM_EXPIRY)
        .and_then(Value::as_i64)
        .ok_or(AuthError::TokenInvalid)?;
    if !soft && exp <= Utc::now().timestamp() {
        return Err(AuthError::TokenExpired);
    }

    Ok(claims)
}

/// Read the subject claim as an identity id.
pub fn subject_of(claims: &Claims) -> Result<UserId, AuthError> {
    claims
        .get(CLAIM_SUBJECT)
        .and_then(Value::as_str)
        .ok_or(AuthError::TokenInvalid)?
        .parse::<UserId>()
        .map_err(|_| AuthError::TokenInvalid)
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub access_secret: Vec<u8>,
    pub refresh_secret: Vec<u8>,
    pub algorithm: Algorithm,
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl Default for JwtConfig {
    fn default() -> Self {
        JwtConfig {
            access_secret: b"JWT".to_vec(),
            refresh_secret: b"JWT".to_vec(),
            algorithm: Algorithm::HS256,
            access_ttl: Duration::from_secs(60 * 60 * 24 * 7), // 7 days
            refresh_ttl: Duration::from_secs(60 * 60),         // 1 hour
        }
    }
}

pub struct JwtCodec {
    cfg: JwtConfig,
}

impl JwtCodec {
    pub fn new(cfg: JwtConfig) -> Self {
        JwtCodec { cfg }
    }

    #[inline]
    fn gen_jti() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    fn base_claims(user: UserId) -> Claims {
        let mut claims = Claims::new();
        claims.insert(CLAIM_SUBJECT.to_string(), Value::from(user.to_string()));
        claims.insert(CLAIM_TOKEN_ID.to_string(), Value::from(Self::gen_jti()));
        claims
    }
}

impl TokenCodec for JwtCodec {
    fn issue_access_token(&self, user: UserId, extra: Claims) -> Result<AccessToken, AuthError> {
        let mut claims = Claims::new();
        for (key, value) in extra {
            if !RESERVED_CLAIMS.contains(&key.as_str()) {
                claims.insert(key, value);
            }
        }
        claims.extend(Self::base_claims(user));

        let token = generate_jwt(
            &claims,
            self.cfg.access_ttl,
            &self.cfg.access_secret,
            self.cfg.algorithm,
        )?;
        Ok(AccessToken(token))
    }

    fn issue_refresh_token(&self, user: UserId) -> Result<RefreshToken, AuthError> {
        let token = generate_jwt(
            &Self::base_claims(user),
            self.cfg.refresh_ttl,
            &self.cfg.refresh_secret,
            self.cfg.algorithm,
        )?;
        Ok(RefreshToken(token))
    }

    fn verify_access_token(&self, token: &AccessToken) -> Result<Claims, AuthError> {
        decode_jwt(&token.0, &self.cfg.access_secret, self.cfg.algorithm, false)
    }

    fn verify_refresh_token(&self, token: &RefreshToken, soft: bool) -> Result<Claims, AuthError> {
        decode_jwt(&token.0, &self.cfg.refresh_secret, self.cfg.algorithm, soft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SECRET: &[u8] = b"test-secret";

    fn claims_for(sub: &str) -> Claims {
        let mut claims = Claims::new();
        claims.insert("sub".to_string(), json!(sub));
        claims.insert("role".to_string(), json!("admin"));
        claims.insert("level".to_string(), json!(3));
        claims
    }

    #[test]
    fn decode_returns_original_claims_plus_expiry() {
        let claims = claims_for("1");
        for alg in [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512] {
            let token = generate_jwt(&claims, Duration::from_secs(60), SECRET, alg).unwrap();
            let decoded = decode_jwt(&token, SECRET, alg, false).unwrap();

            for (key, value) in &claims {
                assert_eq!(decoded.get(key), Some(value));
            }
            let exp = decoded.get("exp").and_then(Value::as_i64).unwrap();
            assert!(exp > Utc::now().timestamp());
            assert_eq!(decoded.len(), claims.len() + 1);
        }
    }

    #[test]
    fn zero_lifetime_is_expired_unless_soft() {
        let token = generate_jwt(&claims_for("1"), Duration::ZERO, SECRET, Algorithm::HS256)
            .unwrap();

        let err = decode_jwt(&token, SECRET, Algorithm::HS256, false).unwrap_err();
        assert!(matches!(err, AuthError::TokenExpired));

        let claims = decode_jwt(&token, SECRET, Algorithm::HS256, true).unwrap();
        assert_eq!(subject_of(&claims).unwrap(), UserId(1));
    }

    #[test]
    fn out_of_range_lifetime_is_an_error() {
        for secs in [u64::MAX, i64::MAX as u64] {
            let err = generate_jwt(
                &claims_for("1"),
                Duration::from_secs(secs),
                SECRET,
                Algorithm::HS256,
            )
            .unwrap_err();
            assert!(matches!(err, AuthError::InternalError(_)), "{secs}");
        }
    }

    #[test]
    fn wrong_secret_is_rejected_even_when_soft() {
        let token =
            generate_jwt(&claims_for("1"), Duration::from_secs(60), SECRET, Algorithm::HS256)
                .unwrap();

        for soft in [false, true] {
            let err = decode_jwt(&token, b"other-secret", Algorithm::HS256, soft).unwrap_err();
            assert!(matches!(err, AuthError::TokenInvalid));
        }
    }

    #[test]
    fn algorithm_mismatch_is_rejected() {
        let token =
            generate_jwt(&claims_for("1"), Duration::from_secs(60), SECRET, Algorithm::HS512)
                .unwrap();
        let err = decode_jwt(&token, SECRET, Algorithm::HS256, false).unwrap_err();
        assert!(matches!(err, AuthError::TokenInvalid));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        for token in ["", "not-a-token", "a.b.c", "eyJhbGciOiJIUzI1NiJ9.e30."] {
            let err = decode_jwt(token, SECRET, Algorithm::HS256, true).unwrap_err();
            assert!(matches!(err, AuthError::TokenInvalid), "{token}");
        }
    }

    #[test]
    fn subject_must_be_numeric_string() {
        assert_eq!(subject_of(&claims_for("15")).unwrap(), UserId(15));
        assert!(subject_of(&claims_for("bob")).is_err());
        assert!(subject_of(&Claims::new()).is_err());
    }

    #[test]
    fn codec_keeps_access_and_refresh_secrets_apart() {
        let codec = JwtCodec::new(JwtConfig {
            access_secret: b"access".to_vec(),
            refresh_secret: b"refresh".to_vec(),
            ..JwtConfig::default()
        });

        let access = codec.issue_access_token(UserId(1), Claims::new()).unwrap();
        let refresh = codec.issue_refresh_token(UserId(1)).unwrap();

        assert!(codec.verify_access_token(&access).is_ok());
        assert!(codec.verify_refresh_token(&refresh, false).is_ok());
        assert!(
            codec
                .verify_refresh_token(&RefreshToken(access.0.clone()), false)
                .is_err()
        );
        assert!(codec.verify_access_token(&AccessToken(refresh.0)).is_err());
    }

    #[test]
    fn extra_claims_cannot_override_reserved_ones() {
        let codec = JwtCodec::new(JwtConfig::default());
        let mut extra = Claims::new();
        extra.insert("sub".to_string(), json!("999"));
        extra.insert("exp".to_string(), json!(0));
        extra.insert("email".to_string(), json!("test@test.com"));

        let access = codec.issue_access_token(UserId(1), extra).unwrap();
        let claims = codec.verify_access_token(&access).unwrap();

        assert_eq!(subject_of(&claims).unwrap(), UserId(1));
        assert_eq!(claims.get("email"), Some(&json!("test@test.com")));
    }

    #[test]
    fn refresh_tokens_are_unique_within_the_same_second() {
        let codec = JwtCodec::new(JwtConfig::default());
        let a = codec.issue_refresh_token(UserId(1)).unwrap();
        let b = codec.issue_refresh_token(UserId(1)).unwrap();
        assert_ne!(a, b);
    }
}
