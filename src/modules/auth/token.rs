use jsonwebtoken::{
    decode, decode_header, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header,
    Validation,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use time::{Duration, OffsetDateTime};

/// Sessions last one day; there is no refresh, the user logs in again.
pub const TOKEN_TTL: Duration = Duration::hours(24);

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,
    #[error("Token has expired")]
    Expired,
    #[error("Unexpected signing method: {0:?}")]
    UnexpectedSigningMethod(Algorithm),
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies stateless HS256 session tokens.
///
/// Verification needs nothing but the secret: there is no token store.
/// The `*_at` variants take the current time explicitly so expiry can be
/// exercised without waiting a day.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: TOKEN_TTL,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue_at(user_id, OffsetDateTime::now_utc())
    }

    pub fn issue_at(&self, user_id: i64, now: OffsetDateTime) -> Result<String, TokenError> {
        let claims = TokenClaims {
            user_id,
            iat: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
        };

        encode(&Header::new(SIGNING_ALGORITHM), &claims, &self.encoding).map_err(TokenError::Signing)
    }

    /// Returns the user id embedded in a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<i64, TokenError> {
        self.verify_at(token, OffsetDateTime::now_utc())
    }

    pub fn verify_at(&self, token: &str, now: OffsetDateTime) -> Result<i64, TokenError> {
        // Refuse anything not signed the way we sign, before touching the key.
        let header = decode_header(token).map_err(|_| TokenError::Invalid)?;
        if header.alg != SIGNING_ALGORITHM {
            return Err(TokenError::UnexpectedSigningMethod(header.alg));
        }

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp"]);

        let claims = decode::<TokenClaims>(token, &self.decoding, &validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidAlgorithm => TokenError::UnexpectedSigningMethod(header.alg),
                _ => TokenError::Invalid,
            })?
            .claims;

        // Expiry is checked against the caller's clock, with no leeway.
        if now.unix_timestamp() >= claims.exp {
            return Err(TokenError::Expired);
        }
        if claims.user_id <= 0 {
            return Err(TokenError::Invalid);
        }

        Ok(claims.user_id)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-minimum-32-characters-long";

    fn service() -> TokenService {
        TokenService::new(SECRET)
    }

    #[test]
    fn verify_returns_issued_user_id() {
        let tokens = service();
        let token = tokens.issue(42).unwrap();

        assert_eq!(tokens.verify(&token).unwrap(), 42);
    }

    #[test]
    fn claims_span_exactly_one_day() {
        let now = OffsetDateTime::now_utc();
        let token = service().issue_at(5, now).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        let claims = decode::<TokenClaims>(&token, &DecodingKey::from_secret(SECRET.as_bytes()), &validation)
            .unwrap()
            .claims;

        assert_eq!(claims.user_id, 5);
        assert_eq!(claims.iat, now.unix_timestamp());
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn token_is_valid_until_the_last_second() {
        let tokens = service();
        let issued = OffsetDateTime::now_utc();
        let token = tokens.issue_at(9, issued).unwrap();

        let almost = issued + TOKEN_TTL - Duration::seconds(1);
        assert_eq!(tokens.verify_at(&token, almost).unwrap(), 9);

        let at_expiry = issued + TOKEN_TTL;
        assert!(matches!(tokens.verify_at(&token, at_expiry), Err(TokenError::Expired)));
    }

    #[test]
    fn token_from_yesterday_is_expired() {
        let tokens = service();
        let issued = OffsetDateTime::now_utc() - Duration::hours(25);
        let token = tokens.issue_at(3, issued).unwrap();

        assert!(matches!(tokens.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = TokenService::new("some-other-secret-that-is-also-long-enough")
            .issue(1)
            .unwrap();

        assert!(matches!(service().verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let tokens = service();
        let token = tokens.issue(1).unwrap();

        let (unsigned, signature) = token.rsplit_once('.').unwrap();
        let mut chars: Vec<char> = signature.chars().collect();
        chars[5] = if chars[5] == 'A' { 'B' } else { 'A' };
        let tampered = format!("{}.{}", unsigned, chars.into_iter().collect::<String>());

        assert!(matches!(tokens.verify(&tampered), Err(TokenError::Invalid)));
    }

    #[test]
    fn other_algorithm_is_rejected_even_with_the_right_secret() {
        let now = OffsetDateTime::now_utc();
        let claims = TokenClaims {
            user_id: 1,
            iat: now.unix_timestamp(),
            exp: (now + Duration::hours(1)).unix_timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            service().verify(&token),
            Err(TokenError::UnexpectedSigningMethod(Algorithm::HS512))
        ));
    }

    #[test]
    fn malformed_input_is_invalid() {
        let tokens = service();
        for garbage in ["", "abc", "a.b.c", "Bearer xyz"] {
            assert!(matches!(tokens.verify(garbage), Err(TokenError::Invalid)), "{garbage}");
        }
    }

    #[test]
    fn debug_does_not_print_secret() {
        let rendered = format!("{:?}", service());
        assert!(!rendered.contains(SECRET));
    }
}
