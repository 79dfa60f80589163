//! Signed-token issuing and verification.
//!
//! Tokens are compact HS256-signed strings carrying a `{user_id}` payload.
//! They are signed, not encrypted: the payload is readable by anyone, only
//! integrity and authenticity are guaranteed. No expiry is set or checked.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned whenever a token cannot be verified: bad signature, wrong
/// algorithm, or malformed payload. Callers get no further detail.
#[derive(Debug, Error)]
#[error("invalid authentication token")]
pub struct InvalidTokenError(#[from] jsonwebtoken::errors::Error);

/// Payload carried by every issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: i64,
}

/// Issues and verifies signed tokens with a secret injected at construction.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens are valid indefinitely once issued.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Produce a signed token for the given user id.
    pub fn issue(&self, user_id: i64) -> Result<String, InvalidTokenError> {
        let claims = Claims { user_id };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        Ok(token)
    }

    /// Verify a token and extract the user id it was issued for.
    ///
    /// Rejects signature mismatches, non-HS256 algorithms, and payloads
    /// missing `user_id`.
    pub fn decode(&self, token: &str) -> Result<i64, InvalidTokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims.user_id)
    }
}

/// Extract the raw token from an `Authorization` header value.
///
/// Accepts the `Token token=<tok>` convention (with or without quotes) as
/// well as plain `Bearer <tok>`.
pub fn credentials(header_value: &str) -> Option<&str> {
    let value = header_value.trim();

    if let Some(rest) = value.strip_prefix("Token ").or(value.strip_prefix("token ")) {
        let token = rest.trim().strip_prefix("token=")?;
        let token = token.trim_matches('"');
        return if token.is_empty() { None } else { Some(token) };
    }

    if let Some(token) = value.strip_prefix("Bearer ") {
        let token = token.trim();
        return if token.is_empty() { None } else { Some(token) };
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_decode_round_trips() {
        let service = TokenService::new("test-secret");

        for user_id in [1, 42, i64::MAX] {
            let token = service.issue(user_id).unwrap();
            assert_eq!(service.decode(&token).unwrap(), user_id);
        }
    }

    #[test]
    fn token_has_three_segments() {
        let service = TokenService::new("test-secret");
        let token = service.issue(7).unwrap();

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn decode_rejects_wrong_secret() {
        let issuer = TokenService::new("secret-a");
        let verifier = TokenService::new("secret-b");

        let token = issuer.issue(1).unwrap();
        assert!(verifier.decode(&token).is_err());
    }

    #[test]
    fn decode_rejects_wrong_algorithm() {
        // HS512-signed token; the service only accepts HS256.
        let claims = Claims { user_id: 1 };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let service = TokenService::new("test-secret");
        assert!(service.decode(&token).is_err());
    }

    #[test]
    fn decode_rejects_malformed_tokens() {
        let service = TokenService::new("test-secret");

        assert!(service.decode("").is_err());
        assert!(service.decode("not-a-token").is_err());
        assert!(service.decode("a.b.c").is_err());
    }

    #[test]
    fn decode_rejects_tampered_payload() {
        let service = TokenService::new("test-secret");
        let token = service.issue(1).unwrap();

        let mut parts: Vec<&str> = token.split('.').collect();
        let other = service.issue(2).unwrap();
        let other_payload: Vec<&str> = other.split('.').collect();
        parts[1] = other_payload[1];

        assert!(service.decode(&parts.join(".")).is_err());
    }

    #[test]
    fn credentials_accepts_token_convention() {
        assert_eq!(credentials("Token token=abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(
            credentials("Token token=\"abc.def.ghi\""),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn credentials_accepts_bearer() {
        assert_eq!(credentials("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    }

    #[test]
    fn credentials_rejects_garbage() {
        assert_eq!(credentials(""), None);
        assert_eq!(credentials("Token"), None);
        assert_eq!(credentials("Token token="), None);
        assert_eq!(credentials("Basic dXNlcjpwYXNz"), None);
    }
}
