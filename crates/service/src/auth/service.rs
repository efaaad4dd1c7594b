use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde_json::Value;
use tracing::{debug, instrument};

use super::domain::TokenClaims;
use super::errors::AuthError;

/// Signs and verifies bearer tokens with a shared secret.
///
/// Issuance does not authenticate the claimed identity: whoever calls `/jwt`
/// gets a token for the email they post.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// Issue a token for `identity`, which must be a JSON object.
    ///
    /// # Examples
    /// ```
    /// use service::auth::TokenService;
    /// let tokens = TokenService::new("secret", 3600);
    /// let token = tokens.issue(serde_json::json!({"email": "u@x.com"})).unwrap();
    /// let claims = tokens.verify(&token).unwrap();
    /// assert_eq!(claims.email(), Some("u@x.com"));
    /// ```
    pub fn issue(&self, identity: Value) -> Result<String, AuthError> {
        self.issue_at(identity, chrono::Utc::now().timestamp())
    }

    /// Issue a token as if signed at `issued_at` (unix seconds).
    #[instrument(skip(self, identity))]
    pub fn issue_at(&self, identity: Value, issued_at: i64) -> Result<String, AuthError> {
        let Value::Object(mut identity) = identity else {
            return Err(AuthError::Validation("token payload must be a JSON object".into()));
        };
        identity.remove("iat");
        identity.remove("exp");
        let claims = TokenClaims {
            identity,
            iat: issued_at,
            exp: issued_at.saturating_add(self.ttl_secs),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Check signature and expiry. Any failure collapses to `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        // `aud` is caller-supplied identity data here, not an audience restriction
        validation.validate_aud = false;
        decode::<TokenClaims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(err = %e, "token rejected");
                AuthError::Unauthorized
            })
    }
}
