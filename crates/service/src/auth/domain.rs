use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Decoded token payload: the caller's identity object plus timing claims.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    #[serde(flatten)]
    pub identity: Map<String, Value>,
    pub iat: i64,
    pub exp: i64,
}

impl TokenClaims {
    pub fn email(&self) -> Option<&str> {
        self.identity.get("email").and_then(Value::as_str)
    }
}
