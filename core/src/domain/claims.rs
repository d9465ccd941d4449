//! Token claims: the signed payload of a session token.

use jsonwebtoken::Header;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JWT ID claim
pub const JTI: &str = "jti";

/// Signature-enforced absolute expiry (UNIX seconds)
pub const EXP: &str = "exp";

/// Registry-only relative expiry (seconds), never enforced by signature checks
pub const EXPK: &str = "expk";

/// Issued-at timestamp
pub const IAT: &str = "iat";

/// Not-before timestamp
pub const NBF: &str = "nbf";

/// Claims mapping carried by a token
///
/// Only `jti`, `exp`, `expk`, `iat` and `nbf` are interpreted. Every other
/// field is caller data and passes through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// String claim, if present and a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Session id; empty strings count as absent
    pub fn jti(&self) -> Option<&str> {
        self.get_str(JTI).filter(|jti| !jti.is_empty())
    }

    pub fn exp(&self) -> Option<i64> {
        self.numeric(EXP)
    }

    pub fn expk(&self) -> Option<i64> {
        self.numeric(EXPK)
    }

    pub fn iat(&self) -> Option<i64> {
        self.numeric(IAT)
    }

    pub fn nbf(&self) -> Option<i64> {
        self.numeric(NBF)
    }

    pub fn set_expk(&mut self, seconds: i64) {
        self.0.insert(EXPK.to_string(), Value::from(seconds));
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    // Fractional timestamps are floored to whole seconds.
    fn numeric(&self, key: &str) -> Option<i64> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.floor() as i64)),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for Claims {
    type Error = serde_json::Error;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

/// Token split into its three parts, from a decode in complete mode
#[derive(Debug, Clone)]
pub struct CompleteToken {
    pub header: Header,
    pub payload: Claims,
    /// Raw base64url signature segment
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recognized_claims() {
        let claims = Claims::try_from(json!({
            "userId": "1",
            "jti": "abc",
            "exp": 1700000000,
            "expk": 15,
            "iat": 1699999000.7,
        }))
        .unwrap();

        assert_eq!(claims.jti(), Some("abc"));
        assert_eq!(claims.exp(), Some(1700000000));
        assert_eq!(claims.expk(), Some(15));
        assert_eq!(claims.iat(), Some(1699999000));
        assert_eq!(claims.nbf(), None);
        assert_eq!(claims.get_str("userId"), Some("1"));
    }

    #[test]
    fn test_empty_jti_is_absent() {
        let claims = Claims::new().with("jti", "");
        assert_eq!(claims.jti(), None);

        let claims = Claims::new().with("jti", 42);
        assert_eq!(claims.jti(), None);
    }

    #[test]
    fn test_non_numeric_expiry_is_ignored() {
        let claims = Claims::new().with("exp", "tomorrow");
        assert_eq!(claims.exp(), None);
    }

    #[test]
    fn test_set_expk_and_serialize() {
        let mut claims = Claims::new().with("userId", "1");
        claims.set_expk(30);

        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value, json!({"userId": "1", "expk": 30}));
    }

    #[test]
    fn test_try_from_rejects_non_objects() {
        assert!(Claims::try_from(json!([1, 2, 3])).is_err());
    }
}
