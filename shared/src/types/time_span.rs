//! Expiry values expressed either as whole seconds or as human-readable text

use serde::{Deserialize, Serialize};
use std::fmt;

/// A relative span of time as supplied by callers or configuration
///
/// Integers are taken as whole seconds. Text such as `"15 seconds"` or `"2h"`
/// is resolved by a duration parser at the point of use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum TimeSpan {
    /// Whole seconds
    Seconds(i64),
    /// Human-readable duration
    Text(String),
}

impl TimeSpan {
    /// Seconds value, if this span needs no parsing
    pub fn as_seconds(&self) -> Option<i64> {
        match self {
            TimeSpan::Seconds(secs) => Some(*secs),
            TimeSpan::Text(_) => None,
        }
    }

    /// Parse an environment or config value: digits become seconds, anything else stays text
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(match trimmed.parse::<i64>() {
            Ok(secs) => TimeSpan::Seconds(secs),
            Err(_) => TimeSpan::Text(trimmed.to_string()),
        })
    }
}

impl From<i64> for TimeSpan {
    fn from(secs: i64) -> Self {
        TimeSpan::Seconds(secs)
    }
}

impl From<&str> for TimeSpan {
    fn from(text: &str) -> Self {
        TimeSpan::Text(text.to_string())
    }
}

impl From<String> for TimeSpan {
    fn from(text: String) -> Self {
        TimeSpan::Text(text)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeSpan::Seconds(secs) => write!(f, "{}s", secs),
            TimeSpan::Text(text) => f.write_str(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_untagged() {
        let secs: TimeSpan = serde_json::from_str("30").unwrap();
        assert_eq!(secs, TimeSpan::Seconds(30));

        let text: TimeSpan = serde_json::from_str("\"10 minutes\"").unwrap();
        assert_eq!(text, TimeSpan::Text("10 minutes".to_string()));
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(TimeSpan::parse_lenient("60"), Some(TimeSpan::Seconds(60)));
        assert_eq!(
            TimeSpan::parse_lenient(" 1 day "),
            Some(TimeSpan::Text("1 day".to_string()))
        );
        assert_eq!(TimeSpan::parse_lenient("   "), None);
    }

    #[test]
    fn test_as_seconds() {
        assert_eq!(TimeSpan::from(5i64).as_seconds(), Some(5));
        assert_eq!(TimeSpan::from("5s").as_seconds(), None);
    }
}
