//! Human-readable duration parsing

use jr_shared::TimeSpan;

use crate::errors::SessionError;

/// Parses text such as `"15 seconds"` into milliseconds
pub trait DurationParser: Send + Sync {
    /// Milliseconds represented by `text`, or `None` if it is not a duration
    fn parse_millis(&self, text: &str) -> Option<i64>;
}

/// Parser backed by `humantime`
///
/// Accepts `"15 seconds"`, `"2h"`, `"1 day 12h"` and friends. A bare number
/// is read as milliseconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct HumantimeParser;

impl DurationParser for HumantimeParser {
    fn parse_millis(&self, text: &str) -> Option<i64> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Ok(millis) = trimmed.parse::<f64>() {
            return millis.is_finite().then(|| millis.floor() as i64);
        }

        humantime::parse_duration(trimmed)
            .ok()
            .and_then(|duration| i64::try_from(duration.as_millis()).ok())
    }
}

/// Resolve a span to whole seconds
///
/// Text is parsed to milliseconds and floored, never rounded: `"1999ms"`
/// is one second.
pub fn resolve_seconds(parser: &dyn DurationParser, span: &TimeSpan) -> Result<i64, SessionError> {
    match span {
        TimeSpan::Seconds(seconds) => Ok(*seconds),
        TimeSpan::Text(text) => parser
            .parse_millis(text)
            .map(|millis| millis.div_euclid(1000))
            .ok_or_else(|| SessionError::InvalidDuration {
                value: text.clone(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_human_strings() {
        let parser = HumantimeParser;
        assert_eq!(parser.parse_millis("15 seconds"), Some(15_000));
        assert_eq!(parser.parse_millis("10 seconds"), Some(10_000));
        assert_eq!(parser.parse_millis("2h"), Some(7_200_000));
        assert_eq!(parser.parse_millis("1 day"), Some(86_400_000));
        assert_eq!(parser.parse_millis("1500ms"), Some(1_500));
    }

    #[test]
    fn test_bare_numbers_are_milliseconds() {
        let parser = HumantimeParser;
        assert_eq!(parser.parse_millis("2500"), Some(2_500));
        assert_eq!(parser.parse_millis(" 100 "), Some(100));
    }

    #[test]
    fn test_invalid_strings() {
        let parser = HumantimeParser;
        assert_eq!(parser.parse_millis(""), None);
        assert_eq!(parser.parse_millis("soon"), None);
        assert_eq!(parser.parse_millis("10 fortnights"), None);
    }

    #[test]
    fn test_resolve_seconds_floors() {
        let parser = HumantimeParser;
        assert_eq!(resolve_seconds(&parser, &TimeSpan::from("1999ms")).unwrap(), 1);
        assert_eq!(resolve_seconds(&parser, &TimeSpan::from("999")).unwrap(), 0);
        assert_eq!(resolve_seconds(&parser, &TimeSpan::from("15 seconds")).unwrap(), 15);
        assert_eq!(resolve_seconds(&parser, &TimeSpan::from(42i64)).unwrap(), 42);
    }

    #[test]
    fn test_resolve_seconds_rejects_garbage() {
        let err = resolve_seconds(&HumantimeParser, &TimeSpan::from("whenever")).unwrap_err();
        assert_eq!(
            err,
            SessionError::InvalidDuration {
                value: "whenever".to_string()
            }
        );
    }
}
