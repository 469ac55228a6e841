//! Boolean parsing for form-encoded flags.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid boolean value: {0:?}")]
pub struct FlagError(pub String);

/// Parse a form flag.
///
/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_flag(value: &str) -> Result<bool, FlagError> {
    match value {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        other => Err(FlagError(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        for v in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_flag(v), Ok(true), "value {}", v);
        }
    }

    #[test]
    fn test_falsy_values() {
        for v in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_flag(v), Ok(false), "value {}", v);
        }
    }

    #[test]
    fn test_rejects_other_spellings() {
        assert!(parse_flag("yes").is_err());
        assert!(parse_flag("tRuE").is_err());
        assert!(parse_flag("").is_err());
        assert_eq!(parse_flag("2"), Err(FlagError("2".to_string())));
    }
}
