//! Presence and type checks applied to forms before anything is submitted.
//!
//! Cross-field business rules belong to the backend and are not repeated here.

use crate::errors::ConsoleError;

/// Returns the trimmed value, or `message` when it is blank.
pub fn required(value: Option<&str>, message: &str) -> Result<String, ConsoleError> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ConsoleError::validation(message)),
    }
}

pub fn required_value<T>(value: Option<T>, message: &str) -> Result<T, ConsoleError> {
    value.ok_or_else(|| ConsoleError::validation(message))
}

/// Loose shape check: one `@` with something on both sides and a dot in the domain.
pub fn email(value: &str, message: &str) -> Result<(), ConsoleError> {
    let valid = match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
                && !value.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ConsoleError::validation(message))
    }
}

pub fn max_chars(value: &str, max: usize, message: &str) -> Result<(), ConsoleError> {
    if value.chars().count() > max {
        Err(ConsoleError::validation(message))
    } else {
        Ok(())
    }
}

pub fn min_chars(value: &str, min: usize, message: &str) -> Result<(), ConsoleError> {
    if value.chars().count() < min {
        Err(ConsoleError::validation(message))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_counts_as_missing() {
        assert!(required(None, "falta").is_err());
        assert!(required(Some("   "), "falta").is_err());
        assert_eq!(required(Some(" DIR-003 "), "falta").unwrap(), "DIR-003");
    }

    #[test]
    fn email_shape() {
        assert!(email("ana.mora@empresa.com", "x").is_ok());
        assert!(email("ana.mora@empresa", "x").is_err());
        assert!(email("@empresa.com", "x").is_err());
        assert!(email("ana mora@empresa.com", "x").is_err());
        assert!(email("ana@@empresa.com", "x").is_err());
    }

    #[test]
    fn length_limits_count_characters() {
        assert!(max_chars("ñandú", 5, "x").is_ok());
        assert!(max_chars("ñandúes", 5, "x").is_err());
        assert!(min_chars("12345", 6, "x").is_err());
    }
}
