use once_cell::sync::Lazy;
use regex::Regex;

/// Input validation utilities for the auth service

// Compile regex patterns once at startup
static USER_ID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9_]{5,11}$").expect("hardcoded user id regex is invalid")
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("hardcoded email regex is invalid")
});

/// Validate user id format (6-12 characters, first alphabetic, then
/// alphanumeric or underscore)
pub fn validate_user_id(id: &str) -> bool {
    USER_ID_REGEX.is_match(id)
}

/// Validate email format (RFC 5322 simplified)
pub fn validate_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= 254 && EMAIL_REGEX.is_match(email)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_user_id() {
        assert!(validate_user_id("alice01"));
        assert!(validate_user_id("test12345"));
        assert!(validate_user_id("a12345"));
        assert!(validate_user_id("abcdef789012"));
    }

    #[test]
    fn test_invalid_user_id() {
        assert!(!validate_user_id("short")); // Too short
        assert!(!validate_user_id("waytoolongident1")); // Too long
        assert!(!validate_user_id("1alice2")); // Starts with a digit
        assert!(!validate_user_id("alice 1")); // Invalid character
        assert!(!validate_user_id(""));
    }

    #[test]
    fn test_valid_email() {
        assert!(validate_email("user@example.com"));
        assert!(validate_email("a@x.com"));
        assert!(validate_email("test.user+tag@sub.example.co.uk"));
    }

    #[test]
    fn test_invalid_email() {
        assert!(!validate_email("invalid"));
        assert!(!validate_email("@example.com"));
        assert!(!validate_email("user@"));
        assert!(!validate_email("a b@x.com"));
    }
}
