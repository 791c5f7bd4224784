//! Pure validation and normalization rules for customer input. Everything in
//! this module is a plain function over strings; nothing here touches the
//! database, which keeps the rules trivially testable and gives the front
//! end a single source of truth for form feedback.

use once_cell::sync::Lazy;
use regex::Regex;

/// Shape check for non-empty emails: local part, domain, and TLD with no
/// embedded whitespace or stray `@`. Deliberately simple; this is a data
/// hygiene gate, not RFC 5322.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid"));

/// Strip every non-digit character from a raw phone string, producing the
/// digit-only phone key. Applied to every phone value before it is used as a
/// lookup key or primary key.
///
/// `normalize_phone("(555) 123-4567")` yields `"5551234567"`.
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// A normalized phone is valid iff it is all digits and 7 to 11 digits long.
/// Callers are expected to pass the output of [`normalize_phone`]; anything
/// with residual non-digits fails outright.
pub fn is_valid_phone(phone: &str) -> bool {
    (7..=11).contains(&phone.len()) && phone.chars().all(|c| c.is_ascii_digit())
}

/// Check an email field, returning `None` when acceptable and a message the
/// front end can show verbatim otherwise. Empty is always fine because the
/// field is optional.
pub fn email_error(email: &str) -> Option<String> {
    if email.is_empty() || EMAIL_RE.is_match(email) {
        None
    } else {
        Some(format!(
            "'{email}' is not a valid email (expected name@example.com)"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_every_non_digit() {
        assert_eq!(normalize_phone("(555) 123-4567"), "5551234567");
        assert_eq!(normalize_phone("+1 800 555 0199"), "18005550199");
        assert_eq!(normalize_phone("no digits here"), "");
    }

    #[test]
    fn phone_length_bounds_are_inclusive() {
        assert!(!is_valid_phone("123456"));
        assert!(is_valid_phone("1234567"));
        assert!(is_valid_phone("12345678901"));
        assert!(!is_valid_phone("123456789012"));
    }

    #[test]
    fn phone_with_residual_punctuation_is_invalid() {
        assert!(!is_valid_phone("555-1234"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn empty_email_is_acceptable() {
        assert_eq!(email_error(""), None);
    }

    #[test]
    fn shaped_emails_pass() {
        assert_eq!(email_error("a@b.c"), None);
        assert_eq!(email_error("jane.doe@example.co.uk"), None);
    }

    #[test]
    fn malformed_emails_get_a_description() {
        assert!(email_error("not-an-email").is_some());
        assert!(email_error("missing@tld").is_some());
        assert!(email_error("spaces in@local.part").is_some());
        assert!(email_error("@example.com").is_some());
    }
}
