//! Field validators.
//!
//! Pure functions mapping raw field values to pass/fail plus a user-facing
//! message. Validators are field-local and cheap; flows re-run them on every
//! value change and on blur, and gate message *display* (not evaluation) on
//! whether a submit has been attempted.

use std::sync::LazyLock;

use regex::Regex;

/// Shown when a required email field is empty.
pub const EMAIL_REQUIRED: &str = "Email is Required";
/// Shown when an email does not match the email grammar.
pub const INVALID_EMAIL: &str = "Invalid Email";
/// Shown when a required password field is empty.
pub const PASSWORD_REQUIRED: &str = "Password is Required";
/// Shown when a password is shorter than the minimum length.
pub const PASSWORD_TOO_SHORT: &str = "Password Too Short";
/// Shown when a password misses a required character class.
pub const PASSWORD_TOO_WEAK: &str = "Password Too Weak";
/// Shown when the registration first name is empty.
pub const FIRST_NAME_REQUIRED: &str = "First Name is required";
/// Shown when the registration last name is empty.
pub const LAST_NAME_REQUIRED: &str = "Last Name is required";
/// Shown when a non-empty phone number fails either phone check.
pub const PHONE_INVALID: &str = "Phone Number is not valid";

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;
/// Symbols accepted by the password strength rule.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*";
/// Digit counts accepted by the generic phone shape check.
const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 7..=15;

/// Phone pattern tolerant of a leading country code, parentheses, and
/// optional space/dash separators between groups.
static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(\+?\d{0,4})?\s?-?\s?(\(?\d{3}\)?)\s?-?\s?(\(?\d{3}\)?)\s?-?\s?(\(?\d{4}\)?)?$",
    )
    .expect("Invalid regex")
});

/// A failed validation carries only the message to display.
pub type FieldResult = Result<(), &'static str>;

/// Validate a required email field (Login, Registration).
///
/// # Errors
///
/// Returns [`EMAIL_REQUIRED`] when empty, [`INVALID_EMAIL`] when the value
/// does not parse as an email.
pub fn email(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err(EMAIL_REQUIRED);
    }
    driftwood_core::Email::parse(value)
        .map(|_| ())
        .map_err(|_| INVALID_EMAIL)
}

/// Validate a registration password.
///
/// Two-stage: the length rule is checked first so a short-but-weak password
/// reads as too short, not too weak.
///
/// # Errors
///
/// Returns [`PASSWORD_REQUIRED`], [`PASSWORD_TOO_SHORT`], or
/// [`PASSWORD_TOO_WEAK`].
pub fn password(value: &str) -> FieldResult {
    if value.is_empty() {
        return Err(PASSWORD_REQUIRED);
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PASSWORD_TOO_SHORT);
    }

    let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_symbol = value.chars().any(|c| PASSWORD_SYMBOLS.contains(c));

    if has_lower && has_upper && has_digit && has_symbol {
        Ok(())
    } else {
        Err(PASSWORD_TOO_WEAK)
    }
}

/// Validate the registration first name (required, non-empty).
///
/// # Errors
///
/// Returns [`FIRST_NAME_REQUIRED`] when empty.
pub fn required_first_name(value: &str) -> FieldResult {
    if value.trim().is_empty() {
        Err(FIRST_NAME_REQUIRED)
    } else {
        Ok(())
    }
}

/// Validate the registration last name (required, non-empty).
///
/// # Errors
///
/// Returns [`LAST_NAME_REQUIRED`] when empty.
pub fn required_last_name(value: &str) -> FieldResult {
    if value.trim().is_empty() {
        Err(LAST_NAME_REQUIRED)
    } else {
        Ok(())
    }
}

/// Validate an optional name field (Profile Edit first/last name).
///
/// Always passes; the edit form allows clearing either part. Kept as a
/// named validator so the field wiring reads uniformly across flows.
///
/// # Errors
///
/// None today.
pub fn optional_name(_value: &str) -> FieldResult {
    Ok(())
}

/// Validate an optional phone number (Profile Edit).
///
/// Empty is valid. A non-empty value must pass two composed checks: a
/// generic digit-shape check (7-15 digits once separators are stripped) and
/// the grouped pattern; either failing invalidates the field.
///
/// # Errors
///
/// Returns [`PHONE_INVALID`].
pub fn phone(value: &str) -> FieldResult {
    if value.is_empty() {
        return Ok(());
    }

    let digits = value.chars().filter(char::is_ascii_digit).count();
    if !PHONE_DIGITS.contains(&digits) {
        return Err(PHONE_INVALID);
    }

    let stripped: String = value
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')' | '+'))
        .collect();
    if !stripped.chars().all(|c| c.is_ascii_digit()) {
        return Err(PHONE_INVALID);
    }

    if PHONE_PATTERN.is_match(value) {
        Ok(())
    } else {
        Err(PHONE_INVALID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_required() {
        assert_eq!(email(""), Err(EMAIL_REQUIRED));
    }

    #[test]
    fn test_email_grammar() {
        assert_eq!(email("ada@example.com"), Ok(()));
        assert_eq!(email("ada+notes@sub.example.co.uk"), Ok(()));
        assert_eq!(email("not-an-email"), Err(INVALID_EMAIL));
        assert_eq!(email("ada@"), Err(INVALID_EMAIL));
        assert_eq!(email("@example.com"), Err(INVALID_EMAIL));
        assert_eq!(email("ada@@example.com"), Err(INVALID_EMAIL));
    }

    #[test]
    fn test_password_required() {
        assert_eq!(password(""), Err(PASSWORD_REQUIRED));
    }

    #[test]
    fn test_password_length_checked_before_strength() {
        // Short AND weak: the length message wins
        assert_eq!(password("abc"), Err(PASSWORD_TOO_SHORT));
        assert_eq!(password("aB1!"), Err(PASSWORD_TOO_SHORT));
    }

    #[test]
    fn test_password_strength_classes() {
        assert_eq!(password("alllowercase1!"), Err(PASSWORD_TOO_WEAK)); // no upper
        assert_eq!(password("ALLUPPERCASE1!"), Err(PASSWORD_TOO_WEAK)); // no lower
        assert_eq!(password("NoDigitsHere!"), Err(PASSWORD_TOO_WEAK)); // no digit
        assert_eq!(password("NoSymbols123"), Err(PASSWORD_TOO_WEAK)); // no symbol
        assert_eq!(password("Str0ng!Pass"), Ok(()));
    }

    #[test]
    fn test_password_symbol_set_is_fixed() {
        // A symbol outside the fixed set does not count
        assert_eq!(password("Weak1234?"), Err(PASSWORD_TOO_WEAK));
        assert_eq!(password("Fine1234$"), Ok(()));
    }

    #[test]
    fn test_required_names() {
        assert_eq!(required_first_name(""), Err(FIRST_NAME_REQUIRED));
        assert_eq!(required_first_name("   "), Err(FIRST_NAME_REQUIRED));
        assert_eq!(required_first_name("Ada"), Ok(()));
        assert_eq!(required_last_name(""), Err(LAST_NAME_REQUIRED));
        assert_eq!(required_last_name("Lovelace"), Ok(()));
    }

    #[test]
    fn test_optional_name_accepts_anything() {
        assert_eq!(optional_name(""), Ok(()));
        assert_eq!(optional_name("Ada"), Ok(()));
    }

    #[test]
    fn test_phone_empty_is_valid() {
        assert_eq!(phone(""), Ok(()));
    }

    #[test]
    fn test_phone_accepts_common_shapes() {
        assert_eq!(phone("5551234567"), Ok(()));
        assert_eq!(phone("555-123-4567"), Ok(()));
        assert_eq!(phone("(555) 123-4567"), Ok(()));
        assert_eq!(phone("+1 555 123 4567"), Ok(()));
        assert_eq!(phone("+44 555 123 4567"), Ok(()));
    }

    #[test]
    fn test_phone_rejects_non_numbers() {
        assert_eq!(phone("not-a-number"), Err(PHONE_INVALID));
        assert_eq!(phone("555-abc-4567"), Err(PHONE_INVALID));
        assert_eq!(phone("12345"), Err(PHONE_INVALID)); // too few digits
        assert_eq!(phone("12345678901234567890"), Err(PHONE_INVALID)); // too many
    }
}
