//! Parsing of digit-only strings.
//!
//! Browser-side code sends product IDs and quantities as strings such as
//! `"4"` or `"12"`. Only plain ASCII digits are accepted: no sign, no
//! whitespace, no decimal point.

/// Errors that can occur when parsing a digit string.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitsError {
    /// The input string is empty.
    #[error("value cannot be empty")]
    Empty,
    /// The input contains a character that is not an ASCII digit.
    #[error("value must contain only digits")]
    NotDigits,
    /// The value does not fit the target integer type.
    #[error("value is too large")]
    Overflow,
}

/// Parse a string consisting solely of ASCII digits.
///
/// # Errors
///
/// Returns an error if the input is empty, contains anything other than
/// `0-9`, or does not fit in a `u32`.
///
/// # Examples
///
/// ```
/// use ebag_core::{DigitsError, parse_digits};
///
/// assert_eq!(parse_digits("42"), Ok(42));
/// assert_eq!(parse_digits("007"), Ok(7));
/// assert_eq!(parse_digits("-1"), Err(DigitsError::NotDigits));
/// assert_eq!(parse_digits(""), Err(DigitsError::Empty));
/// ```
pub fn parse_digits(value: &str) -> Result<u32, DigitsError> {
    if value.is_empty() {
        return Err(DigitsError::Empty);
    }

    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DigitsError::NotDigits);
    }

    value.parse::<u32>().map_err(|_| DigitsError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_digits_valid() {
        assert_eq!(parse_digits("0"), Ok(0));
        assert_eq!(parse_digits("5"), Ok(5));
        assert_eq!(parse_digits("123"), Ok(123));
    }

    #[test]
    fn test_parse_digits_leading_zeros() {
        assert_eq!(parse_digits("0005"), Ok(5));
    }

    #[test]
    fn test_parse_digits_rejects_signs_and_spaces() {
        assert_eq!(parse_digits("+5"), Err(DigitsError::NotDigits));
        assert_eq!(parse_digits("-5"), Err(DigitsError::NotDigits));
        assert_eq!(parse_digits(" 5"), Err(DigitsError::NotDigits));
        assert_eq!(parse_digits("5 "), Err(DigitsError::NotDigits));
    }

    #[test]
    fn test_parse_digits_rejects_decimals_and_letters() {
        assert_eq!(parse_digits("1.5"), Err(DigitsError::NotDigits));
        assert_eq!(parse_digits("abc"), Err(DigitsError::NotDigits));
        assert_eq!(parse_digits("4a"), Err(DigitsError::NotDigits));
    }

    #[test]
    fn test_parse_digits_rejects_unicode_digits() {
        // Arabic-Indic three
        assert_eq!(parse_digits("\u{0663}"), Err(DigitsError::NotDigits));
    }

    #[test]
    fn test_parse_digits_empty() {
        assert_eq!(parse_digits(""), Err(DigitsError::Empty));
    }

    #[test]
    fn test_parse_digits_overflow() {
        assert_eq!(parse_digits("99999999999"), Err(DigitsError::Overflow));
    }
}
