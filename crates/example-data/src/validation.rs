//! Record identifier shape.
//!
//! Generated identifiers are short lowercase base-36 tokens.
//!
//! # Validation Rules
//!
//! - Exactly [`RECORD_ID_LENGTH`] characters
//! - Allowed characters: digits (0-9) and lowercase letters (a-z)

/// Length of a generated record identifier.
pub const RECORD_ID_LENGTH: usize = 8;

/// Radix of the identifier alphabet.
pub(crate) const RECORD_ID_RADIX: u32 = 36;

/// Returns `true` if `id` has the shape of a generated record identifier.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_record_id;
///
/// assert!(is_valid_record_id("k3v9x0aa"));
/// assert!(!is_valid_record_id("short"));
/// assert!(!is_valid_record_id("UPPER123"));
/// ```
#[must_use]
pub fn is_valid_record_id(id: &str) -> bool {
    id.chars().count() == RECORD_ID_LENGTH && id.chars().all(is_valid_record_id_char)
}

const fn is_valid_record_id_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("abcd1234", true)]
    #[case("00000000", true)]
    #[case("zzzzzzzz", true)]
    #[case("abcd123", false)]
    #[case("abcd12345", false)]
    #[case("abcd-234", false)]
    #[case("ABCD1234", false)]
    #[case("", false)]
    fn validates_record_ids(#[case] id: &str, #[case] expected: bool) {
        assert_eq!(is_valid_record_id(id), expected, "id: {id:?}");
    }
}
