//! Measure parsing.
//!
//! Two extractors with different contracts live here and are not interchangeable:
//!
//! - [`normalize_to_grams`] runs at transform time over raw recipe text and performs a full
//!   amount + unit conversion through a fixed table.
//! - [`extract_grams`] runs at aggregation time over data that is already close to grams and
//!   only picks out the first decimal number.

mod extract;
mod normalize;
mod vocabulary;

pub use extract::extract_grams;
pub use normalize::{
    grams_per_unit, normalize_to_grams, normalize_to_grams_string, parse_measure, DEFAULT_AMOUNT,
    MISSING_UNIT,
};
pub use vocabulary::measure_token_frequencies;

/// Remove every character that is a decimal digit ("200g" -> "g", "1/2" -> "/").
// ASCII digits only; other Unicode decimal digits stay in the token.
pub(crate) fn strip_digits(token: &str) -> String {
    token.chars().filter(|c| !c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_digits() {
        assert_eq!(strip_digits("200g"), "g");
        assert_eq!(strip_digits("1/2"), "/");
        assert_eq!(strip_digits("1.5kg"), ".kg");
        assert_eq!(strip_digits("cups"), "cups");
        assert_eq!(strip_digits("42"), "");
        assert_eq!(strip_digits("\u{663}g"), "\u{663}g");
    }
}
