use super::strip_digits;
use crate::model::round_to;
use log::trace;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Unit assigned to a bare number with no recognizable unit word.
pub const MISSING_UNIT: &str = "_missing_";

/// Amount assumed when the measure carries no usable number.
pub const DEFAULT_AMOUNT: f64 = 100.0;

/// Grams per unit, keyed by lowercase unit token
static CONVERSION_TO_GRAMS: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    // === Weight ===
    for unit in ["g", "gram", "grams"] {
        m.insert(unit, 1.0);
    }
    m.insert("kg", 1000.0);
    for unit in ["lb", "lbs", "pound", "pounds"] {
        m.insert(unit, 453.592);
    }
    for unit in ["oz", "ounce", "ounces"] {
        m.insert(unit, 28.3495);
    }

    // === Volume (water density) ===
    for unit in ["ml", "milliliters"] {
        m.insert(unit, 1.0);
    }
    for unit in ["l", "litre", "litres"] {
        m.insert(unit, 1000.0);
    }
    for unit in ["tsp", "teaspoon", "teaspoons"] {
        m.insert(unit, 5.0);
    }
    for unit in ["tbs", "tablespoon", "tablespoons", "tblsp", "tbls"] {
        m.insert(unit, 15.0);
    }
    for unit in ["cup", "cups"] {
        m.insert(unit, 240.0);
    }

    // === Informal ===
    m.insert("handful", 40.0);

    // An unlabeled number is scaled by 100, not read as grams
    m.insert(MISSING_UNIT, 100.0);

    m
});

/// Grams per one `unit`, case-insensitive. `None` for unknown units.
pub fn grams_per_unit(unit: &str) -> Option<f64> {
    CONVERSION_TO_GRAMS.get(unit.to_lowercase().as_str()).copied()
}

fn canonical_unit(token: &str) -> Option<&'static str> {
    CONVERSION_TO_GRAMS
        .get_key_value(token.to_lowercase().as_str())
        .map(|(unit, _)| *unit)
}

fn parse_decimal(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// "a/b" with exactly one slash; `None` on bad parts or a zero denominator
fn parse_fraction(token: &str) -> Option<f64> {
    let (numerator, denominator) = token.split_once('/')?;
    if denominator.contains('/') {
        return None;
    }

    let numerator = parse_decimal(numerator)?;
    let denominator = parse_decimal(denominator)?;
    if denominator == 0.0 {
        return None;
    }

    Some(numerator / denominator).filter(|value| value.is_finite())
}

/// Fold the token's leading digits into a number ("200g" -> 200). Zero when it starts
/// with anything else.
// ASCII digits only; other Unicode decimal digits end the run.
fn fold_leading_digits(token: &str) -> f64 {
    token
        .chars()
        .map_while(|c| c.to_digit(10))
        .fold(0.0, |num, digit| num * 10.0 + f64::from(digit))
}

/// The amount is decided by the first token alone: decimal, then fraction, then
/// leading digits. Later tokens never contribute ("1 1/2 tbs" -> 1).
fn leading_amount(tokens: &[&str]) -> f64 {
    let Some(token) = tokens.first() else {
        return 0.0;
    };

    parse_decimal(token)
        .or_else(|| parse_fraction(token))
        .unwrap_or_else(|| fold_leading_digits(token))
}

/// Split a free-text measure into an amount and a canonical unit key of the conversion
/// table, applying the defaults for missing parts:
///
/// | amount | unit | result                 |
/// |--------|------|------------------------|
/// | no     | no   | `(100, "g")`           |
/// | yes    | no   | `(amount, "_missing_")`|
/// | no     | yes  | `(100, unit)`          |
/// | yes    | yes  | `(amount, unit)`       |
///
/// A zero amount counts as no amount.
pub fn parse_measure(measure: &str) -> (f64, &'static str) {
    let tokens: Vec<&str> = measure.split_whitespace().collect();
    let amount = leading_amount(&tokens);
    let unit = tokens
        .iter()
        .map(|token| strip_digits(token))
        .find_map(|token| canonical_unit(&token));

    let parsed = match (amount != 0.0, unit) {
        (false, None) => (DEFAULT_AMOUNT, "g"),
        (true, None) => (amount, MISSING_UNIT),
        (false, Some(unit)) => (DEFAULT_AMOUNT, unit),
        (true, Some(unit)) => (amount, unit),
    };

    trace!("Parsed measure {:?} as {:?}", measure, parsed);
    parsed
}

/// Convert a free-text measure to grams, rounded to two decimals.
///
/// # Example
/// ```
/// use meal_nutrition::measure::normalize_to_grams;
///
/// assert_eq!(normalize_to_grams("200g"), 200.0);
/// assert_eq!(normalize_to_grams("1/2 cup"), 120.0);
/// assert_eq!(normalize_to_grams(""), 100.0);
/// ```
pub fn normalize_to_grams(measure: &str) -> f64 {
    let (amount, unit) = parse_measure(measure);
    // every unit returned by parse_measure is a table key
    let factor = CONVERSION_TO_GRAMS.get(unit).copied().unwrap_or(1.0);
    round_to(amount * factor, 2)
}

/// Same conversion as [`normalize_to_grams`], formatted for storage ("200.0", "907.18").
pub fn normalize_to_grams_string(measure: &str) -> String {
    format!("{:?}", normalize_to_grams(measure))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grams_with_glued_unit() {
        assert_eq!(normalize_to_grams("200g"), 200.0);
        assert_eq!(parse_measure("200g"), (200.0, "g"));
    }

    #[test]
    fn test_spoons_and_cups() {
        assert_eq!(normalize_to_grams("1 tbs"), 15.0);
        assert_eq!(normalize_to_grams("2 tsp"), 10.0);
        assert_eq!(normalize_to_grams("1/2 cup"), 120.0);
        assert_eq!(normalize_to_grams("2 Cups"), 480.0);
    }

    #[test]
    fn test_weights() {
        assert_eq!(normalize_to_grams("1 kg"), 1000.0);
        assert_eq!(normalize_to_grams("2 lbs"), 907.18);
        assert_eq!(normalize_to_grams("4 oz"), 113.4);
    }

    #[test]
    fn test_empty_and_whitespace_default_to_100_grams() {
        assert_eq!(parse_measure(""), (100.0, "g"));
        assert_eq!(normalize_to_grams(""), 100.0);
        assert_eq!(normalize_to_grams("   \t "), 100.0);
    }

    #[test]
    fn test_text_without_number_or_unit() {
        assert_eq!(normalize_to_grams("to taste"), 100.0);
        assert_eq!(normalize_to_grams("pinch"), 100.0);
    }

    #[test]
    fn test_bare_number_uses_missing_unit() {
        assert_eq!(parse_measure("3"), (3.0, MISSING_UNIT));
        assert_eq!(normalize_to_grams("3"), 300.0);
        assert_eq!(normalize_to_grams("2 large"), 200.0);
    }

    #[test]
    fn test_unit_without_number_assumes_100_units() {
        assert_eq!(parse_measure("a handful"), (100.0, "handful"));
        assert_eq!(normalize_to_grams("a handful"), 4000.0);
    }

    #[test]
    fn test_only_first_token_decides_amount() {
        assert_eq!(normalize_to_grams("1 1/2 tbs"), 15.0);
        // "pinch" folds to zero, so the later "2" is never read
        assert_eq!(parse_measure("pinch 2 g"), (100.0, "g"));
    }

    #[test]
    fn test_first_matching_unit_wins() {
        assert_eq!(parse_measure("1 cup 2 tbs"), (1.0, "cup"));
    }

    #[test]
    fn test_zero_denominator_falls_back_to_leading_digits() {
        assert_eq!(parse_measure("1/0 cup"), (1.0, "cup"));
        assert_eq!(normalize_to_grams("1/0 cup"), 240.0);
    }

    #[test]
    fn test_malformed_fraction_parts() {
        assert_eq!(parse_fraction("a/b"), None);
        assert_eq!(parse_fraction("1/2/3"), None);
        assert_eq!(parse_fraction("3/4"), Some(0.75));
    }

    #[test]
    fn test_glued_decimal_falls_back_to_leading_digits() {
        // "1.5kg" is neither a number nor a fraction; digits fold to 1 and ".kg" is no unit
        assert_eq!(parse_measure("1.5kg"), (1.0, MISSING_UNIT));
        assert_eq!(normalize_to_grams("1.5kg"), 100.0);
    }

    #[test]
    fn test_zero_amount_counts_as_missing() {
        assert_eq!(parse_measure("0 g"), (100.0, "g"));
    }

    #[test]
    fn test_non_finite_tokens_are_not_numbers() {
        assert_eq!(parse_measure("inf g"), (100.0, "g"));
        assert_eq!(parse_measure("NaN"), (100.0, "g"));
    }

    #[test]
    fn test_leading_digits_are_ascii() {
        assert_eq!(fold_leading_digits("200g"), 200.0);
        assert_eq!(fold_leading_digits("\u{663}g"), 0.0);
    }

    #[test]
    fn test_grams_per_unit_is_case_insensitive() {
        assert_eq!(grams_per_unit("TBLSP"), Some(15.0));
        assert_eq!(grams_per_unit("Litres"), Some(1000.0));
        assert_eq!(grams_per_unit("bunch"), None);
    }

    #[test]
    fn test_string_output() {
        assert_eq!(normalize_to_grams_string("200g"), "200.0");
        assert_eq!(normalize_to_grams_string("2 lbs"), "907.18");
        assert_eq!(normalize_to_grams_string(""), "100.0");
    }
}
