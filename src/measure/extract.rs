use crate::model::Measure;
use regex::Regex;
use std::sync::LazyLock;

static FIRST_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+(?:\.[0-9]+)?)").expect("valid decimal pattern"));

/// Pick the gram value out of an already-cleaned measure.
///
/// Numbers are returned as-is. Text yields the first decimal number found anywhere in it
/// (`"50 g"` -> 50.0, `"about 2.5 oz"` -> 2.5); units are ignored. Absent, empty, zero and
/// number-free measures yield `None`.
///
/// # Example
/// ```
/// use meal_nutrition::measure::extract_grams;
/// use meal_nutrition::Measure;
///
/// assert_eq!(extract_grams(Some(&Measure::from("50 g"))), Some(50.0));
/// assert_eq!(extract_grams(Some(&Measure::Number(75.0))), Some(75.0));
/// assert_eq!(extract_grams(None), None);
/// ```
pub fn extract_grams(measure: Option<&Measure>) -> Option<f64> {
    match measure? {
        Measure::Number(value) => Some(*value).filter(|v| *v != 0.0 && v.is_finite()),
        Measure::Text(text) => {
            if text.is_empty() {
                return None;
            }
            let lowered = text.to_lowercase();
            FIRST_DECIMAL
                .captures(&lowered)
                .and_then(|caps| caps.get(1))
                .and_then(|m| m.as_str().parse::<f64>().ok())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Option<Measure> {
        Some(Measure::from(value))
    }

    #[test]
    fn test_first_number_in_text() {
        assert_eq!(extract_grams(text("50 g").as_ref()), Some(50.0));
        assert_eq!(extract_grams(text("200.0").as_ref()), Some(200.0));
        assert_eq!(extract_grams(text("about 2.5 oz").as_ref()), Some(2.5));
        assert_eq!(extract_grams(text("1 1/2 tbs").as_ref()), Some(1.0));
    }

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(extract_grams(Some(&Measure::Number(75.0))), Some(75.0));
        assert_eq!(extract_grams(Some(&Measure::Number(0.25))), Some(0.25));
    }

    #[test]
    fn test_missing_or_empty() {
        assert_eq!(extract_grams(None), None);
        assert_eq!(extract_grams(text("").as_ref()), None);
        assert_eq!(extract_grams(Some(&Measure::Number(0.0))), None);
    }

    #[test]
    fn test_no_digits() {
        assert_eq!(extract_grams(text("no digits here").as_ref()), None);
        assert_eq!(extract_grams(text("a handful").as_ref()), None);
    }

    #[test]
    fn test_trailing_dot_is_not_a_decimal() {
        assert_eq!(extract_grams(text("3. cups").as_ref()), Some(3.0));
    }
}
