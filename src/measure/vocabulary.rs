use super::strip_digits;
use std::collections::HashMap;

/// Count the unit words used across raw measures.
///
/// Digits are stripped from every token, the rest is trimmed and lowercased, and empty
/// leftovers are dropped. Sorted by count, most frequent first; ties by token.
pub fn measure_token_frequencies<I, S>(measures: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();

    for measure in measures {
        for token in measure.as_ref().split_whitespace() {
            let token = strip_digits(token).trim().to_lowercase();
            if token.is_empty() {
                continue;
            }
            *counts.entry(token).or_default() += 1;
        }
    }

    let mut sorted: Vec<(String, usize)> = counts.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}
