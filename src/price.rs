/// Normalize a free-form price string into a number.
///
/// Every comma is treated as a grouping separator and removed before the
/// value is parsed. Anything that still fails to parse (including the empty
/// string and non-finite values such as "NaN") is reported as a missing
/// price rather than an error.
pub fn normalize_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => None,
    }
}
