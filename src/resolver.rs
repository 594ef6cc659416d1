//! Country and period canonicalisation.
//!
//! Questions are scanned for a fixed list of country mentions; an explicit
//! mention always wins over the country supplied by the caller.

/// Country mentions in scan order. The first group with a matching token wins.
const COUNTRY_MENTIONS: &[(&str, &[&str])] = &[
    ("germany", &["germany"]),
    ("uk", &["uk", "united kingdom", "british"]),
    ("france", &["france", "french"]),
    ("italy", &["italy", "italian"]),
    ("spain", &["spain", "spanish"]),
    ("netherlands", &["netherlands", "dutch"]),
];

/// Space-stripped aliases that map onto the `uk` key.
const UK_ALIASES: &[&str] = &["unitedkingdom", "greatbritain", "britain", "gb"];

/// Finds the first country mentioned in a question, if any.
pub fn detect_country(question: &str) -> Option<&'static str> {
    let q = question.to_lowercase();
    COUNTRY_MENTIONS
        .iter()
        .find(|(_, tokens)| tokens.iter().any(|t| q.contains(t)))
        .map(|(key, _)| *key)
}

/// Canonicalises a caller-supplied country into a lookup key.
pub fn normalize_country(supplied: &str) -> String {
    let key: String = supplied
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if UK_ALIASES.contains(&key.as_str()) {
        "uk".to_string()
    } else {
        key
    }
}

/// Resolves the country a question is about.
pub fn resolve_country(question: &str, supplied: &str) -> String {
    match detect_country(question) {
        Some(detected) => detected.to_string(),
        None => normalize_country(supplied),
    }
}

/// Canonicalises a period code such as `P7 - 2025` or `P7 2025` into `p7-2025`.
pub fn normalize_period(period: &str) -> String {
    let parts: Vec<String> = period
        .split(|c: char| c == '-' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(str::to_lowercase)
        .collect();
    parts.join("-")
}
