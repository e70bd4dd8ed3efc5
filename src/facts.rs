//! Extraction of user facts from free-form input.

use std::sync::LazyLock;

use regex::Regex;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bmy name is\s+([A-Za-z]+)").expect("valid regex"));

/// Pull self-descriptive facts out of a user message.
///
/// Currently recognises introductions of the form `my name is <Name>`
/// (case-insensitive, alphabetic name), yielding `("name", "<Name>")` with
/// the name's original casing.
///
/// # Example
///
/// ```
/// use mneme::facts::extract_user_facts;
///
/// let facts = extract_user_facts("Hi, my name is Ada and I like maths");
/// assert_eq!(facts, vec![("name", "Ada".to_string())]);
/// ```
pub fn extract_user_facts(text: &str) -> Vec<(&'static str, String)> {
    NAME_PATTERN
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|name| vec![("name", name.as_str().to_string())])
        .unwrap_or_default()
}
