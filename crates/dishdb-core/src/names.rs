//! Dish name normalization.
//!
//! Candidate titles from the encyclopedia and names already in the catalog
//! are compared in one key space: lowercase, no parenthetical qualifiers, no
//! generic descriptor words, single-spaced.

use std::sync::LazyLock;

use regex::Regex;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^)]*\)").expect("valid parenthetical regex"));

static DESCRIPTOR_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:list of|cuisine|foods?|dish(?:es)?|recipes?)\b")
        .expect("valid descriptor regex")
});

/// Removes every `(...)` qualifier and trims the result.
///
/// `"Jollof rice (Ghanaian style)"` becomes `"Jollof rice"`.
#[must_use]
pub fn strip_parenthetical(name: &str) -> String {
    PARENTHETICAL.replace_all(name, "").trim().to_owned()
}

/// Converts an encyclopedia title key (`"Jollof_rice"`) to display form.
#[must_use]
pub fn display_title(title: &str) -> String {
    title.replace('_', " ")
}

/// Converts a display title to the underscore key form used for lookups.
#[must_use]
pub fn title_key(title: &str) -> String {
    title.trim().replace(' ', "_")
}

/// Normalizes a dish name or candidate title into the comparison key space.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let lowered = display_title(name).to_lowercase();
    let without_parens = PARENTHETICAL.replace_all(&lowered, " ");
    let without_descriptors = DESCRIPTOR_WORDS.replace_all(&without_parens, " ");
    collapse_whitespace(&without_descriptors)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
