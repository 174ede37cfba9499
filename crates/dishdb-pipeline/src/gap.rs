//! Gap detection: which discovered candidates are missing from the catalog.
//!
//! Titles and existing names are compared after [`normalize_name`]. A
//! candidate survives only if it looks like a dish and its key neither
//! equals, contains, nor is contained in any existing key.

use std::collections::HashSet;
use std::sync::LazyLock;

use dishdb_core::names::{display_title, normalize_name};
use dishdb_core::CandidateArticle;
use regex::Regex;

const MIN_KEY_LEN: usize = 3;

/// Raw-title patterns for pages that are never dishes.
static NOT_A_DISH: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)^list of\b",
        r"(?i)^(?:category|template|portal|wikipedia|file|help|draft|user):",
        r"(?i)^(?:history|culture|geography|economy|demographics|cuisine) of\b",
        r"(?i)\b(?:people|peoples|ethnic groups?|tribes?|languages?)$",
        r"(?i)\bcuisines?$",
        r"(?i)\((?:genus|plant|species|family|subfamily|tree|shrub)\)",
        r"(?i)\b(?:genus|subfamily|subspecies|cultivar)\b",
        // Binomial nomenclature: "Vigna unguiculata", "Dioscorea rotundata".
        r"^[A-Z][a-z]+ [a-z]+(?:us|um|ii|ae|ata|atum|atus|ica|icum|ensis|oides|ifolia|iana|ianus)$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid not-a-dish regex"))
    .collect()
});

/// Normalized titles that name an ingredient class or a generic topic.
const EXCLUDED_KEYS: &[&str] = &[
    "african",
    "west african",
    "east african",
    "north african",
    "southern african",
    "central african",
    "staple",
    "spice",
    "spices",
    "vegetable",
    "vegetables",
    "fruit",
    "fruits",
    "meat",
    "fish",
    "rice",
    "bread",
    "soup",
    "stew",
    "sauce",
    "snack",
    "dessert",
    "beverage",
    "drink",
    "ingredient",
    "ingredients",
    "condiment",
    "street",
    "cooking",
    "kitchen",
    "restaurant",
    "chef",
    "menu",
];

/// `true` when the raw title matches a known non-dish page pattern.
#[must_use]
pub fn is_not_a_dish(title: &str) -> bool {
    let display = display_title(title);
    NOT_A_DISH.iter().any(|re| re.is_match(&display))
}

/// Candidates whose title is not already covered by `existing_names`.
///
/// Containment is checked both ways, so "Rice" in the catalog also excludes
/// "Fried rice". Two candidates normalizing to the same key keep only the
/// first.
#[must_use]
pub fn find_missing(
    candidates: Vec<CandidateArticle>,
    existing_names: &[String],
) -> Vec<CandidateArticle> {
    let existing: Vec<String> = existing_names
        .iter()
        .map(|n| normalize_name(n))
        .filter(|k| !k.is_empty())
        .collect();
    let exact: HashSet<&str> = existing.iter().map(String::as_str).collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut missing = Vec::new();

    for candidate in candidates {
        let key = normalize_name(&candidate.title);
        if key.chars().count() < MIN_KEY_LEN {
            tracing::debug!(title = %candidate.title, "dropped: title too short");
            continue;
        }
        if is_not_a_dish(&candidate.title) || EXCLUDED_KEYS.contains(&key.as_str()) {
            tracing::debug!(title = %candidate.title, "dropped: not a dish");
            continue;
        }
        if exact.contains(key.as_str()) {
            continue;
        }
        if let Some(hit) = existing
            .iter()
            .find(|e| key.contains(e.as_str()) || e.contains(key.as_str()))
        {
            tracing::debug!(title = %candidate.title, existing = %hit, "dropped: overlaps catalog name");
            continue;
        }
        if !seen.insert(key) {
            continue;
        }
        missing.push(candidate);
    }

    missing
}
