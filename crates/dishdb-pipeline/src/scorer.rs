//! Food-relevance heuristic for candidate articles.
//!
//! Starts from [`ScoringWeights::base`] and adds or subtracts per signal
//! found in the category tags and in the description. Each signal counts at
//! most once per source. The result is clamped to `0..=100`.

use std::sync::LazyLock;

use dishdb_core::CandidateArticle;
use regex::Regex;

/// Tunable scoring constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringWeights {
    pub base: i32,
    pub food_tag: i32,
    pub food_text: i32,
    pub african_tag: i32,
    pub african_text: i32,
    pub negative_tag: i32,
    pub negative_text: i32,
    /// Applied to two-word `Capitalized lowercase` titles.
    pub binomial_title: i32,
    /// Applied when the description defines the subject as a dish.
    pub definitional: i32,
    /// Fixed score for a candidate without a description.
    pub no_description: u8,
    /// Fixed score when the summary lookup failed.
    pub lookup_failed: u8,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base: 50,
            food_tag: 10,
            food_text: 5,
            african_tag: 8,
            african_text: 3,
            negative_tag: -15,
            negative_text: -8,
            binomial_title: -30,
            definitional: 25,
            no_description: 40,
            lookup_failed: 30,
        }
    }
}

const FOOD_SIGNALS: &[&str] = &[
    "cuisines?",
    "dish(?:es)?",
    "foods?",
    "soups?",
    "stews?",
    "breads?",
    "porridges?",
    "snacks?",
    "desserts?",
    "beverages?",
    "drinks?",
    "sauces?",
    "condiments?",
    "salads?",
    "pastr(?:y|ies)",
    "recipes?",
    "cooking",
    "meals?",
    "delicac(?:y|ies)",
    "street food",
    "breakfast",
];

const AFRICAN_SIGNALS: &[&str] = &[
    "africa(?:n)?",
    "maghreb(?:i)?",
    "sahel(?:ian)?",
    "swahili",
    "yoruba",
    "igbo",
    "hausa",
    "akan",
    "zulu",
    "xhosa",
    "amhara",
    "berber",
    "ghanaian",
    "nigerian",
    "senegalese",
    "ivorian",
    "malian",
    "beninese",
    "togolese",
    "liberian",
    "sierra leonean",
    "gambian",
    "guinean",
    "burkinab[eé]",
    "nigerien",
    "cameroonian",
    "congolese",
    "gabonese",
    "chadian",
    "ethiopian",
    "eritrean",
    "somali",
    "kenyan",
    "tanzanian",
    "ugandan",
    "rwandan",
    "burundian",
    "sudanese",
    "egyptian",
    "moroccan",
    "algerian",
    "tunisian",
    "libyan",
    "angolan",
    "mozambican",
    "zambian",
    "zimbabwean",
    "malawian",
    "namibian",
    "botswana",
    "basotho",
    "swazi",
    "malagasy",
    "mauritian",
    "cape verdean",
];

const NEGATIVE_SIGNALS: &[&str] = &[
    "genus",
    "genera",
    "species",
    "plants?",
    "cultivars?",
    "tax(?:on|a)",
    "botan(?:y|ical)",
    "flowering",
    "trees?",
    "shrubs?",
    "subfamily",
    "[a-z]+aceae",
];

fn compile(signals: &[&str]) -> Vec<Regex> {
    signals
        .iter()
        .map(|s| Regex::new(&format!(r"(?i)\b(?:{s})\b")).expect("valid signal regex"))
        .collect()
}

static FOOD: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(FOOD_SIGNALS));
static AFRICAN: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(AFRICAN_SIGNALS));
static NEGATIVE: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(NEGATIVE_SIGNALS));

static BINOMIAL_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][a-z]+ [a-z]+$").expect("valid binomial regex"));

static DEFINITIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\bis an? (?:(?:traditional|popular|common|national|staple|spicy|sweet|savory|savoury) )*(?:[\w'-]+ ){0,4}?(?:dish|food|stew|soup|bread|drink|beverage|porridge|snack|dessert|sauce|condiment|pastry|salad|delicacy|meal|staple)\b",
    )
    .expect("valid definitional regex")
});

fn count_hits(signals: &[Regex], text: &str) -> i32 {
    let hits = signals.iter().filter(|re| re.is_match(text)).count();
    i32::try_from(hits).unwrap_or(i32::MAX)
}

fn clamp_score(raw: i32) -> u8 {
    u8::try_from(raw.clamp(0, 100)).unwrap_or(100)
}

/// Scores a candidate from its tags, description and title.
///
/// Without a description the fixed [`ScoringWeights::no_description`] score
/// is returned.
#[must_use]
pub fn score_candidate(candidate: &CandidateArticle, weights: &ScoringWeights) -> u8 {
    let Some(description) = candidate
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
    else {
        return weights.no_description;
    };

    let tags = candidate
        .category_tags
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" | ");

    let mut score = weights.base;
    score += count_hits(&FOOD, &tags) * weights.food_tag;
    score += count_hits(&FOOD, description) * weights.food_text;
    score += count_hits(&AFRICAN, &tags) * weights.african_tag;
    score += count_hits(&AFRICAN, description) * weights.african_text;
    score += count_hits(&NEGATIVE, &tags) * weights.negative_tag;
    score += count_hits(&NEGATIVE, description) * weights.negative_text;

    if BINOMIAL_TITLE.is_match(&candidate.display_title()) {
        score += weights.binomial_title;
    }
    if DEFINITIONAL.is_match(description) {
        score += weights.definitional;
    }

    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(title: &str, tags: &[&str], description: Option<&str>) -> CandidateArticle {
        let mut c = CandidateArticle::new(title, 1, String::new());
        c.category_tags = tags.iter().map(ToString::to_string).collect();
        c.description = description.map(ToString::to_string);
        c
    }

    #[test]
    fn waakye_scores_high() {
        let c = cand(
            "Waakye",
            &["Ghanaian cuisine", "Legume dishes"],
            Some("Waakye is a traditional Ghanaian dish of rice and beans."),
        );
        assert!(score_candidate(&c, &ScoringWeights::default()) >= 93);
    }

    #[test]
    fn definitional_soup_beats_missing_description() {
        let w = ScoringWeights::default();
        let with = cand("Ewedu", &[], Some("Ewedu is a traditional soup."));
        let without = cand("Ewedu", &[], None);
        assert!(score_candidate(&with, &w) > score_candidate(&without, &w));
        assert_eq!(score_candidate(&without, &w), 40);
    }

    #[test]
    fn blank_description_counts_as_missing() {
        let c = cand("Ewedu", &["Nigerian soups"], Some("   "));
        assert_eq!(score_candidate(&c, &ScoringWeights::default()), 40);
    }

    #[test]
    fn botanical_article_scores_low() {
        let c = cand(
            "Vigna unguiculata",
            &["Fabaceae", "Plants described in 1753", "Flora of Africa"],
            Some("Vigna unguiculata is a species of flowering plant in the genus Vigna."),
        );
        let s = score_candidate(&c, &ScoringWeights::default());
        assert!(s < 30, "got {s}");
    }

    #[test]
    fn score_is_clamped() {
        let w = ScoringWeights::default();
        let high = cand(
            "Thieboudienne",
            &["Senegalese cuisine", "Rice dishes", "Fish dishes", "National dishes", "Stews"],
            Some("Thieboudienne is a traditional Senegalese dish of fish, rice and tomato sauce; a national food and meal."),
        );
        assert_eq!(score_candidate(&high, &w), 100);

        let low = cand(
            "Ficus sycomorus",
            &["Ficus", "Trees of Africa", "Plants", "Flora", "Species", "Taxa named by Linnaeus"],
            Some("A tree species of the plant genus Ficus in the family Moraceae, a flowering taxon."),
        );
        assert_eq!(score_candidate(&low, &w), 0);
    }

    #[test]
    fn signals_count_once_per_source() {
        let w = ScoringWeights {
            definitional: 0,
            ..ScoringWeights::default()
        };
        let c = cand("Ogbono", &["Soups", "Soup recipes"], Some("A thick soup, a soup."));
        // base 50 + tags (soup, recipe) 2*10 + text (soup) 5
        assert_eq!(score_candidate(&c, &w), 75);
    }

    #[test]
    fn two_word_lowercase_title_is_penalized() {
        let w = ScoringWeights::default();
        let plain = cand("Ofada", &[], Some("A regional rice."));
        let shaped = cand("Ofada sauce", &[], Some("A regional rice."));
        assert_eq!(
            i32::from(score_candidate(&plain, &w)) - i32::from(score_candidate(&shaped, &w)),
            30
        );
    }

    #[test]
    fn plantain_is_not_a_plant_signal() {
        let c = cand("Kelewele", &[], Some("Fried plantain."));
        assert_eq!(score_candidate(&c, &ScoringWeights::default()), 50);
    }
}
