//! Heuristic per-serving profiles used when no data source has the dish.
//!
//! The first pattern that matches the entry's name, tags and categories
//! picks the profile; anything unmatched gets [`DEFAULT_LABEL`].

use std::sync::LazyLock;

use dishdb_core::{CatalogEntry, NutritionInfo};
use regex::Regex;

use crate::reference::NutrientProfile;

pub const DEFAULT_LABEL: &str = "default";

struct ProfileRule {
    label: &'static str,
    pattern: Regex,
    profile: NutrientProfile,
}

fn rule(label: &'static str, pattern: &str, profile: NutrientProfile) -> ProfileRule {
    ProfileRule {
        label,
        pattern: Regex::new(pattern).expect("valid manual profile regex"),
        profile,
    }
}

const fn np(kcal: u32, protein_g: f64, carbs_g: f64, fat_g: f64, fiber_g: f64, sodium_mg: f64) -> NutrientProfile {
    NutrientProfile {
        kcal,
        protein_g,
        carbs_g,
        fat_g,
        fiber_g,
        sodium_mg,
        sugar_g: 3.0,
        iron_mg: 2.0,
        calcium_mg: 50.0,
        vitamin_a_mcg: 50.0,
        vitamin_c_mg: 5.0,
    }
}

const DEFAULT_PROFILE: NutrientProfile = np(350, 12.0, 45.0, 13.0, 4.0, 500.0);

/// Order matters: "fish stew" is fish, "fried rice" is fried.
static RULES: LazyLock<Vec<ProfileRule>> = LazyLock::new(|| {
    vec![
        rule(
            "drink",
            r"\b(?:drinks?|beverages?|juices?|tea|coffee|beer|wine|smoothies?|bissap|zobo|sobolo)\b",
            NutrientProfile { sugar_g: 22.0, ..np(120, 0.5, 28.0, 0.2, 0.3, 15.0) },
        ),
        rule(
            "salad",
            r"\b(?:salads?|slaw)\b",
            NutrientProfile { vitamin_c_mg: 25.0, vitamin_a_mcg: 180.0, ..np(150, 4.0, 14.0, 9.0, 4.5, 260.0) },
        ),
        rule(
            "beans",
            r"\b(?:beans?|legumes?|lentils?|cowpeas?|chickpeas?|peas)\b",
            NutrientProfile { iron_mg: 3.5, ..np(300, 15.0, 45.0, 6.0, 11.0, 420.0) },
        ),
        rule(
            "fish",
            r"\b(?:fish|seafood|prawns?|shrimps?|tilapia|mackerel|crabs?)\b",
            NutrientProfile { calcium_mg: 90.0, ..np(280, 28.0, 8.0, 14.0, 1.0, 620.0) },
        ),
        rule(
            "meat",
            r"\b(?:meats?|beef|goat|lamb|mutton|chicken|poultry|pork|suya|kebabs?)\b",
            NutrientProfile { iron_mg: 3.0, ..np(380, 30.0, 8.0, 24.0, 1.0, 650.0) },
        ),
        rule(
            "fried",
            r"\b(?:fried|fritters?|puff[- ]puff|chin chin|doughnuts?)\b",
            np(330, 5.0, 40.0, 17.0, 2.5, 300.0),
        ),
        rule(
            "bread",
            r"\b(?:breads?|flatbreads?|pancakes?|injera|chapati|doughs?)\b",
            np(260, 8.0, 48.0, 4.0, 3.0, 380.0),
        ),
        rule(
            "porridge",
            r"\b(?:porridges?|pap|ogi|fufu|ugali|swallow|gruel)\b",
            np(250, 4.0, 54.0, 1.5, 3.5, 60.0),
        ),
        rule("rice", r"\brice\b", np(340, 7.0, 60.0, 8.0, 2.0, 520.0)),
        rule(
            "soup",
            r"\bsoups?\b",
            NutrientProfile { vitamin_a_mcg: 150.0, ..np(220, 14.0, 12.0, 13.0, 3.0, 780.0) },
        ),
        rule(
            "stew",
            r"\b(?:stews?|sauces?|curry|curries|tagine|wat)\b",
            NutrientProfile { vitamin_a_mcg: 200.0, ..np(320, 18.0, 16.0, 20.0, 4.0, 720.0) },
        ),
    ]
});

fn haystack(entry: &CatalogEntry) -> String {
    let mut text = entry.name.to_lowercase();
    for word in entry.tags.iter().chain(entry.categories.iter()) {
        text.push(' ');
        text.push_str(&word.to_lowercase());
    }
    text
}

fn first_match(text: &str) -> Option<&'static ProfileRule> {
    RULES.iter().find(|r| r.pattern.is_match(text))
}

/// Representative nutrition for `entry`, picked by the first matching rule.
#[must_use]
pub fn manual_profile(entry: &CatalogEntry) -> NutritionInfo {
    let rule = first_match(&haystack(entry));
    tracing::debug!(
        entry = %entry.name,
        profile = rule.map_or(DEFAULT_LABEL, |r| r.label),
        "manual profile"
    );
    rule.map_or(DEFAULT_PROFILE, |r| r.profile).to_info()
}
