//! Nutrition values as stored on a catalog entry.

use serde::{Deserialize, Serialize};

/// Which source supplied an entry's nutrition values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NutritionSource {
    /// Curated in-repo reference table.
    Reference,
    /// Open Food Facts product search.
    OpenFoodFacts,
    /// USDA `FoodData` Central.
    Usda,
    /// Hardcoded representative profile picked by dish category.
    ManualProfile,
}

impl NutritionSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NutritionSource::Reference => "reference",
            NutritionSource::OpenFoodFacts => "open-food-facts",
            NutritionSource::Usda => "usda",
            NutritionSource::ManualProfile => "manual-profile",
        }
    }

    /// Parses the stored string form. Unknown values yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reference" => Some(NutritionSource::Reference),
            "open-food-facts" => Some(NutritionSource::OpenFoodFacts),
            "usda" => Some(NutritionSource::Usda),
            "manual-profile" => Some(NutritionSource::ManualProfile),
            _ => None,
        }
    }
}

impl std::fmt::Display for NutritionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-serving nutrition. Calories are numeric; every other field is a
/// display string with its unit (`"12g"`, `"340mg"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiber: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iron: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calcium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vitamin_c: Option<String>,
}

impl NutritionInfo {
    /// `true` when a positive calorie count is present.
    #[must_use]
    pub fn has_calories(&self) -> bool {
        self.calories.is_some_and(|c| c > 0)
    }
}

/// Formats a gram quantity the way stored values are written (`"12.5g"`).
#[must_use]
pub fn grams(value: f64) -> String {
    format!("{}g", round1(value))
}

/// Formats a milligram quantity (`"340mg"`).
#[must_use]
pub fn milligrams(value: f64) -> String {
    format!("{}mg", round1(value))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
