//! Nutrition enrichment: the curated reference table, the two nutrition
//! database clients, heuristic fallback profiles and the cascade that tries
//! them in order. Also hosts the optional recipe search client.

pub mod breaker;
pub mod cascade;
pub mod error;
pub mod merge;
pub mod off;
pub mod profiles;
pub mod provider;
pub mod recipes;
pub mod reference;
pub mod usda;

pub use breaker::CircuitBreaker;
pub use cascade::{NutritionCascade, NutritionMatch};
pub use error::NutritionError;
pub use merge::merge_nutrition;
pub use off::OpenFoodFactsClient;
pub use profiles::manual_profile;
pub use provider::NutritionProvider;
pub use recipes::{RecipeClient, RecipeSearch, RecipeSummary};
pub use reference::lookup_reference;
pub use usda::UsdaClient;
