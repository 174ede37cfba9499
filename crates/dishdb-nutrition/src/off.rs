//! Open Food Facts product search.
//!
//! Values are per 100 g as published. Minerals and vitamins arrive in grams
//! and are converted to the units stored on entries.

use std::collections::HashMap;

use dishdb_core::nutrition::{grams, milligrams};
use dishdb_core::{NutritionInfo, NutritionSource};
use dishdb_fetch::{build_url, HttpFetcher};
use serde::Deserialize;

use crate::error::NutritionError;
use crate::provider::NutritionProvider;

const PROVIDER: &str = "open-food-facts";
const SEARCH_PATH: &str = "cgi/search.pl";
const PAGE_SIZE: &str = "5";
const KJ_PER_KCAL: f64 = 4.184;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    #[serde(default)]
    product_name: Option<String>,
    #[serde(default)]
    nutriments: HashMap<String, serde_json::Value>,
}

impl Product {
    /// Nutriment values are sometimes published as strings.
    fn nutriment(&self, key: &str) -> Option<f64> {
        let value = match self.nutriments.get(key)? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        value.filter(|v| v.is_finite() && *v >= 0.0)
    }

    fn kcal(&self) -> Option<f64> {
        self.nutriment("energy-kcal_100g")
            .or_else(|| self.nutriment("energy_100g").map(|kj| kj / KJ_PER_KCAL))
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn to_info(&self) -> NutritionInfo {
        let g = |key: &str| self.nutriment(key).map(grams);
        let mg = |key: &str| self.nutriment(key).map(|v| milligrams(v * 1_000.0));
        NutritionInfo {
            calories: self.kcal().map(|k| k.round() as u32),
            protein: g("proteins_100g"),
            carbs: g("carbohydrates_100g"),
            fat: g("fat_100g"),
            fiber: g("fiber_100g"),
            sodium: mg("sodium_100g"),
            sugar: g("sugars_100g"),
            iron: mg("iron_100g"),
            calcium: mg("calcium_100g"),
            vitamin_a: self
                .nutriment("vitamin-a_100g")
                .map(|v| format!("{}mcg", (v * 1_000_000.0).round())),
            vitamin_c: mg("vitamin-c_100g"),
        }
    }
}

/// Client for the Open Food Facts search API. No key required.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    fetcher: HttpFetcher,
    base_url: String,
}

impl OpenFoodFactsClient {
    /// # Errors
    ///
    /// Returns [`NutritionError::InvalidBaseUrl`] if `base_url` cannot be
    /// joined with the search path.
    pub fn new(fetcher: HttpFetcher, base_url: &str) -> Result<Self, NutritionError> {
        build_url(base_url, SEARCH_PATH, &[]).map_err(|_| NutritionError::InvalidBaseUrl {
            provider: PROVIDER,
            url: base_url.to_owned(),
        })?;
        Ok(Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

impl NutritionProvider for OpenFoodFactsClient {
    fn source(&self) -> NutritionSource {
        NutritionSource::OpenFoodFacts
    }

    /// Prefers the first product with a positive calorie value; otherwise
    /// returns the first product as-is.
    async fn lookup(&self, query: &str) -> Result<Option<NutritionInfo>, NutritionError> {
        let url = build_url(
            &self.base_url,
            SEARCH_PATH,
            &[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page_size", PAGE_SIZE),
            ],
        )?;
        let context = format!("off search({query})");
        let response: SearchResponse = self
            .fetcher
            .get_typed(&url, self.fetcher.policy(), &context)
            .await?;

        let chosen = response
            .products
            .iter()
            .find(|p| p.kcal().is_some_and(|k| k >= 0.5))
            .or_else(|| response.products.first());

        if let Some(product) = chosen {
            tracing::debug!(
                query,
                product = product.product_name.as_deref().unwrap_or("<unnamed>"),
                "open food facts match"
            );
        }
        Ok(chosen.map(Product::to_info))
    }
}
