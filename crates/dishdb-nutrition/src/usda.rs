//! USDA `FoodData` Central food search.
//!
//! Needs an API key. Rate limiting is never retried here: the caller's
//! circuit breaker must see it on the first 429.

use dishdb_core::nutrition::{grams, milligrams};
use dishdb_core::{NutritionInfo, NutritionSource};
use dishdb_fetch::{build_url, HttpFetcher};
use serde::Deserialize;

use crate::error::NutritionError;
use crate::provider::NutritionProvider;

const PROVIDER: &str = "usda";
const SEARCH_PATH: &str = "foods/search";
const PAGE_SIZE: &str = "5";
const OVER_RATE_LIMIT: &str = "OVER_RATE_LIMIT";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<Food>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Food {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    food_nutrients: Vec<FoodNutrient>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FoodNutrient {
    #[serde(default)]
    nutrient_name: String,
    #[serde(default)]
    unit_name: String,
    #[serde(default)]
    value: Option<f64>,
}

impl Food {
    fn value(&self, names: &[&str], unit: &str) -> Option<f64> {
        self.food_nutrients
            .iter()
            .find(|n| {
                names.contains(&n.nutrient_name.as_str()) && n.unit_name.eq_ignore_ascii_case(unit)
            })
            .and_then(|n| n.value)
            .filter(|v| v.is_finite() && *v >= 0.0)
    }

    fn kcal(&self) -> Option<f64> {
        self.value(&["Energy"], "KCAL")
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn to_info(&self) -> NutritionInfo {
        NutritionInfo {
            calories: self.kcal().map(|k| k.round() as u32),
            protein: self.value(&["Protein"], "G").map(grams),
            carbs: self.value(&["Carbohydrate, by difference"], "G").map(grams),
            fat: self.value(&["Total lipid (fat)"], "G").map(grams),
            fiber: self.value(&["Fiber, total dietary"], "G").map(grams),
            sodium: self.value(&["Sodium, Na"], "MG").map(milligrams),
            sugar: self
                .value(&["Sugars, total including NLEA", "Total Sugars"], "G")
                .map(grams),
            iron: self.value(&["Iron, Fe"], "MG").map(milligrams),
            calcium: self.value(&["Calcium, Ca"], "MG").map(milligrams),
            vitamin_a: self
                .value(&["Vitamin A, RAE"], "UG")
                .map(|v| format!("{}mcg", v.round())),
            vitamin_c: self
                .value(&["Vitamin C, total ascorbic acid"], "MG")
                .map(milligrams),
        }
    }
}

/// `OVER_RATE_LIMIT` error envelope delivered with a non-429 status.
fn check_rate_limit(body: &serde_json::Value) -> Result<(), NutritionError> {
    let Some(err) = body.get("error") else {
        return Ok(());
    };
    if err.get("code").and_then(serde_json::Value::as_str) == Some(OVER_RATE_LIMIT) {
        let message = err
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("rate limit exceeded")
            .to_owned();
        return Err(NutritionError::RateLimited {
            provider: PROVIDER,
            message,
        });
    }
    Ok(())
}

/// Client for the USDA `FoodData` Central search endpoint.
#[derive(Clone)]
pub struct UsdaClient {
    fetcher: HttpFetcher,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for UsdaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsdaClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl UsdaClient {
    /// # Errors
    ///
    /// Returns [`NutritionError::InvalidBaseUrl`] if `base_url` cannot be
    /// joined with the search path.
    pub fn new(fetcher: HttpFetcher, base_url: &str, api_key: &str) -> Result<Self, NutritionError> {
        build_url(base_url, SEARCH_PATH, &[]).map_err(|_| NutritionError::InvalidBaseUrl {
            provider: PROVIDER,
            url: base_url.to_owned(),
        })?;
        Ok(Self {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        })
    }
}

impl NutritionProvider for UsdaClient {
    fn source(&self) -> NutritionSource {
        NutritionSource::Usda
    }

    /// First food with a calorie value, else the first food returned.
    async fn lookup(&self, query: &str) -> Result<Option<NutritionInfo>, NutritionError> {
        let url = build_url(
            &self.base_url,
            SEARCH_PATH,
            &[
                ("query", query),
                ("pageSize", PAGE_SIZE),
                ("api_key", self.api_key.as_str()),
            ],
        )?;
        let policy = self.fetcher.policy().without_rate_limit_retry();
        let body = self.fetcher.get_json_with(&url, policy).await?;
        check_rate_limit(&body)?;

        let response: SearchResponse =
            serde_json::from_value(body).map_err(|e| NutritionError::Deserialize {
                context: format!("usda search({query})"),
                source: e,
            })?;

        let chosen = response
            .foods
            .iter()
            .find(|f| f.kcal().is_some_and(|k| k >= 0.5))
            .or_else(|| response.foods.first());
        if let Some(food) = chosen {
            tracing::debug!(
                query,
                food = food.description.as_deref().unwrap_or("<unnamed>"),
                "usda match"
            );
        }
        Ok(chosen.map(Food::to_info))
    }
}
