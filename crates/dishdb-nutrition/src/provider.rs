use std::future::Future;

use dishdb_core::{NutritionInfo, NutritionSource};

use crate::error::NutritionError;

/// A searchable nutrition database.
pub trait NutritionProvider {
    /// Which [`NutritionSource`] results from this provider are recorded as.
    fn source(&self) -> NutritionSource;

    /// Best match for a free-text dish name. `Ok(None)` when nothing matched.
    fn lookup(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Option<NutritionInfo>, NutritionError>> + Send;
}
