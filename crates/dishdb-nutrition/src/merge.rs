use dishdb_core::NutritionInfo;

fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn fill(existing: Option<&String>, incoming: Option<&String>) -> Option<String> {
    if is_blank(existing) {
        incoming.cloned()
    } else {
        existing.cloned()
    }
}

fn replace(existing: Option<&String>, incoming: Option<&String>) -> Option<String> {
    incoming.or(existing).cloned()
}

/// Merges freshly found nutrition into what an entry already has.
///
/// Calories, protein, carbs and fat are only filled when missing (calories
/// of zero count as missing). Fiber, sodium, sugar, iron, calcium and the
/// vitamins are replaced by any value `incoming` carries.
#[must_use]
pub fn merge_nutrition(existing: Option<&NutritionInfo>, incoming: &NutritionInfo) -> NutritionInfo {
    let Some(existing) = existing else {
        return incoming.clone();
    };

    let calories = match existing.calories {
        Some(c) if c > 0 => Some(c),
        _ => incoming.calories.or(existing.calories),
    };

    NutritionInfo {
        calories,
        protein: fill(existing.protein.as_ref(), incoming.protein.as_ref()),
        carbs: fill(existing.carbs.as_ref(), incoming.carbs.as_ref()),
        fat: fill(existing.fat.as_ref(), incoming.fat.as_ref()),
        fiber: replace(existing.fiber.as_ref(), incoming.fiber.as_ref()),
        sodium: replace(existing.sodium.as_ref(), incoming.sodium.as_ref()),
        sugar: replace(existing.sugar.as_ref(), incoming.sugar.as_ref()),
        iron: replace(existing.iron.as_ref(), incoming.iron.as_ref()),
        calcium: replace(existing.calcium.as_ref(), incoming.calcium.as_ref()),
        vitamin_a: replace(existing.vitamin_a.as_ref(), incoming.vitamin_a.as_ref()),
        vitamin_c: replace(existing.vitamin_c.as_ref(), incoming.vitamin_c.as_ref()),
    }
}
