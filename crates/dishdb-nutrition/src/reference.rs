//! Curated per-serving values for well-known dishes.
//!
//! Looked up by normalized name, so "Jollof Rice", "jollof_rice" and
//! "Jollof rice (dish)" all hit the same row.

use std::collections::HashMap;
use std::sync::LazyLock;

use dishdb_core::names::normalize_name;
use dishdb_core::nutrition::{grams, milligrams};
use dishdb_core::NutritionInfo;

/// Numeric nutrient set for one serving, rendered into [`NutritionInfo`]
/// strings on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NutrientProfile {
    pub kcal: u32,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
    pub sodium_mg: f64,
    pub sugar_g: f64,
    pub iron_mg: f64,
    pub calcium_mg: f64,
    pub vitamin_a_mcg: f64,
    pub vitamin_c_mg: f64,
}

impl NutrientProfile {
    #[must_use]
    pub fn to_info(&self) -> NutritionInfo {
        NutritionInfo {
            calories: Some(self.kcal),
            protein: Some(grams(self.protein_g)),
            carbs: Some(grams(self.carbs_g)),
            fat: Some(grams(self.fat_g)),
            fiber: Some(grams(self.fiber_g)),
            sodium: Some(milligrams(self.sodium_mg)),
            sugar: Some(grams(self.sugar_g)),
            iron: Some(milligrams(self.iron_mg)),
            calcium: Some(milligrams(self.calcium_mg)),
            vitamin_a: Some(format!("{}mcg", self.vitamin_a_mcg.round())),
            vitamin_c: Some(milligrams(self.vitamin_c_mg)),
        }
    }
}

#[allow(clippy::too_many_arguments)]
const fn p(
    kcal: u32,
    protein_g: f64,
    carbs_g: f64,
    fat_g: f64,
    fiber_g: f64,
    sodium_mg: f64,
    sugar_g: f64,
    iron_mg: f64,
    calcium_mg: f64,
    vitamin_a_mcg: f64,
    vitamin_c_mg: f64,
) -> NutrientProfile {
    NutrientProfile {
        kcal,
        protein_g,
        carbs_g,
        fat_g,
        fiber_g,
        sodium_mg,
        sugar_g,
        iron_mg,
        calcium_mg,
        vitamin_a_mcg,
        vitamin_c_mg,
    }
}

//                      kcal  prot  carb  fat  fiber  Na    sugar  Fe   Ca   VitA  VitC
#[rustfmt::skip]
const REFERENCE: &[(&str, NutrientProfile)] = &[
    ("jollof rice",     p(360, 8.0, 58.0, 11.0, 2.5, 680.0, 5.0, 2.1, 45.0, 95.0, 14.0)),
    ("waakye",          p(410, 14.0, 72.0, 6.0, 9.0, 420.0, 2.0, 3.8, 70.0, 10.0, 2.0)),
    ("fufu",            p(330, 2.0, 80.0, 0.5, 3.5, 20.0, 1.0, 0.8, 30.0, 5.0, 25.0)),
    ("banku",           p(300, 6.0, 62.0, 2.0, 4.0, 180.0, 1.0, 1.9, 12.0, 8.0, 0.0)),
    ("kenkey",          p(290, 6.5, 60.0, 2.5, 4.5, 200.0, 0.5, 2.0, 10.0, 9.0, 0.0)),
    ("egusi",           p(480, 20.0, 12.0, 40.0, 5.0, 750.0, 3.0, 5.5, 120.0, 310.0, 18.0)),
    ("egusi soup",      p(480, 20.0, 12.0, 40.0, 5.0, 750.0, 3.0, 5.5, 120.0, 310.0, 18.0)),
    ("suya",            p(320, 34.0, 6.0, 18.0, 1.5, 610.0, 2.0, 3.2, 30.0, 25.0, 3.0)),
    ("moi moi",         p(270, 15.0, 28.0, 11.0, 7.0, 390.0, 2.5, 3.0, 60.0, 80.0, 6.0)),
    ("akara",           p(290, 12.0, 24.0, 17.0, 6.0, 300.0, 1.5, 2.6, 55.0, 20.0, 2.0)),
    ("injera",          p(180, 6.5, 37.0, 1.0, 4.0, 170.0, 0.5, 2.9, 75.0, 0.0, 0.0)),
    ("doro wat",        p(420, 32.0, 14.0, 26.0, 3.0, 820.0, 6.0, 3.5, 65.0, 210.0, 12.0)),
    ("shiro",           p(250, 13.0, 30.0, 9.0, 8.0, 540.0, 3.0, 3.4, 60.0, 40.0, 4.0)),
    ("bobotie",         p(430, 26.0, 20.0, 27.0, 1.5, 690.0, 9.0, 3.0, 90.0, 120.0, 2.0)),
    ("bunny chow",      p(560, 24.0, 68.0, 21.0, 7.0, 980.0, 6.0, 4.1, 110.0, 150.0, 9.0)),
    ("chakalaka",       p(140, 5.0, 22.0, 4.0, 6.0, 460.0, 9.0, 1.8, 45.0, 190.0, 38.0)),
    ("bobo de camarão", p(450, 22.0, 30.0, 27.0, 2.5, 740.0, 4.0, 2.2, 95.0, 60.0, 15.0)),
    ("couscous",        p(220, 7.5, 45.0, 1.0, 2.8, 10.0, 0.2, 0.7, 15.0, 0.0, 0.0)),
    ("tagine",          p(390, 28.0, 30.0, 17.0, 6.0, 710.0, 12.0, 3.1, 70.0, 260.0, 10.0)),
    ("shakshouka",      p(240, 13.0, 14.0, 15.0, 3.5, 620.0, 8.0, 2.5, 85.0, 230.0, 40.0)),
    ("ful medames",     p(260, 14.0, 34.0, 8.0, 10.0, 480.0, 2.0, 3.0, 70.0, 15.0, 5.0)),
    ("koshari",         p(470, 15.0, 84.0, 8.0, 10.0, 650.0, 7.0, 4.0, 60.0, 45.0, 9.0)),
    ("ugali",           p(240, 5.5, 52.0, 1.5, 4.5, 5.0, 0.5, 1.5, 5.0, 8.0, 0.0)),
    ("nyama choma",     p(380, 36.0, 0.0, 26.0, 0.0, 390.0, 0.0, 3.3, 20.0, 0.0, 0.0)),
    ("sukuma wiki",     p(110, 4.0, 12.0, 6.0, 4.0, 220.0, 2.0, 1.6, 150.0, 480.0, 80.0)),
    ("thieboudienne",   p(520, 30.0, 70.0, 14.0, 5.0, 900.0, 6.0, 3.0, 110.0, 300.0, 20.0)),
    ("yassa",           p(420, 30.0, 18.0, 25.0, 3.0, 720.0, 9.0, 2.0, 45.0, 40.0, 25.0)),
    ("mafe",            p(480, 27.0, 20.0, 33.0, 5.0, 680.0, 7.0, 3.0, 60.0, 280.0, 15.0)),
    ("kelewele",        p(260, 2.0, 44.0, 10.0, 3.0, 190.0, 20.0, 0.9, 8.0, 70.0, 20.0)),
    ("pepper soup",     p(230, 25.0, 6.0, 11.0, 1.5, 880.0, 2.0, 2.4, 40.0, 60.0, 10.0)),
    ("chapati",         p(300, 7.5, 46.0, 9.5, 3.0, 310.0, 1.5, 2.3, 20.0, 0.0, 0.0)),
    ("piri piri chicken", p(350, 35.0, 4.0, 21.0, 0.8, 720.0, 2.0, 1.5, 25.0, 90.0, 22.0)),
];

static REFERENCE_INDEX: LazyLock<HashMap<String, NutrientProfile>> = LazyLock::new(|| {
    REFERENCE
        .iter()
        .map(|(name, profile)| (normalize_name(name), *profile))
        .collect()
});

/// Reference nutrition for `name`, if the dish is in the curated table.
#[must_use]
pub fn lookup_reference(name: &str) -> Option<NutritionInfo> {
    REFERENCE_INDEX
        .get(&normalize_name(name))
        .map(NutrientProfile::to_info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_and_form_insensitive() {
        let a = lookup_reference("Jollof Rice").expect("jollof is curated");
        let b = lookup_reference("jollof_rice").expect("underscore form");
        let c = lookup_reference("Jollof rice (dish)").expect("parenthetical stripped");
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.calories, Some(360));
        assert_eq!(a.protein.as_deref(), Some("8g"));
        assert_eq!(a.sodium.as_deref(), Some("680mg"));
    }

    #[test]
    fn unknown_dish_is_none() {
        assert!(lookup_reference("Zzyzx stew").is_none());
    }

    #[test]
    fn every_row_has_calories() {
        for (name, profile) in REFERENCE {
            assert!(profile.kcal > 0, "{name} has no calories");
        }
    }

    #[test]
    fn vitamin_a_renders_in_micrograms() {
        let info = lookup_reference("Sukuma wiki").unwrap();
        assert_eq!(info.vitamin_a.as_deref(), Some("480mcg"));
        assert_eq!(info.vitamin_c.as_deref(), Some("80mg"));
    }
}
