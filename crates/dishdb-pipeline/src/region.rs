//! Country and macro-region guess from category tags.
//!
//! The demonym table is ordered: longer, more specific forms come before
//! the shorter forms they contain ("south sudanese" before "sudanese",
//! "equatorial guinean" before "guinean", "somali" before "malian",
//! "democratic republic of the congo" before "republic of the congo"). The
//! first row matching any tag wins. Without a demonym hit, bare macro-region
//! keywords give a region with no country.

use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionGuess {
    pub country_name: Option<String>,
    /// Lowercase hyphenated country slug (`"cote-d-ivoire"`).
    pub country_id: Option<String>,
    pub region: Option<String>,
}

const WEST: &str = "West Africa";
const EAST: &str = "East Africa";
const NORTH: &str = "North Africa";
const SOUTHERN: &str = "Southern Africa";
const CENTRAL: &str = "Central Africa";

/// (demonym substring, country, region)
const COUNTRIES: &[(&str, &str, &str)] = &[
    ("south sudanese", "South Sudan", EAST),
    ("sudanese", "Sudan", NORTH),
    ("south african", "South Africa", SOUTHERN),
    ("central african republic", "Central African Republic", CENTRAL),
    ("equatorial guinean", "Equatorial Guinea", CENTRAL),
    ("bissau-guinean", "Guinea-Bissau", WEST),
    ("guinea-bissau", "Guinea-Bissau", WEST),
    ("guinean", "Guinea", WEST),
    ("nigerien", "Niger", WEST),
    ("nigerian", "Nigeria", WEST),
    ("ghanaian", "Ghana", WEST),
    ("senegalese", "Senegal", WEST),
    ("ivorian", "Côte d'Ivoire", WEST),
    ("somali", "Somalia", EAST),
    ("malian", "Mali", WEST),
    ("beninese", "Benin", WEST),
    ("togolese", "Togo", WEST),
    ("liberian", "Liberia", WEST),
    ("sierra leonean", "Sierra Leone", WEST),
    ("gambian", "The Gambia", WEST),
    ("burkinabé", "Burkina Faso", WEST),
    ("burkinabe", "Burkina Faso", WEST),
    ("cape verdean", "Cape Verde", WEST),
    ("mauritanian", "Mauritania", WEST),
    ("cameroonian", "Cameroon", CENTRAL),
    ("democratic republic of the congo", "Democratic Republic of the Congo", CENTRAL),
    ("republic of the congo", "Republic of the Congo", CENTRAL),
    ("brazzaville", "Republic of the Congo", CENTRAL),
    // A bare demonym is taken as the larger DRC.
    ("congolese", "Democratic Republic of the Congo", CENTRAL),
    ("gabonese", "Gabon", CENTRAL),
    ("chadian", "Chad", CENTRAL),
    ("angolan", "Angola", CENTRAL),
    ("ethiopian", "Ethiopia", EAST),
    ("eritrean", "Eritrea", EAST),
    ("djiboutian", "Djibouti", EAST),
    ("kenyan", "Kenya", EAST),
    ("tanzanian", "Tanzania", EAST),
    ("zanzibari", "Tanzania", EAST),
    ("ugandan", "Uganda", EAST),
    ("rwandan", "Rwanda", EAST),
    ("burundian", "Burundi", EAST),
    ("malagasy", "Madagascar", EAST),
    ("mauritian", "Mauritius", EAST),
    ("seychellois", "Seychelles", EAST),
    ("comorian", "Comoros", EAST),
    ("egyptian", "Egypt", NORTH),
    ("moroccan", "Morocco", NORTH),
    ("algerian", "Algeria", NORTH),
    ("tunisian", "Tunisia", NORTH),
    ("libyan", "Libya", NORTH),
    ("mozambican", "Mozambique", SOUTHERN),
    ("zambian", "Zambia", SOUTHERN),
    ("zimbabwean", "Zimbabwe", SOUTHERN),
    ("malawian", "Malawi", SOUTHERN),
    ("namibian", "Namibia", SOUTHERN),
    ("botswana", "Botswana", SOUTHERN),
    ("basotho", "Lesotho", SOUTHERN),
    ("lesotho", "Lesotho", SOUTHERN),
    ("swazi", "Eswatini", SOUTHERN),
];

/// (keyword, region) used when no demonym matched.
const MACRO_REGIONS: &[(&str, &str)] = &[
    ("west african", WEST),
    ("east african", EAST),
    ("horn of africa", EAST),
    ("north african", NORTH),
    ("maghreb", NORTH),
    ("southern african", SOUTHERN),
    ("central african", CENTRAL),
];

fn slug(country: &str) -> String {
    let mut out = String::with_capacity(country.len());
    for c in country.chars() {
        match c {
            'ô' | 'Ô' => out.push('o'),
            'é' | 'É' => out.push('e'),
            c if c.is_ascii_alphanumeric() => out.push(c.to_ascii_lowercase()),
            _ => {
                if !out.ends_with('-') {
                    out.push('-');
                }
            }
        }
    }
    out.trim_matches('-').to_owned()
}

/// First (country, region) whose demonym appears in any tag.
#[must_use]
pub fn infer_region<'a, I>(tags: I) -> RegionGuess
where
    I: IntoIterator<Item = &'a String>,
{
    let lowered: Vec<String> = tags.into_iter().map(|t| t.to_lowercase()).collect();
    let any_tag = |needle: &str| lowered.iter().any(|t| t.contains(needle));

    if let Some(&(_, country, region)) = COUNTRIES.iter().find(|&&(d, _, _)| any_tag(d)) {
        return RegionGuess {
            country_name: Some(country.to_owned()),
            country_id: Some(slug(country)),
            region: Some(region.to_owned()),
        };
    }
    if let Some(&(_, region)) = MACRO_REGIONS.iter().find(|&&(k, _)| any_tag(k)) {
        return RegionGuess {
            region: Some(region.to_owned()),
            ..RegionGuess::default()
        };
    }
    RegionGuess::default()
}
