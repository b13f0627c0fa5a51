//! Reference daily intake (RDI) values for adults, following the FDA
//! daily value tables for nutrition and supplement facts labels, plus the
//! alias table used to fold upstream nutrient names onto canonical ones.

use serde::Serialize;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RdiEntry {
    pub amount: f64,
    pub unit: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<f64>,
}

const fn rdi(amount: f64, unit: &'static str, upper_limit: Option<f64>) -> RdiEntry {
    RdiEntry { amount, unit, upper_limit }
}

pub const NUTRIENT_RDI: &[(&str, RdiEntry)] = &[
    // Vitamins
    ("Vitamin A", rdi(900.0, "mcg", Some(3000.0))),
    ("Vitamin C", rdi(90.0, "mg", Some(2000.0))),
    ("Vitamin D", rdi(20.0, "mcg", Some(100.0))),
    ("Vitamin E", rdi(15.0, "mg", Some(1000.0))),
    ("Vitamin K", rdi(120.0, "mcg", None)),
    ("Vitamin B1", rdi(1.2, "mg", None)),
    ("Thiamin", rdi(1.2, "mg", None)),
    ("Vitamin B2", rdi(1.3, "mg", None)),
    ("Riboflavin", rdi(1.3, "mg", None)),
    ("Vitamin B3", rdi(16.0, "mg", Some(35.0))),
    ("Niacin", rdi(16.0, "mg", Some(35.0))),
    ("Vitamin B5", rdi(5.0, "mg", None)),
    ("Pantothenic Acid", rdi(5.0, "mg", None)),
    ("Vitamin B6", rdi(1.7, "mg", Some(100.0))),
    ("Vitamin B7", rdi(30.0, "mcg", None)),
    ("Biotin", rdi(30.0, "mcg", None)),
    ("Vitamin B9", rdi(400.0, "mcg", Some(1000.0))),
    ("Folate", rdi(400.0, "mcg", Some(1000.0))),
    ("Folic Acid", rdi(400.0, "mcg", Some(1000.0))),
    ("Vitamin B12", rdi(2.4, "mcg", None)),
    ("Cobalamin", rdi(2.4, "mcg", None)),
    ("Choline", rdi(550.0, "mg", Some(3500.0))),
    // Minerals
    ("Calcium", rdi(1000.0, "mg", Some(2500.0))),
    ("Iron", rdi(18.0, "mg", Some(45.0))),
    // Upper limit applies to supplemental magnesium only.
    ("Magnesium", rdi(420.0, "mg", Some(350.0))),
    ("Phosphorus", rdi(1000.0, "mg", Some(4000.0))),
    ("Potassium", rdi(4700.0, "mg", None)),
    ("Sodium", rdi(2300.0, "mg", Some(2300.0))),
    ("Zinc", rdi(11.0, "mg", Some(40.0))),
    ("Copper", rdi(0.9, "mg", Some(10.0))),
    ("Manganese", rdi(2.3, "mg", Some(11.0))),
    ("Selenium", rdi(55.0, "mcg", Some(400.0))),
    ("Chromium", rdi(35.0, "mcg", None)),
    ("Molybdenum", rdi(45.0, "mcg", Some(2000.0))),
    ("Iodine", rdi(150.0, "mcg", Some(1100.0))),
    // Other
    ("Omega-3", rdi(1600.0, "mg", None)),
    ("Fiber", rdi(28.0, "g", None)),
];

/// Lowercase, hyphenated spellings seen from lookup sources, mapped to the
/// canonical names used as keys in [`NUTRIENT_RDI`].
const NUTRIENT_ALIASES: &[(&str, &str)] = &[
    ("vitamin-a", "Vitamin A"),
    ("vitamin-c", "Vitamin C"),
    ("vitamin-d", "Vitamin D"),
    ("vitamin-e", "Vitamin E"),
    ("vitamin-k", "Vitamin K"),
    ("vitamin-b1", "Vitamin B1"),
    ("vitamin-b2", "Vitamin B2"),
    ("vitamin-b3", "Vitamin B3"),
    ("vitamin-b5", "Vitamin B5"),
    ("vitamin-b6", "Vitamin B6"),
    ("vitamin-b7", "Vitamin B7"),
    ("vitamin-b9", "Vitamin B9"),
    ("vitamin-b12", "Vitamin B12"),
    ("thiamine", "Thiamin"),
    ("riboflavine", "Riboflavin"),
    ("niacine", "Niacin"),
    ("pantothenic-acid", "Pantothenic Acid"),
    ("biotine", "Biotin"),
    ("folates", "Folate"),
    ("folic-acid", "Folic Acid"),
    ("cobalamine", "Cobalamin"),
    ("calcium", "Calcium"),
    ("iron", "Iron"),
    ("magnesium", "Magnesium"),
    ("phosphorus", "Phosphorus"),
    ("potassium", "Potassium"),
    ("sodium", "Sodium"),
    ("zinc", "Zinc"),
    ("copper", "Copper"),
    ("manganese", "Manganese"),
    ("selenium", "Selenium"),
    ("chromium", "Chromium"),
    ("molybdenum", "Molybdenum"),
    ("iodine", "Iodine"),
    ("fiber", "Fiber"),
    ("omega-3-fat", "Omega-3"),
];

/// Lowercases `name` and collapses every run of whitespace into one hyphen.
/// Leading and trailing runs become hyphens too, so padded input does not match an alias.
fn alias_key(name: &str) -> String {
    let mut key = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                key.push('-');
                in_whitespace = true;
            }
        } else {
            key.extend(ch.to_lowercase());
            in_whitespace = false;
        }
    }
    key
}

/// Maps a free-text nutrient name onto its canonical display name.
///
/// Unknown names come back exactly as given (original casing included), which
/// keeps the function idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize_nutrient_name(name: &str) -> String {
    let key = alias_key(name);
    NUTRIENT_ALIASES
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Looks up the RDI entry for a raw or canonical nutrient name.
pub fn rdi_info(name: &str) -> Option<RdiEntry> {
    let normalized = normalize_nutrient_name(name);
    NUTRIENT_RDI
        .iter()
        .find(|(canonical, _)| *canonical == normalized)
        .map(|(_, entry)| *entry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_known_aliases() {
        assert_eq!(normalize_nutrient_name("vitamin-d"), "Vitamin D");
        assert_eq!(normalize_nutrient_name("Vitamin D"), "Vitamin D");
        assert_eq!(normalize_nutrient_name("VITAMIN   b12"), "Vitamin B12");
        assert_eq!(normalize_nutrient_name("Folic Acid"), "Folic Acid");
        assert_eq!(normalize_nutrient_name("thiamine"), "Thiamin");
        assert_eq!(normalize_nutrient_name("omega-3-fat"), "Omega-3");
    }

    #[test]
    fn test_normalize_unknown_passes_through_unchanged() {
        assert_eq!(normalize_nutrient_name("Ginkgo Biloba"), "Ginkgo Biloba");
        assert_eq!(normalize_nutrient_name("CoQ10"), "CoQ10");
        // Padded input keeps its padding because the hyphenated key has edge hyphens.
        assert_eq!(normalize_nutrient_name(" iron "), " iron ");
        // Spellings outside the alias table are not guessed at, even near misses.
        assert_eq!(normalize_nutrient_name("choline"), "choline");
        assert_eq!(normalize_nutrient_name("Omega 3"), "Omega 3");
        assert_eq!(rdi_info("choline"), None);
        assert_eq!(rdi_info("Choline").map(|rdi| rdi.amount), Some(550.0));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = [
            "vitamin-d", "Vitamin C", "Thiamin", "thiamine", "Omega-3", "Folate", "folates",
            "Pantothenic Acid", "Ginkgo Biloba", "", "  ", "zinc", "Fibre",
        ];
        for input in inputs {
            let once = normalize_nutrient_name(input);
            assert_eq!(normalize_nutrient_name(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_every_alias_targets_a_table_entry() {
        for (alias, canonical) in NUTRIENT_ALIASES {
            assert!(
                NUTRIENT_RDI.iter().any(|(name, _)| name == canonical),
                "alias {} points at {} which has no RDI entry",
                alias,
                canonical
            );
        }
    }

    #[test]
    fn test_rdi_info_lookup() {
        let vitamin_c = rdi_info("vitamin c").unwrap();
        assert_eq!(vitamin_c.amount, 90.0);
        assert_eq!(vitamin_c.unit, "mg");
        assert_eq!(vitamin_c.upper_limit, Some(2000.0));

        assert_eq!(rdi_info("Vitamin K").unwrap().upper_limit, None);
        assert!(rdi_info("Unobtainium").is_none());
    }
}
