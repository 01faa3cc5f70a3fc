//! Canonical measurement-unit and descriptor tables.
//!
//! The tables are immutable static data built once and injected into the
//! parser, so tests can run the parser against alternate tables.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

/// Maps every accepted spelling of a unit to its standardized abbreviation,
/// and knows which amount-adjacent words are size/texture/state descriptors
/// rather than units ("2 large eggs" has no unit).
pub struct UnitTable {
    units: HashMap<&'static str, &'static str>,
    descriptors: HashSet<&'static str>,
}

impl UnitTable {
    /// The built-in table used by [`crate::ingredient::parse_ingredient_line`].
    pub fn standard() -> &'static UnitTable {
        &STANDARD
    }

    pub fn new(
        units: HashMap<&'static str, &'static str>,
        descriptors: HashSet<&'static str>,
    ) -> Self {
        UnitTable { units, descriptors }
    }

    /// Looks up a token case-insensitively, tolerating a trailing period
    /// ("tbsp."), and returns the standardized abbreviation.
    pub fn canonical_unit(&self, token: &str) -> Option<&'static str> {
        let token = token.trim_end_matches('.').to_ascii_lowercase();
        self.units.get(token.as_str()).copied()
    }

    /// True for words like "large" or "diced" that follow an amount but are
    /// not units.
    pub fn is_descriptor(&self, token: &str) -> bool {
        self.descriptors.contains(token.to_ascii_lowercase().as_str())
    }
}

fn standard_units() -> HashMap<&'static str, &'static str> {
    let entries: [(&str, &[&str]); 31] = [
        ("cup", &["cup", "cups", "c"]),
        ("tbsp", &["tablespoon", "tablespoons", "tbsp", "tbsps", "tbs"]),
        ("tsp", &["teaspoon", "teaspoons", "tsp", "tsps"]),
        ("lb", &["pound", "pounds", "lb", "lbs"]),
        ("oz", &["ounce", "ounces", "oz"]),
        ("g", &["gram", "grams", "g"]),
        ("kg", &["kilogram", "kilograms", "kg"]),
        ("mg", &["milligram", "milligrams", "mg"]),
        ("ml", &["milliliter", "milliliters", "millilitre", "millilitres", "ml"]),
        ("l", &["liter", "liters", "litre", "litres", "l"]),
        ("pint", &["pint", "pints", "pt"]),
        ("quart", &["quart", "quarts", "qt"]),
        ("gallon", &["gallon", "gallons", "gal"]),
        ("clove", &["clove", "cloves"]),
        ("can", &["can", "cans"]),
        ("jar", &["jar", "jars"]),
        ("package", &["package", "packages", "pkg", "pkgs"]),
        ("packet", &["packet", "packets"]),
        ("bag", &["bag", "bags"]),
        ("bottle", &["bottle", "bottles"]),
        ("bunch", &["bunch", "bunches"]),
        ("sprig", &["sprig", "sprigs"]),
        ("stalk", &["stalk", "stalks"]),
        ("stick", &["stick", "sticks"]),
        ("slice", &["slice", "slices"]),
        ("piece", &["piece", "pieces"]),
        ("head", &["head", "heads"]),
        ("pinch", &["pinch", "pinches"]),
        ("dash", &["dash", "dashes"]),
        ("handful", &["handful", "handfuls"]),
        ("splash", &["splash", "splashes"]),
    ];

    let mut map = HashMap::new();
    for (canonical, spellings) in entries {
        for spelling in spellings {
            map.insert(*spelling, canonical);
        }
    }
    map
}

fn standard_descriptors() -> HashSet<&'static str> {
    [
        "small", "medium", "large", "extra-large", "jumbo", "big", "heaping", "scant", "level",
        "fresh", "dried", "frozen", "ripe", "raw", "cooked", "whole", "boneless", "skinless",
        "lean", "chopped", "diced", "minced", "sliced", "grated", "shredded", "crushed", "ground",
        "melted", "softened", "beaten", "peeled", "thin", "thick",
    ]
    .into_iter()
    .collect()
}

lazy_static! {
    static ref STANDARD: UnitTable = UnitTable::new(standard_units(), standard_descriptors());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_unit_lookup() {
        let table = UnitTable::standard();
        assert_eq!(table.canonical_unit("cups"), Some("cup"));
        assert_eq!(table.canonical_unit("Tablespoons"), Some("tbsp"));
        assert_eq!(table.canonical_unit("tbsp."), Some("tbsp"));
        assert_eq!(table.canonical_unit("lbs"), Some("lb"));
        assert_eq!(table.canonical_unit("flour"), None);
    }

    #[test]
    fn test_descriptors_are_not_units() {
        let table = UnitTable::standard();
        assert!(table.is_descriptor("Large"));
        assert!(table.is_descriptor("diced"));
        assert_eq!(table.canonical_unit("large"), None);
    }
}
