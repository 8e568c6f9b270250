use serde::{Deserialize, Serialize};

/// Measurement category. Units convert only within the same category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitCategory {
    Volume,
    Weight,
    Count,
}

impl UnitCategory {
    /// The canonical pivot unit for this category (ml for volume, g for
    /// weight, the count unit for count).
    pub fn base_unit(&self) -> Unit {
        match self {
            Self::Volume => Unit::Milliliter,
            Self::Weight => Unit::Gram,
            Self::Count => Unit::Each,
        }
    }

    /// The package unit an ingredient falls back to after a category switch.
    pub fn default_package_unit(&self) -> Unit {
        match self {
            Self::Volume => Unit::Cup,
            Self::Weight => Unit::Pound,
            Self::Count => Unit::Each,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Volume => "volume",
            Self::Weight => "weight",
            Self::Count => "count",
        }
    }
}

impl std::fmt::Display for UnitCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The closed set of supported measurement units.
///
/// Serialized with the short tags used throughout the recipe JSON
/// (`"tsp"`, `"oz"`, `"unit"`, ...). Unknown tags fail deserialization,
/// so malformed persisted data surfaces as an error instead of silently
/// becoming convertible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    // Volume
    #[serde(rename = "tsp")]
    Teaspoon,
    #[serde(rename = "tbsp")]
    Tablespoon,
    #[serde(rename = "cup")]
    Cup,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "L")]
    Liter,
    // Weight
    #[serde(rename = "oz")]
    Ounce,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    // Count
    #[serde(rename = "unit")]
    Each,
}

impl Unit {
    /// Every supported unit, grouped by category.
    pub const ALL: [Unit; 10] = [
        Unit::Teaspoon,
        Unit::Tablespoon,
        Unit::Cup,
        Unit::Milliliter,
        Unit::Liter,
        Unit::Ounce,
        Unit::Pound,
        Unit::Gram,
        Unit::Kilogram,
        Unit::Each,
    ];

    /// Total function: every unit belongs to exactly one category.
    pub fn category(&self) -> UnitCategory {
        match self {
            Self::Teaspoon | Self::Tablespoon | Self::Cup | Self::Milliliter | Self::Liter => {
                UnitCategory::Volume
            }
            Self::Ounce | Self::Pound | Self::Gram | Self::Kilogram => UnitCategory::Weight,
            Self::Each => UnitCategory::Count,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Teaspoon => "tsp",
            Self::Tablespoon => "tbsp",
            Self::Cup => "cup",
            Self::Milliliter => "ml",
            Self::Liter => "L",
            Self::Ounce => "oz",
            Self::Pound => "lb",
            Self::Gram => "g",
            Self::Kilogram => "kg",
            Self::Each => "unit",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tsp" => Some(Self::Teaspoon),
            "tbsp" => Some(Self::Tablespoon),
            "cup" => Some(Self::Cup),
            "ml" => Some(Self::Milliliter),
            "L" => Some(Self::Liter),
            "oz" => Some(Self::Ounce),
            "lb" => Some(Self::Pound),
            "g" => Some(Self::Gram),
            "kg" => Some(Self::Kilogram),
            "unit" => Some(Self::Each),
            _ => None,
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
