use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Unit;

/// Whether a field value was asserted by the user or derived by the
/// auto-sync policy. Distinguishing the two keeps later auto-syncs from
/// clobbering user intent.
///
/// Serialized as the boolean `packageSizeManuallySet` flag the recipe JSON
/// has always carried (`true` = user-set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provenance {
    #[default]
    Derived,
    UserSet,
}

impl Provenance {
    pub fn is_user_set(&self) -> bool {
        matches!(self, Self::UserSet)
    }
}

impl Serialize for Provenance {
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.is_user_set())
    }
}

impl<'de> Deserialize<'de> for Provenance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let manually_set = bool::deserialize(deserializer)?;
        Ok(if manually_set {
            Self::UserSet
        } else {
            Self::Derived
        })
    }
}

/// One ingredient line of a recipe: how much the recipe uses, and the
/// package economics it was purchased under.
///
/// `calculated_cost` is derived and never user-edited; every mutation path
/// through the editor recomputes it before the mutation is considered
/// complete, so it is never stale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Stable caller-assigned identity; never reused after deletion.
    pub id: String,
    pub name: String,

    pub used_quantity: Decimal,
    pub used_unit: Unit,

    pub package_cost: Decimal,
    pub package_size: Decimal,
    pub package_unit: Unit,

    /// Cost attributable to `used_quantity`, in the currency of
    /// `package_cost`. Zero whenever the inputs are incomplete or the
    /// units are incompatible.
    #[serde(default)]
    pub calculated_cost: Decimal,

    #[serde(default, rename = "packageSizeManuallySet")]
    pub package_size_provenance: Provenance,
}

impl Ingredient {
    /// A blank ingredient: zeroed numerics, both units set to `unit`.
    /// All cost preconditions are false, so the calculated cost starts
    /// (and stays) at zero until real values arrive.
    pub fn new(
        id: String,
        unit: Unit,
    ) -> Self {
        Self {
            id,
            name: String::new(),
            used_quantity: Decimal::ZERO,
            used_unit: unit,
            package_cost: Decimal::ZERO,
            package_size: Decimal::ZERO,
            package_unit: unit,
            calculated_cost: Decimal::ZERO,
            package_size_provenance: Provenance::Derived,
        }
    }
}
