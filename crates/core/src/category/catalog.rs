//! The fixed catalog of expense categories and raw-label classification.

use serde::{Deserialize, Serialize};

/// Known expense categories.
///
/// `Cleaning` and `CleaningMaterial` are both still present in older
/// records; reports merge them into one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    /// Monthly rent paid to landlords.
    Rent,
    /// Building service charges.
    CommonAreas,
    /// Electricity, water and internet bills.
    Utilities,
    /// Cleaning services.
    Cleaning,
    /// Cleaning products (legacy label).
    CleaningMaterial,
    /// Linen and laundry.
    Laundry,
    /// Guest consumables.
    Consumables,
    /// General supplies.
    Supplies,
    /// Repairs and upkeep.
    Maintenance,
    /// Staff wages.
    Wages,
    /// Taxes and levies.
    Taxes,
    /// Transport and fuel.
    Transport,
    /// Mobile data bundles.
    MobileData,
    /// Advertising and listing fees.
    Marketing,
    /// Furniture and equipment.
    Furnishings,
    /// Guards and security services.
    Security,
    /// Anything else.
    Other,
}

impl ExpenseCategory {
    /// Every category, in catalog order.
    pub const ALL: [Self; 17] = [
        Self::Rent,
        Self::CommonAreas,
        Self::Utilities,
        Self::Cleaning,
        Self::CleaningMaterial,
        Self::Laundry,
        Self::Consumables,
        Self::Supplies,
        Self::Maintenance,
        Self::Wages,
        Self::Taxes,
        Self::Transport,
        Self::MobileData,
        Self::Marketing,
        Self::Furnishings,
        Self::Security,
        Self::Other,
    ];

    /// Stored value of the category.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Rent => "rent",
            Self::CommonAreas => "common_areas",
            Self::Utilities => "utilities",
            Self::Cleaning => "cleaning",
            Self::CleaningMaterial => "cleaning_material",
            Self::Laundry => "laundry",
            Self::Consumables => "consumables",
            Self::Supplies => "supplies",
            Self::Maintenance => "maintenance",
            Self::Wages => "wages",
            Self::Taxes => "taxes",
            Self::Transport => "transport",
            Self::MobileData => "mobile_data",
            Self::Marketing => "marketing",
            Self::Furnishings => "furnishings",
            Self::Security => "security",
            Self::Other => "other",
        }
    }

    /// Human-readable label shown in the admin UI.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rent => "Rent",
            Self::CommonAreas => "Common Areas",
            Self::Utilities => "Utilities",
            Self::Cleaning => "Cleaning",
            Self::CleaningMaterial => "Cleaning Material",
            Self::Laundry => "Laundry",
            Self::Consumables => "Consumables",
            Self::Supplies => "Supplies",
            Self::Maintenance => "Maintenance",
            Self::Wages => "Wages",
            Self::Taxes => "Taxes",
            Self::Transport => "Transport",
            Self::MobileData => "Mobile Data",
            Self::Marketing => "Marketing",
            Self::Furnishings => "Furnishings",
            Self::Security => "Security",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of matching a raw category label against the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The label names a catalog entry.
    Known(ExpenseCategory),
    /// The label is empty or not in the catalog.
    Unclassified,
}

impl Classification {
    /// Returns the category, if known.
    #[must_use]
    pub const fn category(self) -> Option<ExpenseCategory> {
        match self {
            Self::Known(category) => Some(category),
            Self::Unclassified => None,
        }
    }
}

/// Matches a raw category label by stored value or display label,
/// ignoring case and surrounding whitespace.
#[must_use]
pub fn classify(raw: &str) -> Classification {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Classification::Unclassified;
    }

    ExpenseCategory::ALL
        .into_iter()
        .find(|category| {
            category.value() == normalized || category.label().to_lowercase() == normalized
        })
        .map_or(Classification::Unclassified, Classification::Known)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("rent", ExpenseCategory::Rent)]
    #[case("  RENT ", ExpenseCategory::Rent)]
    #[case("common_areas", ExpenseCategory::CommonAreas)]
    #[case("Common Areas", ExpenseCategory::CommonAreas)]
    #[case("cleaning_material", ExpenseCategory::CleaningMaterial)]
    #[case("Mobile Data", ExpenseCategory::MobileData)]
    #[case("other", ExpenseCategory::Other)]
    fn test_classify_known(#[case] raw: &str, #[case] expected: ExpenseCategory) {
        assert_eq!(classify(raw), Classification::Known(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("bogus_category")]
    #[case("common-areas")]
    fn test_classify_unknown(#[case] raw: &str) {
        assert_eq!(classify(raw), Classification::Unclassified);
        assert_eq!(classify(raw).category(), None);
    }

    #[test]
    fn test_every_value_and_label_round_trips() {
        for category in ExpenseCategory::ALL {
            assert_eq!(classify(category.value()).category(), Some(category));
            assert_eq!(classify(category.label()).category(), Some(category));
        }
    }

    #[test]
    fn test_serde_uses_stored_value() {
        let json = serde_json::to_string(&ExpenseCategory::CommonAreas).unwrap();
        assert_eq!(json, "\"common_areas\"");
    }
}
