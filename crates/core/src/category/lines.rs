//! Income statement cost lines and the routing of expenses onto them.

use serde::{Deserialize, Serialize};

use super::catalog::{Classification, ExpenseCategory, classify};
use crate::records::Expense;

/// Returns true if the vendor or description contains `keyword`,
/// case-insensitively. An empty keyword matches nothing.
#[must_use]
pub fn matches_keyword(expense: &Expense, keyword: &str) -> bool {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        return false;
    }
    [expense.vendor.as_deref(), expense.description.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&keyword))
}

/// Returns true if the expense is in `category` and mentions `keyword`.
#[must_use]
pub fn matches_category_keyword(
    expense: &Expense,
    category: ExpenseCategory,
    keyword: &str,
) -> bool {
    classify(&expense.category) == Classification::Known(category)
        && matches_keyword(expense, keyword)
}

/// Keywords splitting the utilities category into bills.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtilityKeywords {
    /// Internet provider keyword.
    pub internet: String,
    /// Electricity provider keyword.
    pub electricity: String,
    /// Water provider keyword.
    pub water: String,
}

impl Default for UtilityKeywords {
    fn default() -> Self {
        Self {
            internet: "Internet".to_string(),
            electricity: "ENEO".to_string(),
            water: "camwater".to_string(),
        }
    }
}

/// A utilities bill type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilityLine {
    /// Internet subscription (a fixed cost).
    Internet,
    /// Electricity bill.
    Electricity,
    /// Water bill.
    Water,
}

impl UtilityLine {
    /// Identifies the bill type of a utilities expense.
    ///
    /// Internet wins over electricity, which wins over water. Bills naming
    /// none of the keywords return `None`.
    #[must_use]
    pub fn classify(expense: &Expense, keywords: &UtilityKeywords) -> Option<Self> {
        if matches_keyword(expense, &keywords.internet) {
            Some(Self::Internet)
        } else if matches_keyword(expense, &keywords.electricity) {
            Some(Self::Electricity)
        } else if matches_keyword(expense, &keywords.water) {
            Some(Self::Water)
        } else {
            None
        }
    }
}

/// A line of the income statement's cost sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostLine {
    /// Rent (fixed).
    Rent,
    /// Common areas (fixed).
    CommonAreas,
    /// Internet (fixed).
    Internet,
    /// Electricity.
    Electricity,
    /// Water.
    Water,
    /// Cleaning, including cleaning material.
    Cleaning,
    /// Laundry.
    Laundry,
    /// Consumables.
    Consumables,
    /// Supplies.
    Supplies,
    /// Maintenance.
    Maintenance,
    /// Wages.
    Wages,
    /// Taxes.
    Taxes,
    /// Transport.
    Transport,
    /// Mobile data.
    MobileData,
    /// Marketing.
    Marketing,
    /// Furnishings.
    Furnishings,
    /// Security.
    Security,
    /// Other and unclassified expenses.
    Other,
}

impl CostLine {
    /// Fixed cost lines, in report order.
    pub const FIXED: [Self; 3] = [Self::Rent, Self::CommonAreas, Self::Internet];

    /// Operational cost lines, in report order.
    pub const OPERATIONAL: [Self; 15] = [
        Self::Electricity,
        Self::Water,
        Self::Cleaning,
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

    /// Returns true for rent, common areas and internet.
    #[must_use]
    pub const fn is_fixed(self) -> bool {
        matches!(self, Self::Rent | Self::CommonAreas | Self::Internet)
    }

    /// Label printed on the statement.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rent => "Rent",
            Self::CommonAreas => "Common Areas",
            Self::Internet => "Internet",
            Self::Electricity => "Electricity",
            Self::Water => "Water",
            Self::Cleaning => "Cleaning",
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

    /// Routes an expense onto a cost line.
    ///
    /// Unclassified categories land on `Other`. A utilities bill matching
    /// no keyword returns `None` and is left to reconciliation.
    #[must_use]
    pub fn for_expense(expense: &Expense, keywords: &UtilityKeywords) -> Option<Self> {
        let category = match classify(&expense.category) {
            Classification::Known(category) => category,
            Classification::Unclassified => return Some(Self::Other),
        };

        let line = match category {
            ExpenseCategory::Rent => Self::Rent,
            ExpenseCategory::CommonAreas => Self::CommonAreas,
            ExpenseCategory::Utilities => {
                return UtilityLine::classify(expense, keywords).map(Self::from);
            }
            ExpenseCategory::Cleaning | ExpenseCategory::CleaningMaterial => Self::Cleaning,
            ExpenseCategory::Laundry => Self::Laundry,
            ExpenseCategory::Consumables => Self::Consumables,
            ExpenseCategory::Supplies => Self::Supplies,
            ExpenseCategory::Maintenance => Self::Maintenance,
            ExpenseCategory::Wages => Self::Wages,
            ExpenseCategory::Taxes => Self::Taxes,
            ExpenseCategory::Transport => Self::Transport,
            ExpenseCategory::MobileData => Self::MobileData,
            ExpenseCategory::Marketing => Self::Marketing,
            ExpenseCategory::Furnishings => Self::Furnishings,
            ExpenseCategory::Security => Self::Security,
            ExpenseCategory::Other => Self::Other,
        };
        Some(line)
    }
}

impl From<UtilityLine> for CostLine {
    fn from(line: UtilityLine) -> Self {
        match line {
            UtilityLine::Internet => Self::Internet,
            UtilityLine::Electricity => Self::Electricity,
            UtilityLine::Water => Self::Water,
        }
    }
}
