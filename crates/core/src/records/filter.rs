//! Property filtering for reports.

use serde::{Deserialize, Serialize};

use lodgebook_shared::types::PropertyId;

use super::types::{Booking, Expense, Property};

/// Restricts a report to a single property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFilter {
    /// Property to report on; `None` reports on the whole portfolio.
    pub property_id: Option<PropertyId>,
    /// Keep records that are not tagged with any property.
    #[serde(default)]
    pub include_untagged: bool,
}

impl PropertyFilter {
    /// Creates a new empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to one property.
    #[must_use]
    pub const fn for_property(property_id: PropertyId) -> Self {
        Self {
            property_id: Some(property_id),
            include_untagged: false,
        }
    }

    /// Sets whether to include untagged records.
    #[must_use]
    pub const fn include_untagged(mut self, include: bool) -> Self {
        self.include_untagged = include;
        self
    }

    /// Returns true if the filter is empty (matches everything).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.property_id.is_none()
    }

    fn matches_tag(&self, tag: Option<PropertyId>) -> bool {
        match (self.property_id, tag) {
            (None, _) => true,
            (Some(wanted), Some(tag)) => wanted == tag,
            (Some(_), None) => self.include_untagged,
        }
    }

    /// Returns true if the booking belongs to the filtered property.
    #[must_use]
    pub fn matches_booking(&self, booking: &Booking) -> bool {
        self.matches_tag(booking.property_id)
    }

    /// Returns true if the expense belongs to the filtered property.
    #[must_use]
    pub fn matches_expense(&self, expense: &Expense) -> bool {
        self.matches_tag(expense.property_id)
    }

    /// Returns true if the property counts toward occupancy.
    #[must_use]
    pub fn matches_property(&self, property: &Property) -> bool {
        self.property_id.is_none_or(|wanted| wanted == property.id)
    }
}
