//! Record types consumed by the income statement.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use lodgebook_shared::types::{BookingId, DualAmount, ExpenseId, PropertyId, lenient};

/// A guest stay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier; a fresh one when missing or malformed.
    #[serde(default, deserialize_with = "lenient::id_or_new")]
    pub id: BookingId,
    /// Property the guest stays at.
    #[serde(default, deserialize_with = "lenient::optional_id")]
    pub property_id: Option<PropertyId>,
    /// Arrival date.
    #[serde(default, deserialize_with = "lenient::date")]
    pub check_in: Option<NaiveDate>,
    /// Departure date.
    #[serde(default, deserialize_with = "lenient::date")]
    pub check_out: Option<NaiveDate>,
    /// Total price of the stay.
    #[serde(default)]
    pub total_price: DualAmount,
}

impl Booking {
    /// Returns the stay as `(check_in, check_out)` when both dates are known.
    #[must_use]
    pub fn stay(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.check_in?, self.check_out?))
    }

    /// Number of nights booked; zero when a date is missing or reversed.
    #[must_use]
    pub fn nights(&self) -> i64 {
        self.stay()
            .map_or(0, |(check_in, check_out)| (check_out - check_in).num_days().max(0))
    }

    /// Returns true if the stay touches the inclusive range `[start, end]`.
    #[must_use]
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.stay()
            .is_some_and(|(check_in, check_out)| check_in <= end && check_out >= start)
    }
}

/// A cost paid by the operator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier; a fresh one when missing or malformed.
    #[serde(default, deserialize_with = "lenient::id_or_new")]
    pub id: ExpenseId,
    /// Property the cost belongs to, if it was tagged with one.
    #[serde(default, deserialize_with = "lenient::optional_id")]
    pub property_id: Option<PropertyId>,
    /// Date the expense takes effect.
    #[serde(default, deserialize_with = "lenient::date")]
    pub date: Option<NaiveDate>,
    /// Free-form category label as entered by staff.
    #[serde(default, deserialize_with = "lenient::text")]
    pub category: String,
    /// Vendor name.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub vendor: Option<String>,
    /// Free-text description.
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub description: Option<String>,
    /// Amount paid.
    #[serde(default)]
    pub amount: DualAmount,
}

impl Expense {
    /// Returns true if the expense date lies within `[start, end]`.
    ///
    /// Undated expenses never match.
    #[must_use]
    pub fn falls_within(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date.is_some_and(|date| date >= start && date <= end)
    }
}

/// A rentable property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    /// Unique identifier.
    #[serde(default, deserialize_with = "lenient::id_or_new")]
    pub id: PropertyId,
    /// Display name.
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Number of independently bookable units.
    #[serde(default, deserialize_with = "lenient::optional_count")]
    pub units: Option<u32>,
}

impl Property {
    /// Units counted in the occupancy denominator (one when unspecified).
    #[must_use]
    pub fn available_units(&self) -> u32 {
        self.units.unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn booking(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> Booking {
        Booking {
            id: BookingId::new(),
            property_id: None,
            check_in,
            check_out,
            total_price: DualAmount::secondary(dec!(30000)),
        }
    }

    #[test]
    fn test_booking_nights() {
        let b = booking(Some(date(2024, 1, 30)), Some(date(2024, 2, 2)));
        assert_eq!(b.nights(), 3);
    }

    #[test]
    fn test_booking_without_dates_has_no_nights() {
        assert_eq!(booking(None, Some(date(2024, 2, 2))).nights(), 0);
        assert_eq!(booking(Some(date(2024, 2, 2)), None).nights(), 0);
    }

    #[test]
    fn test_reversed_booking_has_no_nights() {
        let b = booking(Some(date(2024, 2, 5)), Some(date(2024, 2, 2)));
        assert_eq!(b.nights(), 0);
    }

    #[test]
    fn test_booking_overlap_is_inclusive() {
        let b = booking(Some(date(2024, 1, 30)), Some(date(2024, 2, 1)));
        assert!(b.overlaps(date(2024, 2, 1), date(2024, 2, 29)));
        assert!(b.overlaps(date(2024, 1, 1), date(2024, 1, 30)));
        assert!(!b.overlaps(date(2024, 2, 2), date(2024, 2, 29)));
        assert!(!booking(None, None).overlaps(date(2024, 1, 1), date(2024, 12, 31)));
    }

    #[test]
    fn test_expense_falls_within() {
        let expense = Expense {
            id: ExpenseId::new(),
            property_id: None,
            date: Some(date(2024, 3, 31)),
            category: "rent".into(),
            vendor: None,
            description: None,
            amount: DualAmount::secondary(dec!(100)),
        };
        assert!(expense.falls_within(date(2024, 3, 1), date(2024, 3, 31)));
        assert!(!expense.falls_within(date(2024, 4, 1), date(2024, 4, 30)));

        let undated = Expense {
            date: None,
            ..expense
        };
        assert!(!undated.falls_within(date(2024, 1, 1), date(2024, 12, 31)));
    }

    #[test]
    fn test_expense_deserializes_malformed_fields() {
        let json = serde_json::json!({
            "id": uuid::Uuid::new_v4(),
            "date": "not a date",
            "category": null,
            "amount": { "primary": "12.5", "secondary": "oops" }
        });
        let expense: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(expense.date, None);
        assert_eq!(expense.category, "");
        assert_eq!(expense.amount.primary, dec!(12.5));
        assert_eq!(expense.amount.secondary, dec!(0));
    }

    #[test]
    fn test_one_malformed_record_does_not_sink_the_batch() {
        let json = serde_json::json!([
            { "date": "2024-03-01", "category": "rent", "amount": 500,
              "vendor": 42, "description": ["x"], "property_id": "" },
            { "id": uuid::Uuid::new_v4(), "date": "2024-03-02", "category": "wages",
              "vendor": "Staff", "amount": { "secondary": 300 } }
        ]);
        let expenses: Vec<Expense> = serde_json::from_value(json).unwrap();

        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0].amount, DualAmount::secondary(dec!(500)));
        assert_eq!(expenses[0].vendor.as_deref(), Some("42"));
        assert_eq!(expenses[0].description, None);
        assert_eq!(expenses[0].property_id, None);
        assert_ne!(expenses[0].id, expenses[1].id);
        assert_eq!(expenses[1].vendor.as_deref(), Some("Staff"));
    }

    #[test]
    fn test_booking_with_blank_property_is_untagged() {
        let json = serde_json::json!({
            "property_id": "",
            "check_in": "2024-03-05",
            "check_out": "2024-03-07",
            "total_price": "20000"
        });
        let booking: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(booking.property_id, None);
        assert_eq!(booking.nights(), 2);
        assert_eq!(booking.total_price.secondary, dec!(20000));
    }

    #[test]
    fn test_property_units_default_to_one() {
        let property = Property {
            id: PropertyId::new(),
            name: "Studio Bonapriso".into(),
            units: None,
        };
        assert_eq!(property.available_units(), 1);
        assert_eq!(
            Property {
                units: Some(4),
                ..property
            }
            .available_units(),
            4
        );
    }
}
