//! Per-period figures and expense reconciliation.
//!
//! All sums use the secondary amount leg and checked arithmetic. Records
//! without dates contribute nothing.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::error::ReportError;
use super::types::{ReportInput, ReportOptions};
use crate::category::CostLine;
use crate::fiscal::ReportPeriod;
use crate::records::{Booking, Expense, PropertyFilter};

/// Records left after applying the property filter.
pub(crate) struct Scope<'a> {
    bookings: Vec<&'a Booking>,
    expenses: Vec<&'a Expense>,
    available_units: u64,
}

impl<'a> Scope<'a> {
    pub(crate) fn new(input: &ReportInput<'a>, filter: &PropertyFilter) -> Self {
        Self {
            bookings: input
                .bookings
                .iter()
                .filter(|b| filter.matches_booking(b))
                .collect(),
            expenses: input
                .expenses
                .iter()
                .filter(|e| filter.matches_expense(e))
                .collect(),
            available_units: input
                .properties
                .iter()
                .filter(|p| filter.matches_property(p))
                .map(|p| u64::from(p.available_units()))
                .sum(),
        }
    }
}

/// Adds two amounts, failing instead of panicking on overflow.
pub(crate) fn add(a: Decimal, b: Decimal) -> Result<Decimal, ReportError> {
    a.checked_add(b).ok_or(ReportError::AmountOverflow)
}

/// Subtracts two amounts, failing instead of panicking on overflow.
pub(crate) fn sub(a: Decimal, b: Decimal) -> Result<Decimal, ReportError> {
    a.checked_sub(b).ok_or(ReportError::AmountOverflow)
}

fn sum<I>(amounts: I) -> Result<Decimal, ReportError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, add)
}

/// `numerator / denominator` rounded to 2 dp, zero when the denominator is.
pub(crate) fn ratio(numerator: Decimal, denominator: Decimal) -> Result<Decimal, ReportError> {
    if denominator.is_zero() {
        return Ok(Decimal::ZERO);
    }
    numerator
        .checked_div(denominator)
        .map(|r| r.round_dp(2))
        .ok_or(ReportError::AmountOverflow)
}

/// Booking activity over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Activity {
    pub nights: i64,
    pub revenue: Decimal,
    pub average_nightly_price: Decimal,
    pub occupancy_rate: Decimal,
}

/// Nights, revenue and derived KPIs of bookings overlapping the period.
pub(crate) fn activity(scope: &Scope<'_>, period: &ReportPeriod) -> Result<Activity, ReportError> {
    let mut nights: i64 = 0;
    let mut revenue = Decimal::ZERO;
    let overlapping = scope
        .bookings
        .iter()
        .filter(|b| b.overlaps(period.start, period.end));
    for booking in overlapping {
        nights = nights
            .checked_add(booking.nights())
            .ok_or(ReportError::AmountOverflow)?;
        revenue = add(revenue, booking.total_price.secondary)?;
    }

    let unit_nights = Decimal::from(scope.available_units)
        .checked_mul(Decimal::from(period.days().max(0)))
        .ok_or(ReportError::AmountOverflow)?;
    let occupancy_rate = ratio(
        Decimal::from(nights)
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or(ReportError::AmountOverflow)?,
        unit_nights,
    )?;

    Ok(Activity {
        nights,
        revenue,
        average_nightly_price: ratio(revenue, Decimal::from(nights))?,
        occupancy_rate,
    })
}

/// Expense totals of a period before reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RawCosts {
    /// Amount routed onto each cost line.
    pub by_line: BTreeMap<CostLine, Decimal>,
    /// Every in-range expense, whatever its category.
    pub authoritative_total: Decimal,
}

/// Sums the expenses dated within the period.
pub(crate) fn raw_costs(
    scope: &Scope<'_>,
    period: &ReportPeriod,
    options: &ReportOptions,
) -> Result<RawCosts, ReportError> {
    let mut costs = RawCosts::default();
    let dated = scope
        .expenses
        .iter()
        .filter(|e| e.falls_within(period.start, period.end));
    for expense in dated {
        let amount = expense.amount.secondary;
        costs.authoritative_total = add(costs.authoritative_total, amount)?;
        if let Some(line) = CostLine::for_expense(expense, &options.utility_keywords) {
            let entry = costs.by_line.entry(line).or_default();
            *entry = add(*entry, amount)?;
        }
    }
    Ok(costs)
}

/// Expense totals of a period after reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ReconciledCosts {
    by_line: BTreeMap<CostLine, Decimal>,
    pub fixed_total: Decimal,
    pub operational_total: Decimal,
    /// Amount added to "other"; zero when within tolerance.
    pub delta: Decimal,
}

impl ReconciledCosts {
    /// Amount on a line (zero when nothing was routed there).
    pub fn amount(&self, line: CostLine) -> Decimal {
        self.by_line.get(&line).copied().unwrap_or_default()
    }
}

/// Forces categorized totals to match the authoritative total.
///
/// When `|authoritative - (fixed + operational)|` exceeds the tolerance the
/// difference is added to "other" in a new breakdown.
pub(crate) fn reconcile(
    raw: &RawCosts,
    tolerance: Decimal,
) -> Result<ReconciledCosts, ReportError> {
    let line_total = |lines: &[CostLine]| {
        sum(lines
            .iter()
            .map(|line| raw.by_line.get(line).copied().unwrap_or_default()))
    };
    let fixed_total = line_total(&CostLine::FIXED)?;
    let raw_operational = line_total(&CostLine::OPERATIONAL)?;

    let categorized = add(fixed_total, raw_operational)?;
    let gap = sub(raw.authoritative_total, categorized)?;
    let delta = if gap.abs() > tolerance {
        gap
    } else {
        Decimal::ZERO
    };

    let mut by_line = raw.by_line.clone();
    if !delta.is_zero() {
        let other = by_line.entry(CostLine::Other).or_default();
        *other = add(*other, delta)?;
    }

    Ok(ReconciledCosts {
        by_line,
        fixed_total,
        operational_total: add(raw_operational, delta)?,
        delta,
    })
}

/// Everything the statement shows for one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PeriodFigures {
    pub activity: Activity,
    pub costs: ReconciledCosts,
    pub gross_profit: Decimal,
    pub net_income: Decimal,
}

/// Computes the figures of one period.
pub(crate) fn figures_for(
    scope: &Scope<'_>,
    period: &ReportPeriod,
    options: &ReportOptions,
) -> Result<PeriodFigures, ReportError> {
    let activity = activity(scope, period)?;
    let raw = raw_costs(scope, period, options)?;
    let costs = reconcile(&raw, options.reconciliation_tolerance)?;

    if !costs.delta.is_zero() {
        tracing::warn!(
            period = %period.label,
            start = %period.start,
            end = %period.end,
            delta = %costs.delta,
            "Categorized expenses did not match total, difference added to other"
        );
    }

    let gross_profit = sub(activity.revenue, costs.fixed_total)?;
    let net_income = sub(gross_profit, costs.operational_total)?;

    Ok(PeriodFigures {
        activity,
        costs,
        gross_profit,
        net_income,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodgebook_shared::types::{BookingId, DualAmount, ExpenseId, PropertyId};
    use rust_decimal_macros::dec;

    use chrono::NaiveDate;

    use crate::records::Property;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn period(start: NaiveDate, end: NaiveDate) -> ReportPeriod {
        ReportPeriod {
            label: "test".to_string(),
            start,
            end,
        }
    }

    fn expense(category: &str, vendor: &str, amount: Decimal, on: NaiveDate) -> Expense {
        Expense {
            id: ExpenseId::new(),
            property_id: None,
            date: Some(on),
            category: category.to_string(),
            vendor: Some(vendor.to_string()),
            description: None,
            amount: DualAmount::secondary(amount),
        }
    }

    #[test]
    fn test_reconcile_within_tolerance_leaves_other_untouched() {
        let raw = RawCosts {
            by_line: BTreeMap::from([(CostLine::Rent, dec!(100)), (CostLine::Water, dec!(50))]),
            authoritative_total: dec!(151),
        };
        let costs = reconcile(&raw, Decimal::ONE).unwrap();
        assert_eq!(costs.delta, Decimal::ZERO);
        assert_eq!(costs.amount(CostLine::Other), Decimal::ZERO);
        assert_eq!(costs.fixed_total, dec!(100));
        assert_eq!(costs.operational_total, dec!(50));
    }

    #[test]
    fn test_reconcile_folds_gap_into_other() {
        let raw = RawCosts {
            by_line: BTreeMap::from([(CostLine::Rent, dec!(100)), (CostLine::Other, dec!(5))]),
            authoritative_total: dec!(180),
        };
        let costs = reconcile(&raw, Decimal::ONE).unwrap();
        assert_eq!(costs.delta, dec!(75));
        assert_eq!(costs.amount(CostLine::Other), dec!(80));
        assert_eq!(costs.operational_total, dec!(80));
        assert_eq!(costs.fixed_total + costs.operational_total, raw.authoritative_total);
        // The raw breakdown is not modified.
        assert_eq!(raw.by_line[&CostLine::Other], dec!(5));
    }

    #[test]
    fn test_reconcile_handles_negative_gap() {
        let raw = RawCosts {
            by_line: BTreeMap::from([(CostLine::Wages, dec!(200))]),
            authoritative_total: dec!(150),
        };
        let costs = reconcile(&raw, Decimal::ONE).unwrap();
        assert_eq!(costs.delta, dec!(-50));
        assert_eq!(costs.operational_total, dec!(150));
    }

    #[test]
    fn test_unmatched_utility_is_reconciled_into_other() {
        let on = date(2024, 5, 10);
        let expenses = vec![
            expense("utilities", "ENEO", dec!(20000), on),
            expense("utilities", "Generator fuel", dec!(7000), on),
        ];
        let input = ReportInput {
            expenses: &expenses,
            ..ReportInput::default()
        };
        let scope = Scope::new(&input, &PropertyFilter::default());
        let may = period(date(2024, 5, 1), date(2024, 5, 31));
        let figures = figures_for(&scope, &may, &ReportOptions::default()).unwrap();

        assert_eq!(figures.costs.amount(CostLine::Electricity), dec!(20000));
        assert_eq!(figures.costs.amount(CostLine::Other), dec!(7000));
        assert_eq!(figures.costs.delta, dec!(7000));
        assert_eq!(figures.costs.operational_total, dec!(27000));
    }

    #[test]
    fn test_activity_kpis() {
        let property = Property {
            id: PropertyId::new(),
            name: "Bonanjo".into(),
            units: Some(2),
        };
        let bookings = vec![Booking {
            id: BookingId::new(),
            property_id: Some(property.id),
            check_in: Some(date(2023, 4, 10)),
            check_out: Some(date(2023, 4, 16)),
            total_price: DualAmount::new(dec!(90), dec!(60000)),
        }];
        let properties = vec![property];
        let input = ReportInput {
            bookings: &bookings,
            properties: &properties,
            ..ReportInput::default()
        };
        let scope = Scope::new(&input, &PropertyFilter::default());
        let activity = activity(&scope, &period(date(2023, 4, 1), date(2023, 4, 30))).unwrap();

        assert_eq!(activity.nights, 6);
        assert_eq!(activity.revenue, dec!(60000));
        assert_eq!(activity.average_nightly_price, dec!(10000));
        // 6 nights over 2 units x 30 days.
        assert_eq!(activity.occupancy_rate, dec!(10));
    }

    #[test]
    fn test_activity_without_units_has_zero_occupancy() {
        let bookings = vec![Booking {
            id: BookingId::new(),
            property_id: None,
            check_in: Some(date(2023, 4, 10)),
            check_out: Some(date(2023, 4, 12)),
            total_price: DualAmount::secondary(dec!(20000)),
        }];
        let input = ReportInput {
            bookings: &bookings,
            ..ReportInput::default()
        };
        let scope = Scope::new(&input, &PropertyFilter::default());
        let activity = activity(&scope, &period(date(2023, 4, 1), date(2023, 4, 30))).unwrap();
        assert_eq!(activity.nights, 2);
        assert_eq!(activity.occupancy_rate, Decimal::ZERO);
    }

    #[test]
    fn test_overflow_is_reported() {
        let on = date(2024, 1, 5);
        let expenses = vec![
            expense("rent", "Landlord", Decimal::MAX, on),
            expense("rent", "Landlord", Decimal::MAX, on),
        ];
        let input = ReportInput {
            expenses: &expenses,
            ..ReportInput::default()
        };
        let scope = Scope::new(&input, &PropertyFilter::default());
        let january = period(date(2024, 1, 1), date(2024, 1, 31));
        let err = raw_costs(&scope, &january, &ReportOptions::default()).unwrap_err();
        assert_eq!(err, ReportError::AmountOverflow);
    }
}
