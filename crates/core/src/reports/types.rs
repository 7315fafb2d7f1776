//! Report data types.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use lodgebook_shared::ReportingConfig;
use lodgebook_shared::types::Currency;

use crate::category::{CostLine, UtilityKeywords};
use crate::fiscal::{PeriodType, ReportPeriod};
use crate::records::{Booking, Expense, Property, PropertyFilter};

/// Whether to add a prior-year comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonType {
    /// No comparison.
    #[default]
    None,
    /// Same periods one year earlier.
    #[serde(alias = "lastYear")]
    LastYear,
}

/// Engine settings that do not change between requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Currency of the secondary amount leg, echoed on the report.
    pub currency: Currency,
    /// Gaps up to this amount are not folded into "other".
    pub reconciliation_tolerance: Decimal,
    /// Keywords splitting utilities into bills.
    pub utility_keywords: UtilityKeywords,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            currency: Currency::Xaf,
            reconciliation_tolerance: Decimal::ONE,
            utility_keywords: UtilityKeywords::default(),
        }
    }
}

impl From<&ReportingConfig> for ReportOptions {
    /// The tolerance is never finer than the currency's smallest unit.
    fn from(config: &ReportingConfig) -> Self {
        Self {
            currency: config.currency,
            reconciliation_tolerance: config
                .reconciliation_tolerance
                .abs()
                .round_dp_with_strategy(
                    config.currency.minor_units(),
                    RoundingStrategy::AwayFromZero,
                ),
            utility_keywords: UtilityKeywords {
                internet: config.internet_keyword.clone(),
                electricity: config.electricity_keyword.clone(),
                water: config.water_keyword.clone(),
            },
        }
    }
}

/// Records a report is computed from.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportInput<'a> {
    /// All bookings.
    pub bookings: &'a [Booking],
    /// All expenses.
    pub expenses: &'a [Expense],
    /// All properties.
    pub properties: &'a [Property],
}

/// Selection made by the user for one income statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomeStatementParams {
    /// Calendar year reported on.
    pub year: i32,
    /// Column granularity.
    pub period_type: PeriodType,
    /// Prior-year comparison.
    pub comparison: ComparisonType,
    /// Property restriction.
    pub filter: PropertyFilter,
    /// Zero-based period indices to keep; `None` keeps all.
    pub selected_periods: Option<Vec<usize>>,
    /// "Today" for year-to-date figures.
    pub as_of: NaiveDate,
}

impl IncomeStatementParams {
    /// Creates parameters for a whole year with no comparison or filter.
    #[must_use]
    pub fn new(year: i32, period_type: PeriodType, as_of: NaiveDate) -> Self {
        Self {
            year,
            period_type,
            comparison: ComparisonType::None,
            filter: PropertyFilter::default(),
            selected_periods: None,
            as_of,
        }
    }

    /// Sets the comparison type.
    #[must_use]
    pub fn with_comparison(mut self, comparison: ComparisonType) -> Self {
        self.comparison = comparison;
        self
    }

    /// Sets the property filter.
    #[must_use]
    pub fn with_filter(mut self, filter: PropertyFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Keeps only the given period indices.
    #[must_use]
    pub fn with_selected_periods(mut self, selected: Vec<usize>) -> Self {
        self.selected_periods = Some(selected);
        self
    }
}

/// Operating KPIs per period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiSeries {
    /// Nights booked.
    pub nights_booked: Vec<i64>,
    /// Revenue per booked night.
    pub average_nightly_price: Vec<Decimal>,
    /// Booked nights over available unit-nights, in percent.
    pub occupancy_rate: Vec<Decimal>,
}

/// Revenue per period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSeries {
    /// Booking revenue.
    pub total: Vec<Decimal>,
}

/// Fixed costs per period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedCostSeries {
    /// Rent.
    pub rent: Vec<Decimal>,
    /// Common areas.
    pub common_areas: Vec<Decimal>,
    /// Internet.
    pub internet: Vec<Decimal>,
    /// Sum of the fixed lines.
    pub total: Vec<Decimal>,
}

/// One operational cost line across all periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySeries {
    /// Cost line.
    pub line: CostLine,
    /// Printed label.
    pub label: String,
    /// Amount per period.
    pub values: Vec<Decimal>,
}

/// Operational costs per period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationalCostSeries {
    /// Lines with a non-zero amount in at least one period.
    pub categories_to_include: Vec<CategorySeries>,
    /// Sum of all operational lines, after reconciliation.
    pub total: Vec<Decimal>,
}

impl OperationalCostSeries {
    /// Returns the series of a line, if it is included.
    #[must_use]
    pub fn line(&self, line: CostLine) -> Option<&CategorySeries> {
        self.categories_to_include.iter().find(|c| c.line == line)
    }
}

/// Change of one period against the same period a year earlier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodChange {
    /// Revenue difference (current - prior).
    pub revenue: Decimal,
    /// Net income difference (current - prior).
    pub net_income: Decimal,
    /// Revenue difference relative to prior revenue, in percent.
    pub revenue_percent: Decimal,
}

/// Prior-year totals for the same periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Year compared against.
    pub year: i32,
    /// Prior-year periods.
    pub periods: Vec<ReportPeriod>,
    /// Revenue per period.
    pub revenue: Vec<Decimal>,
    /// Fixed costs per period.
    pub fixed_costs: Vec<Decimal>,
    /// Gross profit per period.
    pub gross_profit: Vec<Decimal>,
    /// Operational costs per period (reconciled).
    pub operational_costs: Vec<Decimal>,
    /// Net income per period.
    pub net_income: Vec<Decimal>,
    /// Current year versus prior year, per period.
    pub changes: Vec<PeriodChange>,
}

/// Totals from January 1 through the as-of date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct YtdSummary {
    /// First day covered; `None` when the summary could not be computed.
    pub start: Option<NaiveDate>,
    /// Last day covered; `None` when the summary could not be computed.
    pub end: Option<NaiveDate>,
    /// Nights booked.
    pub nights_booked: i64,
    /// Revenue per booked night.
    pub average_nightly_price: Decimal,
    /// Occupancy, in percent.
    pub occupancy_rate: Decimal,
    /// Revenue.
    pub revenue: Decimal,
    /// Fixed costs.
    pub fixed_costs: Decimal,
    /// Gross profit.
    pub gross_profit: Decimal,
    /// Operational costs (reconciled).
    pub operational_costs: Decimal,
    /// Net income.
    pub net_income: Decimal,
}

impl YtdSummary {
    /// The all-zero summary shown when computation fails.
    #[must_use]
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Income statement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatement {
    /// Report type identifier.
    pub report_type: String,
    /// Year reported on.
    pub year: i32,
    /// Column granularity.
    pub period_type: PeriodType,
    /// Currency code.
    pub currency: Currency,
    /// Report columns.
    pub periods: Vec<ReportPeriod>,
    /// Operating KPIs.
    pub kpis: KpiSeries,
    /// Revenue section.
    pub revenue: RevenueSeries,
    /// Fixed costs section.
    pub fixed_costs: FixedCostSeries,
    /// Gross profit (revenue - fixed costs).
    pub gross_profit: Vec<Decimal>,
    /// Operational costs section.
    pub operational_costs: OperationalCostSeries,
    /// Amount folded into "other" to match total expenses.
    pub reconciliation: Vec<Decimal>,
    /// Net income (gross profit - operational costs).
    pub net_income: Vec<Decimal>,
    /// Prior-year comparison, when requested.
    pub comparison: Option<ComparisonSummary>,
    /// Year-to-date summary.
    pub ytd: YtdSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(Currency::Xaf, dec!(1), dec!(1))]
    #[case(Currency::Xaf, dec!(0.4), dec!(1))]
    #[case(Currency::Xaf, dec!(-2), dec!(2))]
    #[case(Currency::Eur, dec!(0.004), dec!(0.01))]
    #[case(Currency::Eur, dec!(1), dec!(1))]
    fn test_tolerance_follows_currency_minor_unit(
        #[case] currency: Currency,
        #[case] configured: Decimal,
        #[case] expected: Decimal,
    ) {
        let config = ReportingConfig {
            currency,
            reconciliation_tolerance: configured,
            ..ReportingConfig::default()
        };
        let options = ReportOptions::from(&config);
        assert_eq!(options.reconciliation_tolerance, expected);
        assert_eq!(options.currency, currency);
    }

    #[test]
    fn test_options_take_configured_keywords() {
        let config = ReportingConfig {
            water_keyword: "SNEC".to_string(),
            ..ReportingConfig::default()
        };
        let options = ReportOptions::from(&config);
        assert_eq!(options.utility_keywords.water, "SNEC");
        assert_eq!(options.utility_keywords.electricity, "ENEO");
    }
}
