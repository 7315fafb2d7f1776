//! Prior-year comparison and year-to-date summaries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::warn;

use super::aggregate::{self, PeriodFigures, Scope, ratio, sub};
use super::error::ReportError;
use super::service::IncomeStatementService;
use super::types::{ComparisonSummary, PeriodChange, ReportInput, YtdSummary};
use crate::fiscal::ReportPeriod;
use crate::fiscal::period::ymd;
use crate::records::PropertyFilter;

impl IncomeStatementService {
    /// Recomputes the report's periods one year earlier.
    ///
    /// Only top-level totals are kept; each prior period is reconciled on
    /// its own.
    pub(crate) fn prior_year(
        &self,
        scope: &Scope<'_>,
        year: i32,
        periods: &[ReportPeriod],
        current: &[PeriodFigures],
    ) -> Result<ComparisonSummary, ReportError> {
        let prior = year.checked_sub(1).ok_or(ReportError::InvalidYear(year))?;
        let periods = periods
            .iter()
            .map(|period| period.shifted_years(-1))
            .collect::<Result<Vec<_>, _>>()?;
        let figures = self.figures(scope, &periods)?;

        let changes = current
            .iter()
            .zip(&figures)
            .map(|(now, before)| change(now, before))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComparisonSummary {
            year: prior,
            periods,
            revenue: figures.iter().map(|f| f.activity.revenue).collect(),
            fixed_costs: figures.iter().map(|f| f.costs.fixed_total).collect(),
            gross_profit: figures.iter().map(|f| f.gross_profit).collect(),
            operational_costs: figures.iter().map(|f| f.costs.operational_total).collect(),
            net_income: figures.iter().map(|f| f.net_income).collect(),
            changes,
        })
    }

    /// Year-to-date summary for `year` as seen on `as_of`.
    ///
    /// Never fails: when the summary cannot be computed the condition is
    /// logged and an all-zero summary is returned.
    pub fn year_to_date(
        &self,
        input: &ReportInput<'_>,
        filter: &PropertyFilter,
        year: i32,
        as_of: NaiveDate,
    ) -> YtdSummary {
        self.year_to_date_in(&Scope::new(input, filter), year, as_of)
    }

    /// Fallible year-to-date summary.
    ///
    /// Covers January 1 of `year` through `as_of`, capped at December 31.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` when `as_of` precedes the year, and
    /// `InvalidYear` or `AmountOverflow` like [`Self::generate`].
    pub fn try_year_to_date(
        &self,
        input: &ReportInput<'_>,
        filter: &PropertyFilter,
        year: i32,
        as_of: NaiveDate,
    ) -> Result<YtdSummary, ReportError> {
        self.try_year_to_date_in(&Scope::new(input, filter), year, as_of)
    }

    pub(crate) fn year_to_date_in(
        &self,
        scope: &Scope<'_>,
        year: i32,
        as_of: NaiveDate,
    ) -> YtdSummary {
        self.try_year_to_date_in(scope, year, as_of)
            .unwrap_or_else(|err| {
                warn!(year, %as_of, error = %err, "Year-to-date summary unavailable, showing zeros");
                YtdSummary::zero()
            })
    }

    fn try_year_to_date_in(
        &self,
        scope: &Scope<'_>,
        year: i32,
        as_of: NaiveDate,
    ) -> Result<YtdSummary, ReportError> {
        let start = ymd(year, 1, 1)?;
        let end = as_of.min(ymd(year, 12, 31)?);
        if end < start {
            return Err(ReportError::InvalidDateRange { start, end });
        }

        let window = ReportPeriod {
            label: "YTD".to_string(),
            start,
            end,
        };
        let figures = aggregate::figures_for(scope, &window, self.options())?;
        Ok(YtdSummary {
            start: Some(start),
            end: Some(end),
            nights_booked: figures.activity.nights,
            average_nightly_price: figures.activity.average_nightly_price,
            occupancy_rate: figures.activity.occupancy_rate,
            revenue: figures.activity.revenue,
            fixed_costs: figures.costs.fixed_total,
            gross_profit: figures.gross_profit,
            operational_costs: figures.costs.operational_total,
            net_income: figures.net_income,
        })
    }
}

fn change(now: &PeriodFigures, before: &PeriodFigures) -> Result<PeriodChange, ReportError> {
    let revenue = sub(now.activity.revenue, before.activity.revenue)?;
    let scaled = revenue
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or(ReportError::AmountOverflow)?;
    Ok(PeriodChange {
        revenue,
        net_income: sub(now.net_income, before.net_income)?,
        revenue_percent: ratio(scaled, before.activity.revenue)?,
    })
}
