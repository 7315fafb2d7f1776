//! Income statement generation service.

use lodgebook_shared::types::Currency;
use rust_decimal::Decimal;
use tracing::debug;

use super::aggregate::{self, PeriodFigures, Scope};
use super::error::ReportError;
use super::types::{
    CategorySeries, ComparisonSummary, ComparisonType, FixedCostSeries, IncomeStatement,
    IncomeStatementParams, KpiSeries, OperationalCostSeries, ReportInput, ReportOptions,
    RevenueSeries, YtdSummary,
};
use crate::category::CostLine;
use crate::fiscal::{PeriodGenerator, ReportPeriod};

/// Service for generating income statements.
///
/// Generation is a pure function of its inputs: the same records and
/// parameters always produce the same statement.
#[derive(Debug, Clone, Default)]
pub struct IncomeStatementService {
    options: ReportOptions,
}

impl IncomeStatementService {
    /// Creates a service with the given options.
    #[must_use]
    pub const fn new(options: ReportOptions) -> Self {
        Self { options }
    }

    /// Returns the options the service was built with.
    #[must_use]
    pub const fn options(&self) -> &ReportOptions {
        &self.options
    }

    /// Generates an income statement.
    ///
    /// For every period, net income equals revenue minus fixed and
    /// operational costs, and fixed plus operational costs equal the total
    /// of all expenses dated in the period.
    ///
    /// # Errors
    ///
    /// Returns an error if the year cannot be represented or a total
    /// overflows. Year-to-date failures are not errors; the summary falls
    /// back to zero.
    pub fn generate(
        &self,
        input: &ReportInput<'_>,
        params: &IncomeStatementParams,
    ) -> Result<IncomeStatement, ReportError> {
        let periods = PeriodGenerator::generate(
            params.year,
            params.period_type,
            params.selected_periods.as_deref(),
        )?;
        let scope = Scope::new(input, &params.filter);
        let figures = self.figures(&scope, &periods)?;

        let comparison = match params.comparison {
            ComparisonType::None => None,
            ComparisonType::LastYear => {
                Some(self.prior_year(&scope, params.year, &periods, &figures)?)
            }
        };
        let ytd = self.year_to_date_in(&scope, params.year, params.as_of);

        debug!(
            year = params.year,
            period_type = ?params.period_type,
            periods = periods.len(),
            bookings = input.bookings.len(),
            expenses = input.expenses.len(),
            "Generated income statement"
        );

        Ok(Self::assemble(params, self.options.currency, periods, &figures, comparison, ytd))
    }

    /// Computes the figures of every period.
    pub(crate) fn figures(
        &self,
        scope: &Scope<'_>,
        periods: &[ReportPeriod],
    ) -> Result<Vec<PeriodFigures>, ReportError> {
        periods
            .iter()
            .map(|period| aggregate::figures_for(scope, period, &self.options))
            .collect()
    }

    fn assemble(
        params: &IncomeStatementParams,
        currency: Currency,
        periods: Vec<ReportPeriod>,
        figures: &[PeriodFigures],
        comparison: Option<ComparisonSummary>,
        ytd: YtdSummary,
    ) -> IncomeStatement {
        let column = |f: fn(&PeriodFigures) -> Decimal| figures.iter().map(f).collect::<Vec<_>>();
        let line = |line: CostLine| {
            figures
                .iter()
                .map(|f| f.costs.amount(line))
                .collect::<Vec<_>>()
        };

        let categories_to_include = CostLine::OPERATIONAL
            .into_iter()
            .map(|cost_line| CategorySeries {
                line: cost_line,
                label: cost_line.label().to_string(),
                values: line(cost_line),
            })
            .filter(|series| series.values.iter().any(|v| !v.is_zero()))
            .collect();

        IncomeStatement {
            report_type: "income_statement".to_string(),
            year: params.year,
            period_type: params.period_type,
            currency,
            periods,
            kpis: KpiSeries {
                nights_booked: figures.iter().map(|f| f.activity.nights).collect(),
                average_nightly_price: column(|f| f.activity.average_nightly_price),
                occupancy_rate: column(|f| f.activity.occupancy_rate),
            },
            revenue: RevenueSeries {
                total: column(|f| f.activity.revenue),
            },
            fixed_costs: FixedCostSeries {
                rent: line(CostLine::Rent),
                common_areas: line(CostLine::CommonAreas),
                internet: line(CostLine::Internet),
                total: column(|f| f.costs.fixed_total),
            },
            gross_profit: column(|f| f.gross_profit),
            operational_costs: OperationalCostSeries {
                categories_to_include,
                total: column(|f| f.costs.operational_total),
            },
            reconciliation: column(|f| f.costs.delta),
            net_income: column(|f| f.net_income),
            comparison,
            ytd,
        }
    }
}
