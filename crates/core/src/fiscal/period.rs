//! Reporting periods within a calendar year.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::reports::ReportError;

/// Granularity of a report's columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    /// Twelve monthly columns.
    #[default]
    Month,
    /// Four quarterly columns.
    Quarter,
    /// One column for the whole year.
    Year,
}

impl PeriodType {
    /// Number of periods this granularity splits a year into.
    #[must_use]
    pub const fn periods_per_year(self) -> usize {
        match self {
            Self::Month => 12,
            Self::Quarter => 4,
            Self::Year => 1,
        }
    }
}

/// One column of a report: an inclusive date range with a short label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    /// Short label (e.g., "Jan", "Q2", "2024").
    pub label: String,
    /// First day of the period.
    pub start: NaiveDate,
    /// Last day of the period.
    pub end: NaiveDate,
}

impl ReportPeriod {
    /// Number of calendar days covered, both ends included.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// The same period `years` years later (earlier when negative).
    ///
    /// A boundary on the last day of its month stays on the last day of
    /// that month, so February 29 becomes February 28 and vice versa. A
    /// label naming the period's year is rewritten; "Jan" or "Q2" are kept.
    ///
    /// # Errors
    ///
    /// Returns `InvalidYear` if the shifted year cannot be represented.
    pub fn shifted_years(&self, years: i32) -> Result<Self, ReportError> {
        let start = shift_date(self.start, years)?;
        let label = if self.label == self.start.year().to_string() {
            start.year().to_string()
        } else {
            self.label.clone()
        };
        Ok(Self {
            label,
            start,
            end: shift_date(self.end, years)?,
        })
    }
}

fn shift_date(date: NaiveDate, years: i32) -> Result<NaiveDate, ReportError> {
    let year = date
        .year()
        .checked_add(years)
        .ok_or(ReportError::InvalidYear(date.year()))?;
    if date == last_day_of_month(date.year(), date.month())? {
        last_day_of_month(year, date.month())
    } else {
        ymd(year, date.month(), date.day())
    }
}

/// Builds the periods of a report.
pub struct PeriodGenerator;

impl PeriodGenerator {
    /// Generates the periods of `year` at the given granularity.
    ///
    /// `selected` holds zero-based period indices to keep; indices are
    /// returned in ascending order, duplicates and out-of-range indices are
    /// ignored, and an empty selection yields no periods. `None` keeps all.
    ///
    /// # Errors
    ///
    /// Returns `InvalidYear` if a period boundary falls outside the
    /// representable calendar.
    pub fn generate(
        year: i32,
        period_type: PeriodType,
        selected: Option<&[usize]>,
    ) -> Result<Vec<ReportPeriod>, ReportError> {
        let count = period_type.periods_per_year();
        let indices: Vec<usize> = match selected {
            Some(selected) => {
                let mut indices: Vec<usize> =
                    selected.iter().copied().filter(|i| *i < count).collect();
                indices.sort_unstable();
                indices.dedup();
                indices
            }
            None => (0..count).collect(),
        };

        indices
            .into_iter()
            .map(|index| Self::period_at(year, period_type, index))
            .collect()
    }

    fn period_at(
        year: i32,
        period_type: PeriodType,
        index: usize,
    ) -> Result<ReportPeriod, ReportError> {
        // index < 12 here, so the cast is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let index = index as u32;

        match period_type {
            PeriodType::Year => Ok(ReportPeriod {
                label: year.to_string(),
                start: ymd(year, 1, 1)?,
                end: ymd(year, 12, 31)?,
            }),
            PeriodType::Quarter => {
                let first_month = index * 3 + 1;
                Ok(ReportPeriod {
                    label: format!("Q{}", index + 1),
                    start: ymd(year, first_month, 1)?,
                    end: last_day_of_month(year, first_month + 2)?,
                })
            }
            PeriodType::Month => {
                let start = ymd(year, index + 1, 1)?;
                Ok(ReportPeriod {
                    label: start.format("%b").to_string(),
                    start,
                    end: last_day_of_month(year, index + 1)?,
                })
            }
        }
    }
}

/// Builds a date, reporting an unrepresentable year as `InvalidYear`.
pub(crate) fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, ReportError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ReportError::InvalidYear(year))
}

/// Last calendar day of the given month.
pub(crate) fn last_day_of_month(year: i32, month: u32) -> Result<NaiveDate, ReportError> {
    let first_of_next = if month == 12 {
        year.checked_add(1)
            .ok_or(ReportError::InvalidYear(year))
            .and_then(|next| ymd(next, 1, 1))
    } else {
        ymd(year, month + 1, 1)
    };
    first_of_next
        .ok()
        .and_then(|date| date.pred_opt())
        .filter(|date| date.year() == year)
        .ok_or(ReportError::InvalidYear(year))
}
