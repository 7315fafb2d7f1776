//! Report routes.
//!
//! The caller sends the bookings, expenses and properties it already holds;
//! the route only computes. Nothing is read from or written to storage.

use axum::{Json, Router, extract::State, routing::post};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::{AppState, error::ApiError};
use lodgebook_core::fiscal::PeriodType;
use lodgebook_core::records::{Booking, Expense, Property, PropertyFilter};
use lodgebook_core::reports::{
    ComparisonType, IncomeStatement, IncomeStatementParams, ReportInput,
};
use lodgebook_shared::AppError;
use lodgebook_shared::types::PropertyId;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/reports/income-statement",
        post(generate_income_statement),
    )
}

// ============================================================================
// Request Types
// ============================================================================

/// Body of an income statement request.
#[derive(Debug, Deserialize)]
pub struct IncomeStatementRequest {
    /// Calendar year reported on.
    pub year: i32,
    /// Column granularity (defaults to months).
    #[serde(default)]
    pub period_type: PeriodType,
    /// Prior-year comparison (defaults to none).
    #[serde(default)]
    pub comparison: ComparisonType,
    /// Restrict the report to one property.
    #[serde(default)]
    pub property_id: Option<PropertyId>,
    /// Keep untagged expenses when a property is selected.
    #[serde(default)]
    pub include_untagged: bool,
    /// Zero-based period indices to keep.
    #[serde(default)]
    pub selected_periods: Option<Vec<usize>>,
    /// Year-to-date cutoff (defaults to today in the configured timezone).
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// All bookings.
    #[serde(default)]
    pub bookings: Vec<Booking>,
    /// All expenses.
    #[serde(default)]
    pub expenses: Vec<Expense>,
    /// All properties.
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl IncomeStatementRequest {
    fn params(&self, today: NaiveDate) -> IncomeStatementParams {
        let filter = PropertyFilter {
            property_id: self.property_id,
            include_untagged: self.include_untagged,
        };
        let mut params = IncomeStatementParams::new(
            self.year,
            self.period_type,
            self.as_of.unwrap_or(today),
        )
        .with_comparison(self.comparison)
        .with_filter(filter);
        params.selected_periods.clone_from(&self.selected_periods);
        params
    }

    fn input(&self) -> ReportInput<'_> {
        ReportInput {
            bookings: &self.bookings,
            expenses: &self.expenses,
            properties: &self.properties,
        }
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /reports/income-statement
async fn generate_income_statement(
    State(state): State<AppState>,
    Json(request): Json<IncomeStatementRequest>,
) -> Result<Json<IncomeStatement>, ApiError> {
    if let Some(property_id) = request.property_id
        && !request.properties.is_empty()
        && !request.properties.iter().any(|p| p.id == property_id)
    {
        return Err(AppError::UnknownProperty(property_id).into());
    }

    let params = request.params(state.today());
    let report = state.reports.generate(&request.input(), &params)?;

    info!(
        year = params.year,
        period_type = ?params.period_type,
        periods = report.periods.len(),
        "Income statement generated"
    );

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, http::StatusCode};
    use http_body_util::BodyExt;
    use lodgebook_shared::AppConfig;
    use rstest::rstest;
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::create_router;

    async fn post_report(body: Value) -> (StatusCode, Value) {
        let app = create_router(AppState::from_config(&AppConfig::default()), 1024 * 1024);
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/reports/income-statement")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_income_statement_from_records() {
        let (status, body) = post_report(json!({
            "year": 2024,
            "period_type": "month",
            "comparison": "lastYear",
            "as_of": "2024-06-30",
            "bookings": [{
                "id": Uuid::new_v4(),
                "check_in": "2024-03-05",
                "check_out": "2024-03-10",
                "total_price": { "primary": 76, "secondary": 50000 }
            }],
            "expenses": [
                { "id": Uuid::new_v4(), "date": "2024-03-01", "category": "rent",
                  "amount": { "secondary": "10000" } },
                { "id": Uuid::new_v4(), "date": "2024-03-20", "category": "bogus_category",
                  "amount": { "secondary": 100 } }
            ]
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["report_type"], "income_statement");
        assert_eq!(body["periods"].as_array().unwrap().len(), 12);
        assert_eq!(body["revenue"]["total"][2], "50000");
        assert_eq!(body["fixed_costs"]["total"][2], "10000");
        assert_eq!(body["operational_costs"]["total"][2], "100");
        assert_eq!(body["net_income"][2], "39900");
        assert_eq!(
            body["operational_costs"]["categories_to_include"][0]["line"],
            "other"
        );
        assert_eq!(body["comparison"]["year"], 2023);
        assert_eq!(body["ytd"]["end"], "2024-06-30");
        assert_eq!(body["ytd"]["net_income"], "39900");
    }

    #[tokio::test]
    async fn test_malformed_records_are_tolerated() {
        let (status, body) = post_report(json!({
            "year": 2024,
            "period_type": "year",
            "as_of": "2024-12-31",
            "bookings": [
                { "id": Uuid::new_v4(), "check_in": "2024-05-01", "check_out": "2024-05-04",
                  "total_price": { "secondary": 90000 } },
                { "property_id": "", "check_in": "whenever", "total_price": "abc" }
            ],
            "expenses": [
                { "id": Uuid::new_v4(), "date": "2024-05-01", "category": "rent",
                  "amount": { "secondary": 30000 } },
                { "date": "2024-05-02", "category": "wages", "amount": 500,
                  "vendor": 42, "property_id": "not-a-uuid" }
            ]
        }))
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["revenue"]["total"][0], "90000");
        assert_eq!(body["kpis"]["nights_booked"][0], 3);
        assert_eq!(body["fixed_costs"]["total"][0], "30000");
        assert_eq!(body["operational_costs"]["total"][0], "500");
        assert_eq!(body["net_income"][0], "59500");
    }

    #[tokio::test]
    async fn test_unknown_property_is_not_found() {
        let (status, body) = post_report(json!({
            "year": 2024,
            "property_id": Uuid::new_v4(),
            "properties": [{ "id": Uuid::new_v4(), "name": "Akwa", "units": 2 }]
        }))
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "unknown_property");
    }

    #[rstest]
    #[case(i32::MAX)]
    #[case(i32::MIN)]
    #[tokio::test]
    async fn test_unrepresentable_year_is_rejected(#[case] year: i32) {
        let (status, body) = post_report(json!({ "year": year })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "invalid_request");
    }

    #[test]
    fn test_request_defaults() {
        let request: IncomeStatementRequest = serde_json::from_value(json!({ "year": 2024 })).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let params = request.params(today);

        assert_eq!(params.period_type, PeriodType::Month);
        assert_eq!(params.comparison, ComparisonType::None);
        assert!(params.filter.is_empty());
        assert_eq!(params.selected_periods, None);
        assert_eq!(params.as_of, today);
    }
}
