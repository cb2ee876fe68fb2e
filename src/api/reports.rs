//! Per-employee spending report endpoints.
//!
//! The backend exposes one path per report variant: all payments or
//! payroll-deduction only, over a month/year or an explicit date range.

use chrono::NaiveDate;

use super::{ApiClient, Page};
use crate::error::ApiError;
use crate::models::EmployeeSpending;

const BASE: &str = "/api/funcionarios/gastos-funcionarios";

/// Which sales are counted into the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportScope {
    /// Every payment method.
    #[default]
    All,
    /// Only payroll-deduction ("Desconto em folha") sales.
    PayrollOnly,
}

impl ReportScope {
    fn path_segment(&self) -> &'static str {
        match self {
            ReportScope::All => "",
            ReportScope::PayrollOnly => "/folha",
        }
    }
}

/// Spending per employee for one calendar month.
pub async fn monthly(
    client: &ApiClient,
    scope: ReportScope,
    month: u32,
    year: i32,
    page: u32,
    size: u32,
) -> Result<Page<EmployeeSpending>, ApiError> {
    let path = format!("{}{}", BASE, scope.path_segment());
    client
        .get_json(
            &path,
            &[
                ("mes", month.to_string()),
                ("ano", year.to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ],
        )
        .await
}

/// Spending per employee over an explicit date range (inclusive).
pub async fn period(
    client: &ApiClient,
    scope: ReportScope,
    start: NaiveDate,
    end: NaiveDate,
    page: u32,
    size: u32,
) -> Result<Page<EmployeeSpending>, ApiError> {
    if end < start {
        return Err(ApiError::Validation(
            "report period end precedes its start".into(),
        ));
    }
    let path = format!("{}{}/periodo", BASE, scope.path_segment());
    client
        .get_json(
            &path,
            &[
                ("dataInicio", start.to_string()),
                ("dataFim", end.to_string()),
                ("page", page.to_string()),
                ("size", size.to_string()),
            ],
        )
        .await
}
