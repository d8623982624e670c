//! # Expense Tracker Backend
//!
//! Synchronous core of a personal expense tracker: record and delete
//! expenses, browse them grouped by day or category, and aggregate a
//! rolling multi-day report that can be exported as CSV. Presentation
//! concerns (forms, charts, share sheets) live entirely outside this
//! crate and talk to it through the [`Backend`] facade and the DTOs in
//! the `shared` crate.

use anyhow::Result;
use chrono::NaiveDate;
use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod storage;

pub use config::AppConfig;
pub use storage::csv::CsvConnection;

use domain::commands::expenses::{CreateExpenseCommand, DayExpensesQuery};
use domain::errors::{DomainError, DomainResult};
use domain::mappers::ExpenseMapper;
use domain::{ExpenseService, ExportService, GroupBy, ReportService, DEFAULT_WINDOW_DAYS};

/// Main backend struct that wires all services to one storage
/// connection. Construct it explicitly and pass it to the presentation
/// layer; nothing here is a singleton.
pub struct Backend {
    pub expense_service: ExpenseService<CsvConnection>,
    pub report_service: ReportService<CsvConnection>,
    pub export_service: ExportService,
}

impl Backend {
    /// Create a backend with default configuration.
    pub fn new() -> Result<Self> {
        Self::with_config(AppConfig::default())
    }

    /// Create a backend from an explicit configuration.
    pub fn with_config(config: AppConfig) -> Result<Self> {
        let zone = config.zone()?;
        let connection = Arc::new(match &config.data_dir {
            Some(dir) => CsvConnection::new(dir)?,
            None => CsvConnection::new_default()?,
        });

        Ok(Backend {
            expense_service: ExpenseService::new(connection.clone(), zone),
            report_service: ReportService::new(connection, zone),
            export_service: ExportService::new(),
        })
    }

    /// Record a new expense.
    pub fn create_expense(
        &self,
        request: shared::CreateExpenseRequest,
    ) -> DomainResult<shared::CreateExpenseResponse> {
        let date = match request.date.as_deref() {
            Some(raw) => Some(chrono::DateTime::parse_from_rfc3339(raw).map_err(|e| {
                DomainError::InvalidArgument(format!("invalid date '{}': {}", raw, e))
            })?),
            None => None,
        };

        let expense = self.expense_service.create_expense(CreateExpenseCommand {
            title: request.title,
            amount: request.amount,
            category: ExpenseMapper::category_from_dto(request.category),
            notes: request.notes,
            date,
        })?;

        let expense = ExpenseMapper::to_dto(expense);
        Ok(shared::CreateExpenseResponse {
            success_message: format!("Recorded {} expense of {:.2}", expense.category, expense.amount),
            expense,
        })
    }

    /// Delete an expense by id.
    pub fn delete_expense(
        &self,
        request: shared::DeleteExpenseRequest,
    ) -> DomainResult<shared::DeleteExpenseResponse> {
        self.expense_service.delete_expense(&request.expense_id)?;
        Ok(shared::DeleteExpenseResponse {
            success_message: format!("Deleted expense {}", request.expense_id),
        })
    }

    /// All expenses, most recent first.
    pub fn list_expenses(&self) -> DomainResult<shared::ExpenseListResponse> {
        let result = self.expense_service.list_expenses()?;
        Ok(shared::ExpenseListResponse {
            expenses: result.expenses.into_iter().map(ExpenseMapper::to_dto).collect(),
        })
    }

    /// One day's expenses, grouped for display.
    pub fn day_expenses(
        &self,
        request: shared::DayExpensesRequest,
    ) -> DomainResult<shared::DayExpensesResponse> {
        let date = parse_day(&request.date)?;
        let group_by = match request.group_by {
            shared::GroupByMode::Category => GroupBy::Category,
            shared::GroupByMode::Day => GroupBy::Day,
        };
        let result = self
            .expense_service
            .expenses_for_day(DayExpensesQuery { date, group_by })?;
        Ok(ExpenseMapper::day_view_to_dto(result))
    }

    /// Running total for one calendar day.
    pub fn daily_total(&self, date: &str) -> DomainResult<f64> {
        self.report_service.get_daily_total(parse_day(date)?)
    }

    /// Rolling report for the window ending today.
    pub fn weekly_report(
        &self,
        request: shared::WeeklyReportRequest,
    ) -> DomainResult<shared::WeeklyReportResponse> {
        let window_days = request.window_days.unwrap_or(DEFAULT_WINDOW_DAYS);
        let report = self.report_service.weekly_report(window_days)?;
        Ok(ExpenseMapper::weekly_report_to_dto(report))
    }

    /// Render the weekly report as a CSV payload.
    pub fn export_report(
        &self,
        window_days: Option<u32>,
    ) -> DomainResult<shared::ExportDataResponse> {
        self.export_service.export_weekly_report(
            &self.report_service,
            window_days.unwrap_or(DEFAULT_WINDOW_DAYS),
        )
    }

    /// Render the weekly report and write it to a directory.
    pub fn export_report_to_path(
        &self,
        request: shared::ExportToPathRequest,
    ) -> DomainResult<shared::ExportToPathResponse> {
        self.export_service
            .export_to_path(request, &self.report_service)
    }
}

fn parse_day(raw: &str) -> DomainResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| DomainError::InvalidArgument(format!("invalid date '{}': {}", raw, e)))
}
