//! Aggregation engine for daily totals, category totals and the
//! rolling report window.
//!
//! The aggregation itself is a set of pure functions over a snapshot of
//! expense records; [`ReportService`] wires them to a storage
//! connection. Sums accumulate unrounded — rounding to two decimals
//! happens only when the export formatter renders a payload.

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::grouping::{day_bounds, local_day};
use crate::domain::models::{Expense, ExpenseCategory};
use crate::storage::traits::{Connection, ExpenseStorage};
use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate};
use log::info;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Default report window length, inclusive of today.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// One day of the report window with zero-filled per-category amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBreakdown {
    pub date: NaiveDate,
    /// Contains every category, zero-filled. `BTreeMap` iterates in
    /// category declaration order.
    pub amounts: BTreeMap<ExpenseCategory, f64>,
}

/// Result of a rolling report query.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReport {
    /// One entry per window day, oldest first.
    pub matrix: Vec<DayBreakdown>,
    /// Window-wide totals, zero-filled for every category.
    pub category_totals: BTreeMap<ExpenseCategory, f64>,
    /// Per-day totals, oldest first, aligned with `matrix`.
    pub daily_totals: Vec<(NaiveDate, f64)>,
}

/// A category map with every category present and zeroed.
fn zero_filled() -> BTreeMap<ExpenseCategory, f64> {
    ExpenseCategory::ALL.iter().map(|c| (*c, 0.0)).collect()
}

/// Sum of amounts over the expenses falling on `date` in `zone`.
/// Zero when nothing matches.
pub fn daily_total(expenses: &[Expense], date: NaiveDate, zone: &FixedOffset) -> f64 {
    let (start, end) = day_bounds(date, zone);
    expenses
        .iter()
        .filter(|e| e.date >= start && e.date < end)
        .map(|e| e.amount)
        .sum()
}

/// Per-category sums over `[window_start, window_end)`, zero-filled so
/// the result always contains all four categories.
pub fn category_totals(
    expenses: &[Expense],
    window_start: DateTime<FixedOffset>,
    window_end: DateTime<FixedOffset>,
) -> BTreeMap<ExpenseCategory, f64> {
    let mut totals = zero_filled();
    for expense in expenses {
        if expense.date >= window_start && expense.date < window_end {
            *totals.entry(expense.category).or_insert(0.0) += expense.amount;
        }
    }
    totals
}

/// One zero-filled category map per window day, oldest first: the entry
/// at index 0 is `window_days - 1` days before `today`, the last entry
/// is `today`. Presentation layers wanting newest-first reverse this
/// themselves.
pub fn daily_category_matrix(
    expenses: &[Expense],
    today: NaiveDate,
    window_days: u32,
    zone: &FixedOffset,
) -> DomainResult<Vec<DayBreakdown>> {
    if window_days == 0 {
        return Err(DomainError::InvalidArgument(
            "window_days must be at least 1".to_string(),
        ));
    }

    let mut matrix: Vec<DayBreakdown> = (0..window_days)
        .map(|i| DayBreakdown {
            date: today - Duration::days((window_days - 1 - i) as i64),
            amounts: zero_filled(),
        })
        .collect();

    let first_day = matrix[0].date;
    for expense in expenses {
        let day = local_day(&expense.date, zone);
        if day < first_day || day > today {
            continue;
        }
        let index = (day - first_day).num_days() as usize;
        *matrix[index].amounts.entry(expense.category).or_insert(0.0) += expense.amount;
    }

    Ok(matrix)
}

/// Report service that runs the aggregation over a storage connection.
#[derive(Clone)]
pub struct ReportService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    zone: FixedOffset,
}

impl<C: Connection> ReportService<C> {
    pub fn new(connection: Arc<C>, zone: FixedOffset) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
            zone,
        }
    }

    /// The zone all day bucketing happens in.
    pub fn zone(&self) -> FixedOffset {
        self.zone
    }

    /// Running total for one calendar day.
    pub fn get_daily_total(&self, date: NaiveDate) -> DomainResult<f64> {
        let (start, end) = day_bounds(date, &self.zone);
        let expenses = self.expense_repository.list_expenses_in_range(start, end)?;
        Ok(expenses.iter().map(|e| e.amount).sum())
    }

    /// Rolling report for the window ending today.
    pub fn weekly_report(&self, window_days: u32) -> DomainResult<WeeklyReport> {
        let today = Local::now().with_timezone(&self.zone).date_naive();
        self.weekly_report_as_of(today, window_days)
    }

    /// Rolling report for the window ending on an explicit reference
    /// day. The window covers `[today - (window_days - 1), today]`.
    pub fn weekly_report_as_of(
        &self,
        today: NaiveDate,
        window_days: u32,
    ) -> DomainResult<WeeklyReport> {
        if window_days == 0 {
            return Err(DomainError::InvalidArgument(
                "window_days must be at least 1".to_string(),
            ));
        }

        let first_day = today - Duration::days((window_days - 1) as i64);
        let (window_start, _) = day_bounds(first_day, &self.zone);
        let (_, window_end) = day_bounds(today, &self.zone);

        let expenses = self
            .expense_repository
            .list_expenses_in_range(window_start, window_end)?;
        info!(
            "📊 REPORT: {} expense(s) in window {} -> {}",
            expenses.len(),
            first_day,
            today
        );

        let matrix = daily_category_matrix(&expenses, today, window_days, &self.zone)?;
        let totals = category_totals(&expenses, window_start, window_end);
        let daily_totals = matrix
            .iter()
            .map(|day| (day.date, day.amounts.values().sum::<f64>()))
            .collect();

        Ok(WeeklyReport {
            matrix,
            category_totals: totals,
            daily_totals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn expense(id: &str, amount: f64, category: ExpenseCategory, rfc3339: &str) -> Expense {
        Expense {
            id: id.to_string(),
            title: format!("expense {}", id),
            amount,
            category,
            notes: None,
            date: DateTime::parse_from_rfc3339(rfc3339).unwrap(),
        }
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn daily_total_sums_only_the_requested_day() {
        let zone = utc();
        let expenses = vec![
            expense("a", 150.0, ExpenseCategory::Food, "2024-01-15T10:00:00+00:00"),
            expense("b", 50.5, ExpenseCategory::Travel, "2024-01-15T18:00:00+00:00"),
            expense("c", 30.0, ExpenseCategory::Food, "2024-01-16T09:00:00+00:00"),
        ];
        assert_eq!(daily_total(&expenses, day(2024, 1, 15), &zone), 200.5);
        assert_eq!(daily_total(&expenses, day(2024, 1, 16), &zone), 30.0);
        assert_eq!(daily_total(&expenses, day(2024, 1, 17), &zone), 0.0);
    }

    #[test]
    fn category_totals_are_zero_filled() {
        let zone = utc();
        let (start, _) = day_bounds(day(2024, 1, 10), &zone);
        let (_, end) = day_bounds(day(2024, 1, 16), &zone);
        let totals = category_totals(&[], start, end);

        let keys: Vec<ExpenseCategory> = totals.keys().copied().collect();
        assert_eq!(keys, ExpenseCategory::ALL.to_vec());
        assert!(totals.values().all(|v| *v == 0.0));
    }

    #[test]
    fn category_totals_respect_the_half_open_window() {
        let zone = utc();
        let expenses = vec![
            expense("a", 100.0, ExpenseCategory::Food, "2024-01-10T00:00:00+00:00"),
            expense("b", 50.0, ExpenseCategory::Food, "2024-01-16T23:59:59+00:00"),
            expense("c", 25.0, ExpenseCategory::Food, "2024-01-17T00:00:00+00:00"),
            expense("d", 10.0, ExpenseCategory::Food, "2024-01-09T23:59:59+00:00"),
        ];
        let (start, _) = day_bounds(day(2024, 1, 10), &zone);
        let (_, end) = day_bounds(day(2024, 1, 16), &zone);
        let totals = category_totals(&expenses, start, end);
        assert_eq!(totals[&ExpenseCategory::Food], 150.0);
    }

    #[test]
    fn matrix_is_oldest_first_and_zero_filled() {
        let zone = utc();
        let matrix = daily_category_matrix(&[], day(2024, 1, 16), 7, &zone).unwrap();
        assert_eq!(matrix.len(), 7);
        assert_eq!(matrix[0].date, day(2024, 1, 10));
        assert_eq!(matrix[6].date, day(2024, 1, 16));
        for entry in &matrix {
            let keys: Vec<ExpenseCategory> = entry.amounts.keys().copied().collect();
            assert_eq!(keys, ExpenseCategory::ALL.to_vec());
            assert!(entry.amounts.values().all(|v| *v == 0.0));
        }
    }

    #[test]
    fn matrix_buckets_expenses_on_their_local_day() {
        let zone = utc();
        let expenses = vec![
            expense("a", 100.0, ExpenseCategory::Food, "2024-01-15T08:00:00+00:00"),
            expense("b", 50.0, ExpenseCategory::Food, "2024-01-16T20:00:00+00:00"),
            expense("c", 75.0, ExpenseCategory::Travel, "2024-01-16T06:00:00+00:00"),
            // Outside the window, must be ignored.
            expense("d", 999.0, ExpenseCategory::Food, "2024-01-01T12:00:00+00:00"),
        ];
        let matrix = daily_category_matrix(&expenses, day(2024, 1, 16), 7, &zone).unwrap();
        assert_eq!(matrix[5].amounts[&ExpenseCategory::Food], 100.0);
        assert_eq!(matrix[6].amounts[&ExpenseCategory::Food], 50.0);
        assert_eq!(matrix[6].amounts[&ExpenseCategory::Travel], 75.0);
        assert_eq!(matrix[0].amounts[&ExpenseCategory::Food], 0.0);
    }

    #[test]
    fn zero_window_is_rejected() {
        let zone = utc();
        let result = daily_category_matrix(&[], day(2024, 1, 16), 0, &zone);
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn aggregation_is_idempotent_over_a_snapshot() {
        let zone = utc();
        let expenses = vec![
            expense("a", 12.25, ExpenseCategory::Staff, "2024-01-15T08:00:00+00:00"),
            expense("b", 3.5, ExpenseCategory::Utility, "2024-01-14T09:00:00+00:00"),
        ];
        let first = daily_category_matrix(&expenses, day(2024, 1, 16), 7, &zone).unwrap();
        let second = daily_category_matrix(&expenses, day(2024, 1, 16), 7, &zone).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn daily_totals_add_up_to_category_totals() {
        let zone = utc();
        let expenses = vec![
            expense("a", 100.0, ExpenseCategory::Food, "2024-01-15T08:00:00+00:00"),
            expense("b", 50.0, ExpenseCategory::Travel, "2024-01-16T20:00:00+00:00"),
            expense("c", 25.5, ExpenseCategory::Utility, "2024-01-12T06:00:00+00:00"),
        ];
        let today = day(2024, 1, 16);
        let matrix = daily_category_matrix(&expenses, today, 7, &zone).unwrap();
        let (start, _) = day_bounds(day(2024, 1, 10), &zone);
        let (_, end) = day_bounds(today, &zone);
        let totals = category_totals(&expenses, start, end);

        let sum_of_days: f64 = matrix
            .iter()
            .map(|d| d.amounts.values().sum::<f64>())
            .sum();
        let sum_of_categories: f64 = totals.values().sum();
        assert_eq!(sum_of_days, sum_of_categories);

        let per_day: Vec<f64> = matrix
            .iter()
            .map(|d| {
                daily_total(&expenses, d.date, &zone)
            })
            .collect();
        let matrix_per_day: Vec<f64> = matrix
            .iter()
            .map(|d| d.amounts.values().sum::<f64>())
            .collect();
        assert_eq!(per_day, matrix_per_day);
    }

    #[test]
    fn service_reports_over_a_csv_store() {
        use crate::storage::csv::test_utils::TestEnvironment;
        use crate::storage::traits::ExpenseStorage;

        let env = TestEnvironment::new().unwrap();
        let repo = env.connection.create_expense_repository();
        repo.store_expense(&expense("a", 100.0, ExpenseCategory::Food, "2024-01-15T08:00:00+00:00")).unwrap();
        repo.store_expense(&expense("b", 50.0, ExpenseCategory::Food, "2024-01-16T12:00:00+00:00")).unwrap();
        // Before the window, must not leak into the report.
        repo.store_expense(&expense("c", 999.0, ExpenseCategory::Travel, "2024-01-01T12:00:00+00:00")).unwrap();

        let service = ReportService::new(Arc::new(env.connection.clone()), utc());
        let report = service.weekly_report_as_of(day(2024, 1, 16), 7).unwrap();

        assert_eq!(report.matrix.len(), 7);
        assert_eq!(report.category_totals[&ExpenseCategory::Food], 150.0);
        assert_eq!(report.category_totals[&ExpenseCategory::Travel], 0.0);
        assert_eq!(report.daily_totals[5], (day(2024, 1, 15), 100.0));
        assert_eq!(report.daily_totals[6], (day(2024, 1, 16), 50.0));

        assert_eq!(service.get_daily_total(day(2024, 1, 15)).unwrap(), 100.0);
        assert_eq!(service.get_daily_total(day(2024, 1, 2)).unwrap(), 0.0);
    }

    #[test]
    fn service_rejects_a_zero_window() {
        use crate::storage::csv::test_utils::TestEnvironment;

        let env = TestEnvironment::new().unwrap();
        let service = ReportService::new(Arc::new(env.connection.clone()), utc());
        let result = service.weekly_report_as_of(day(2024, 1, 16), 0);
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }
}
