//! Mapping between domain models and the public DTOs in `shared`.

use crate::domain::commands::expenses::DayExpensesResult;
use crate::domain::grouping;
use crate::domain::models::{Expense, ExpenseCategory};
use crate::domain::report_service::WeeklyReport;

pub struct ExpenseMapper;

impl ExpenseMapper {
    pub fn category_to_dto(category: ExpenseCategory) -> shared::ExpenseCategory {
        match category {
            ExpenseCategory::Food => shared::ExpenseCategory::Food,
            ExpenseCategory::Travel => shared::ExpenseCategory::Travel,
            ExpenseCategory::Staff => shared::ExpenseCategory::Staff,
            ExpenseCategory::Utility => shared::ExpenseCategory::Utility,
        }
    }

    pub fn category_from_dto(category: shared::ExpenseCategory) -> ExpenseCategory {
        match category {
            shared::ExpenseCategory::Food => ExpenseCategory::Food,
            shared::ExpenseCategory::Travel => ExpenseCategory::Travel,
            shared::ExpenseCategory::Staff => ExpenseCategory::Staff,
            shared::ExpenseCategory::Utility => ExpenseCategory::Utility,
        }
    }

    pub fn to_dto(expense: Expense) -> shared::Expense {
        shared::Expense {
            id: expense.id,
            title: expense.title,
            amount: expense.amount,
            category: Self::category_to_dto(expense.category),
            notes: expense.notes,
            date: expense.date.to_rfc3339(),
        }
    }

    pub fn group_to_dto(group: grouping::ExpenseGroup) -> shared::ExpenseGroup {
        shared::ExpenseGroup {
            label: group.key.label(),
            expenses: group.expenses.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn day_view_to_dto(result: DayExpensesResult) -> shared::DayExpensesResponse {
        shared::DayExpensesResponse {
            date: result.date.format("%Y-%m-%d").to_string(),
            groups: result.groups.into_iter().map(Self::group_to_dto).collect(),
            total_count: result.total_count,
            total_amount: result.total_amount,
        }
    }

    pub fn weekly_report_to_dto(report: WeeklyReport) -> shared::WeeklyReportResponse {
        shared::WeeklyReportResponse {
            days: report
                .matrix
                .iter()
                .map(|day| shared::DailyBreakdown {
                    date: day.date.format("%Y-%m-%d").to_string(),
                    amounts: day
                        .amounts
                        .iter()
                        .map(|(category, amount)| shared::CategoryAmount {
                            category: Self::category_to_dto(*category),
                            amount: *amount,
                        })
                        .collect(),
                })
                .collect(),
            category_totals: report
                .category_totals
                .iter()
                .map(|(category, amount)| shared::CategoryAmount {
                    category: Self::category_to_dto(*category),
                    amount: *amount,
                })
                .collect(),
            daily_totals: report
                .daily_totals
                .iter()
                .map(|(date, total)| shared::DailyTotal {
                    date: date.format("%Y-%m-%d").to_string(),
                    total: *total,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn category_mapping_round_trips() {
        for category in ExpenseCategory::ALL {
            let dto = ExpenseMapper::category_to_dto(category);
            assert_eq!(ExpenseMapper::category_from_dto(dto), category);
        }
    }

    #[test]
    fn expense_dto_carries_rfc3339_date() {
        let expense = Expense {
            id: "ex-1-abcd".to_string(),
            title: "Lunch".to_string(),
            amount: 12.5,
            category: ExpenseCategory::Food,
            notes: Some("team".to_string()),
            date: DateTime::parse_from_rfc3339("2024-01-15T10:30:00+00:00").unwrap(),
        };
        let dto = ExpenseMapper::to_dto(expense);
        assert_eq!(dto.date, "2024-01-15T10:30:00+00:00");
        assert_eq!(dto.category, shared::ExpenseCategory::Food);
    }
}
