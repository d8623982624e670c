//! Expense service domain logic: record, delete and list expenses.
//!
//! Validation lives here rather than in the storage layer - a record
//! that reaches a repository has already been checked, so aggregation
//! can assume every stored amount is positive.

use crate::domain::commands::expenses::{
    CreateExpenseCommand, DayExpensesQuery, DayExpensesResult, ExpenseListResult,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::events::{ChangeNotifier, ExpenseEvent};
use crate::domain::grouping::{day_bounds, group_expenses};
use crate::domain::models::Expense;
use crate::storage::traits::{Connection, ExpenseStorage};
use chrono::{FixedOffset, Local, Utc};
use log::info;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    notifier: ChangeNotifier,
    zone: FixedOffset,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: Arc<C>, zone: FixedOffset) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
            notifier: ChangeNotifier::new(),
            zone,
        }
    }

    /// Subscribe to store change notifications. Presentation layers
    /// re-run their queries when an event arrives.
    pub fn subscribe(&self) -> Receiver<ExpenseEvent> {
        self.notifier.subscribe()
    }

    /// Validate and store a new expense, then notify subscribers.
    pub fn create_expense(&self, command: CreateExpenseCommand) -> DomainResult<Expense> {
        let title = command.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::InvalidArgument(
                "title must not be empty".to_string(),
            ));
        }
        if !command.amount.is_finite() || command.amount <= 0.0 {
            return Err(DomainError::InvalidArgument(format!(
                "amount must be positive, got {}",
                command.amount
            )));
        }

        let date = command
            .date
            .unwrap_or_else(|| Utc::now().with_timezone(&self.zone));
        let notes = command
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let expense = Expense {
            id: Expense::generate_id(Utc::now().timestamp_millis() as u64),
            title,
            amount: command.amount,
            category: command.category,
            notes,
            date,
        };

        self.expense_repository.store_expense(&expense)?;
        info!(
            "💰 EXPENSE: Stored {} ({} {:.2} on {})",
            expense.id, expense.category, expense.amount, expense.date
        );

        self.notifier.notify(ExpenseEvent::Added {
            id: expense.id.clone(),
        });
        Ok(expense)
    }

    /// Delete an expense by id. Missing ids are reported to the
    /// caller, not swallowed.
    pub fn delete_expense(&self, expense_id: &str) -> DomainResult<()> {
        let deleted = self.expense_repository.delete_expense(expense_id)?;
        if !deleted {
            return Err(DomainError::NotFound {
                id: expense_id.to_string(),
            });
        }
        info!("🗑️ EXPENSE: Deleted {}", expense_id);
        self.notifier.notify(ExpenseEvent::Deleted {
            id: expense_id.to_string(),
        });
        Ok(())
    }

    /// All expenses, most recent first.
    pub fn list_expenses(&self) -> DomainResult<ExpenseListResult> {
        let expenses = self.expense_repository.list_expenses()?;
        Ok(ExpenseListResult { expenses })
    }

    /// One calendar day's expenses, grouped for display, with the
    /// day's running count and total.
    pub fn expenses_for_day(&self, query: DayExpensesQuery) -> DomainResult<DayExpensesResult> {
        let (start, end) = day_bounds(query.date, &self.zone);
        let mut expenses = self.expense_repository.list_expenses_in_range(start, end)?;
        // Display order within the day is newest first.
        expenses.sort_by(|a, b| b.date.cmp(&a.date));

        let total_count = expenses.len();
        let total_amount: f64 = expenses.iter().map(|e| e.amount).sum();
        let groups = group_expenses(&expenses, query.group_by, &self.zone);

        Ok(DayExpensesResult {
            date: query.date,
            groups,
            total_count,
            total_amount,
        })
    }

    /// Today's running total, in the configured zone.
    pub fn total_spent_today(&self) -> DomainResult<f64> {
        let today = Local::now().with_timezone(&self.zone).date_naive();
        let (start, end) = day_bounds(today, &self.zone);
        let expenses = self.expense_repository.list_expenses_in_range(start, end)?;
        Ok(expenses.iter().map(|e| e.amount).sum())
    }
}
