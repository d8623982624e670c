//! # Storage Traits
//!
//! Storage abstraction for the domain layer: services are written
//! against these traits and never against a concrete backend, so the
//! CSV implementation can be swapped for anything else that can append,
//! delete and range-query expense records.

use crate::domain::models::Expense;
use anyhow::Result;
use chrono::{DateTime, FixedOffset};

/// Trait defining the interface for expense storage operations.
///
/// All operations are synchronous; the core never blocks on anything
/// but the underlying file/database call itself.
pub trait ExpenseStorage: Send + Sync {
    /// Store a new expense. Fails on a duplicate id (should not occur
    /// given the id assignment policy).
    fn store_expense(&self, expense: &Expense) -> Result<()>;

    /// Retrieve a specific expense by id.
    fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>>;

    /// List all expenses ordered by date descending (most recent first).
    fn list_expenses(&self) -> Result<Vec<Expense>>;

    /// List expenses with `start <= date < end`, in chronological
    /// order (oldest first).
    fn list_expenses_in_range(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Vec<Expense>>;

    /// Delete a single expense.
    /// Returns true if the expense was found and deleted, false otherwise.
    fn delete_expense(&self, expense_id: &str) -> Result<bool>;
}

/// Trait defining the interface for storage connections.
///
/// A connection is a factory for repositories; the domain layer
/// receives one explicitly at construction time instead of reaching
/// for a global.
pub trait Connection: Send + Sync + Clone {
    /// The type of ExpenseStorage this connection creates. Repositories
    /// are cheap handles, so services can clone them freely.
    type ExpenseRepository: ExpenseStorage + Clone;

    /// Create a new expense repository for this connection.
    fn create_expense_repository(&self) -> Self::ExpenseRepository;
}
