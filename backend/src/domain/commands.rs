//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are
//! **not** exposed over the public API. Callers map the public DTOs
//! defined in the `shared` crate to these internal types.

pub mod expenses {
    use crate::domain::grouping::{ExpenseGroup, GroupBy};
    use crate::domain::models::{Expense, ExpenseCategory};
    use chrono::{DateTime, FixedOffset, NaiveDate};

    /// Input for recording a new expense.
    #[derive(Debug, Clone)]
    pub struct CreateExpenseCommand {
        pub title: String,
        pub amount: f64,
        pub category: ExpenseCategory,
        pub notes: Option<String>,
        /// Optional timestamp override - uses current time if not provided.
        pub date: Option<DateTime<FixedOffset>>,
    }

    /// Query for one calendar day's grouped expense view.
    #[derive(Debug, Clone)]
    pub struct DayExpensesQuery {
        pub date: NaiveDate,
        pub group_by: GroupBy,
    }

    /// Result of a day view query.
    #[derive(Debug, Clone)]
    pub struct DayExpensesResult {
        pub date: NaiveDate,
        pub groups: Vec<ExpenseGroup>,
        pub total_count: usize,
        pub total_amount: f64,
    }

    /// Result of listing all expenses.
    #[derive(Debug, Clone)]
    pub struct ExpenseListResult {
        /// Ordered by date descending (most recent first).
        pub expenses: Vec<Expense>,
    }
}
