//! Domain models for the expense tracker core.

pub mod expense;

pub use expense::{Expense, ExpenseCategory};
