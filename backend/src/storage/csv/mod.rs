//! # CSV Storage Module
//!
//! File-based storage implementation for the expense tracker. Keeping
//! the whole store in one CSV file is plenty for a single-user app and
//! makes the data trivially inspectable.
//!
//! ## File Format
//!
//! ```csv
//! id,date,title,category,amount,notes
//! ex-1705312200000-af3c,2024-01-15T10:30:00+00:00,Lunch,Food,12.50,team lunch
//! ex-1705315800000-b21e,2024-01-15T11:30:00+00:00,Bus ticket,Travel,3.20,
//! ```

pub mod connection;
pub mod expense_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use expense_repository::ExpenseRepository;
