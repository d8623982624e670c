//! Storage layer: abstraction traits plus the CSV file backend.

pub mod csv;
pub mod traits;

pub use csv::CsvConnection;
pub use traits::{Connection, ExpenseStorage};
