//! Domain layer: models, pure aggregation logic and the services that
//! wire them to storage.

pub mod commands;
pub mod errors;
pub mod events;
pub mod expense_service;
pub mod export_service;
pub mod grouping;
pub mod mappers;
pub mod models;
pub mod report_service;

pub use errors::{DomainError, DomainResult};
pub use events::{ChangeNotifier, ExpenseEvent};
pub use expense_service::ExpenseService;
pub use export_service::ExportService;
pub use grouping::{GroupBy, GroupKey};
pub use models::{Expense, ExpenseCategory};
pub use report_service::{ReportService, WeeklyReport, DEFAULT_WINDOW_DAYS};
