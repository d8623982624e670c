use serde::{Deserialize, Serialize};
use std::fmt;

/// Expense category. The set is closed and the declaration order is the
/// canonical order used everywhere a stable ordering matters (chart
/// legends, CSV columns, category total listings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Travel,
    Staff,
    Utility,
}

impl ExpenseCategory {
    /// All categories in declaration order.
    pub const ALL: [ExpenseCategory; 4] = [
        ExpenseCategory::Food,
        ExpenseCategory::Travel,
        ExpenseCategory::Staff,
        ExpenseCategory::Utility,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::Staff => "Staff",
            ExpenseCategory::Utility => "Utility",
        }
    }

    /// Parse a category from its display name.
    pub fn parse(name: &str) -> Option<ExpenseCategory> {
        ExpenseCategory::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expense ID in format: "ex-<epoch_millis>-<hex suffix>"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// Short display title (non-empty)
    pub title: String,
    /// Expense amount (always positive)
    pub amount: f64,
    pub category: ExpenseCategory,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// Human-readable timestamp with timezone (RFC 3339)
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseRequest {
    pub title: String,
    /// Expense amount (must be positive)
    pub amount: f64,
    pub category: ExpenseCategory,
    pub notes: Option<String>,
    /// Optional date override (RFC 3339) - uses current time if not provided
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateExpenseResponse {
    pub expense: Expense,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseRequest {
    pub expense_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteExpenseResponse {
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListResponse {
    /// Expenses ordered by date descending (most recent first)
    pub expenses: Vec<Expense>,
}

/// How the day view groups its expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupByMode {
    Category,
    Day,
}

/// Request for a single day's expenses, grouped for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayExpensesRequest {
    /// Calendar date (YYYY-MM-DD) in the configured zone
    pub date: String,
    pub group_by: GroupByMode,
}

/// One display group in a day view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseGroup {
    /// Group label ("Food", "2024-01-15", ...)
    pub label: String,
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayExpensesResponse {
    pub date: String,
    pub groups: Vec<ExpenseGroup>,
    pub total_count: usize,
    pub total_amount: f64,
}

/// Per-category amount with a stable category order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAmount {
    pub category: ExpenseCategory,
    pub amount: f64,
}

/// One day of the report window with zero-filled per-category amounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyBreakdown {
    /// Calendar date (YYYY-MM-DD)
    pub date: String,
    /// Amounts for every category in declaration order
    pub amounts: Vec<CategoryAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: String,
    pub total: f64,
}

/// Request for the rolling report (window ends today, inclusive)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReportRequest {
    /// Window length in days; defaults to 7 when not provided
    pub window_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyReportResponse {
    /// One entry per window day, oldest first
    pub days: Vec<DailyBreakdown>,
    /// Window-wide totals for every category in declaration order
    pub category_totals: Vec<CategoryAmount>,
    /// Per-day totals, oldest first
    pub daily_totals: Vec<DailyTotal>,
}

/// Response carrying a rendered CSV report payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDataResponse {
    pub csv_content: String,
    pub filename: String,
    /// Number of day rows in the payload
    pub day_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    /// Optional target directory; defaults to the user's Documents folder
    pub custom_path: Option<String>,
    pub window_days: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    pub success: bool,
    pub message: String,
    pub file_path: String,
    pub day_count: usize,
}
