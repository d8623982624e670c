//! Domain model for an expense record.
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Closed category enumeration. Declaration order is the canonical
/// order for legends, category total listings and CSV columns.
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

    /// Parse a category from its stored display name.
    pub fn parse(name: &str) -> Option<ExpenseCategory> {
        ExpenseCategory::ALL.iter().copied().find(|c| c.name() == name)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An immutable expense record. Records are only ever inserted and
/// deleted; there is no update operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub title: String,
    /// Always positive; validated at creation time by the expense service.
    pub amount: f64,
    pub category: ExpenseCategory,
    pub notes: Option<String>,
    /// Point in time with epoch-millisecond precision.
    pub date: DateTime<FixedOffset>,
}

impl Expense {
    /// Generate a unique expense ID from the creation timestamp.
    /// Format: ex-<timestamp_ms>-<random_suffix>
    /// Example: ex-1625846400123-af3c
    pub fn generate_id(timestamp_ms: u64) -> String {
        let random_suffix = Self::generate_random_suffix(4);
        format!("ex-{}-{}", timestamp_ms, random_suffix)
    }

    /// Parse an expense ID back into its creation timestamp.
    pub fn parse_id(id: &str) -> Result<u64, String> {
        let parts: Vec<&str> = id.split('-').collect();
        if parts.len() != 3 || parts[0] != "ex" {
            return Err(format!("Invalid expense ID format: {}", id));
        }
        parts[1]
            .parse::<u64>()
            .map_err(|_| format!("Invalid timestamp in ID: {}", parts[1]))
    }

    /// Generate a random hex suffix for expense IDs.
    fn generate_random_suffix(len: usize) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("Time went backwards")
            .as_nanos();
        format!("{:x}", now % (16_u128.pow(len as u32)))
            .chars()
            .take(len)
            .collect()
    }
}
