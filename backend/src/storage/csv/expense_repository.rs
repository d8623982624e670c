//! CSV-based expense repository.

use crate::domain::models::{Expense, ExpenseCategory};
use crate::storage::csv::connection::CsvConnection;
use crate::storage::traits::ExpenseStorage;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, FixedOffset};
use csv::{Reader, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

/// Whole-file read/rewrite repository over the expenses CSV file.
/// Writes always rewrite the complete file, so a partially appended
/// row can never survive a crash mid-write.
#[derive(Clone)]
pub struct ExpenseRepository {
    connection: CsvConnection,
}

impl ExpenseRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every expense from the CSV file.
    fn read_expenses(&self) -> Result<Vec<Expense>> {
        self.connection.ensure_expenses_file_exists()?;
        let file_path = self.connection.expenses_file_path();

        let file = File::open(&file_path)
            .with_context(|| format!("opening {}", file_path.display()))?;
        let reader = BufReader::new(file);
        let mut csv_reader = Reader::from_reader(reader);

        let mut expenses = Vec::new();
        for (line, result) in csv_reader.records().enumerate() {
            let record = result?;
            expenses.push(
                self.parse_record(&record)
                    .with_context(|| format!("malformed expense record at line {}", line + 2))?,
            );
        }
        Ok(expenses)
    }

    fn parse_record(&self, record: &csv::StringRecord) -> Result<Expense> {
        let id = record
            .get(0)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("missing id"))?
            .to_string();
        let date = self.parse_date_string(record.get(1).unwrap_or(""))?;
        let title = record
            .get(2)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("missing title"))?
            .to_string();
        let category_name = record.get(3).unwrap_or("");
        let category = ExpenseCategory::parse(category_name)
            .ok_or_else(|| anyhow!("unknown category '{}'", category_name))?;
        let amount = record
            .get(4)
            .unwrap_or("")
            .parse::<f64>()
            .map_err(|_| anyhow!("invalid amount '{}'", record.get(4).unwrap_or("")))?;
        let notes = record
            .get(5)
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        Ok(Expense {
            id,
            title,
            amount,
            category,
            notes,
            date,
        })
    }

    /// Parse a stored date string into a DateTime object. Dates are
    /// written as RFC 3339, so anything else is file corruption.
    fn parse_date_string(&self, date_str: &str) -> Result<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(date_str)
            .map_err(|e| anyhow!("invalid date '{}': {}", date_str, e))
    }

    /// Write the complete expense list back to the CSV file.
    fn write_expenses(&self, expenses: &[Expense]) -> Result<()> {
        let file_path = self.connection.expenses_file_path();

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&file_path)
            .with_context(|| format!("opening {} for write", file_path.display()))?;
        let writer = BufWriter::new(file);
        let mut csv_writer = Writer::from_writer(writer);

        csv_writer.write_record(["id", "date", "title", "category", "amount", "notes"])?;
        for expense in expenses {
            let date = expense.date.to_rfc3339();
            let amount = expense.amount.to_string();
            csv_writer.write_record([
                expense.id.as_str(),
                date.as_str(),
                expense.title.as_str(),
                expense.category.name(),
                amount.as_str(),
                expense.notes.as_deref().unwrap_or(""),
            ])?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

impl ExpenseStorage for ExpenseRepository {
    fn store_expense(&self, expense: &Expense) -> Result<()> {
        let mut expenses = self.read_expenses()?;
        if expenses.iter().any(|e| e.id == expense.id) {
            return Err(anyhow!("duplicate expense id: {}", expense.id));
        }
        expenses.push(expense.clone());
        self.write_expenses(&expenses)
    }

    fn get_expense(&self, expense_id: &str) -> Result<Option<Expense>> {
        let expenses = self.read_expenses()?;
        Ok(expenses.into_iter().find(|e| e.id == expense_id))
    }

    fn list_expenses(&self) -> Result<Vec<Expense>> {
        let mut expenses = self.read_expenses()?;
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(expenses)
    }

    fn list_expenses_in_range(
        &self,
        start: DateTime<FixedOffset>,
        end: DateTime<FixedOffset>,
    ) -> Result<Vec<Expense>> {
        let mut expenses: Vec<Expense> = self
            .read_expenses()?
            .into_iter()
            .filter(|e| e.date >= start && e.date < end)
            .collect();
        expenses.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(expenses)
    }

    fn delete_expense(&self, expense_id: &str) -> Result<bool> {
        let mut expenses = self.read_expenses()?;
        let before = expenses.len();
        expenses.retain(|e| e.id != expense_id);
        if expenses.len() == before {
            return Ok(false);
        }
        self.write_expenses(&expenses)?;
        Ok(true)
    }
}
