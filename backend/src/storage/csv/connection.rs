//! CSV storage connection: base directory handling and file layout.

use crate::storage::csv::expense_repository::ExpenseRepository;
use crate::storage::traits::Connection;
use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

const EXPENSES_FILE: &str = "expenses.csv";
const CSV_HEADER: &str = "id,date,title,category,amount,notes\n";

/// CsvConnection manages the data directory and ensures the expenses
/// file exists before a repository touches it.
#[derive(Clone)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with an explicit base directory.
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }
        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the default data directory
    /// (`~/Documents/Expense Tracker`, falling back to the home
    /// directory when no Documents folder exists).
    pub fn new_default() -> Result<Self> {
        let base = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        let data_dir = base.join("Expense Tracker");
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the expenses CSV file.
    pub fn expenses_file_path(&self) -> PathBuf {
        self.base_directory.join(EXPENSES_FILE)
    }

    /// Create the expenses file with its header if it does not exist yet.
    pub fn ensure_expenses_file_exists(&self) -> Result<()> {
        let path = self.expenses_file_path();
        if !path.exists() {
            fs::write(&path, CSV_HEADER)?;
            info!("Created expenses file at {}", path.display());
        }
        Ok(())
    }
}

impl Connection for CsvConnection {
    type ExpenseRepository = ExpenseRepository;

    fn create_expense_repository(&self) -> Self::ExpenseRepository {
        ExpenseRepository::new(self.clone())
    }
}
