//! Report export domain logic.
//!
//! Rendering the CSV payload is pure and deterministic: identical
//! matrix and totals always produce a byte-identical string. Writing
//! the payload to disk is kept separate so the presentation layer can
//! also hand the raw text to a share mechanism.

use crate::domain::errors::DomainResult;
use crate::domain::models::ExpenseCategory;
use crate::domain::report_service::{DayBreakdown, ReportService};
use crate::storage::traits::Connection;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use log::{error, info};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use shared::{ExportDataResponse, ExportToPathRequest, ExportToPathResponse};

/// Export service that renders and writes weekly report payloads.
#[derive(Clone)]
pub struct ExportService {
    // No internal state needed for now
}

impl ExportService {
    pub fn new() -> Self {
        Self {}
    }

    /// Render the report CSV payload.
    ///
    /// Layout: a `Date,Food,Travel,Staff,Utility` header, one row per
    /// matrix day (oldest first, dates as `Jan 05`), a blank line and
    /// the `Category Totals` block, then a blank line and the
    /// `Total Weekly Expense` line. Amounts are formatted to exactly
    /// two decimal places; nothing upstream rounds before this point.
    pub fn render_report_csv(
        &self,
        matrix: &[DayBreakdown],
        category_totals: &BTreeMap<ExpenseCategory, f64>,
    ) -> String {
        let mut csv_content = String::new();

        csv_content.push_str("Date");
        for category in ExpenseCategory::ALL {
            csv_content.push_str(&format!(",{}", category));
        }
        csv_content.push('\n');

        for day in matrix {
            csv_content.push_str(&day.date.format("%b %d").to_string());
            for category in ExpenseCategory::ALL {
                let amount = day.amounts.get(&category).copied().unwrap_or(0.0);
                csv_content.push_str(&format!(",{:.2}", amount));
            }
            csv_content.push('\n');
        }

        csv_content.push_str("\nCategory Totals\n");
        for category in ExpenseCategory::ALL {
            let total = category_totals.get(&category).copied().unwrap_or(0.0);
            csv_content.push_str(&format!("{},{:.2}\n", category, total));
        }

        let total_weekly_expense: f64 = category_totals.values().sum();
        csv_content.push_str(&format!(
            "\nTotal Weekly Expense,{:.2}\n",
            total_weekly_expense
        ));

        csv_content
    }

    /// Filename for a report exported on `date`.
    pub fn export_filename(&self, date: NaiveDate) -> String {
        format!("expense_report_{}.csv", date.format("%Y%m%d"))
    }

    /// Run the weekly report and render it as CSV data with complete
    /// orchestration.
    pub fn export_weekly_report<C: Connection>(
        &self,
        report_service: &ReportService<C>,
        window_days: u32,
    ) -> DomainResult<ExportDataResponse> {
        info!("📄 EXPORT: Rendering weekly report CSV ({} day window)", window_days);

        let report = report_service.weekly_report(window_days)?;
        let csv_content = self.render_report_csv(&report.matrix, &report.category_totals);
        let today = Local::now().with_timezone(&report_service.zone()).date_naive();

        let response = ExportDataResponse {
            day_count: report.matrix.len(),
            filename: self.export_filename(today),
            csv_content,
        };
        info!(
            "✅ EXPORT: Rendered {} day rows ({} bytes) as {}",
            response.day_count,
            response.csv_content.len(),
            response.filename
        );
        Ok(response)
    }

    /// Export the weekly report directly to a directory (or the
    /// default location) with complete orchestration.
    pub fn export_to_path<C: Connection>(
        &self,
        request: ExportToPathRequest,
        report_service: &ReportService<C>,
    ) -> DomainResult<ExportToPathResponse> {
        info!("📁 EXPORT: Exporting to path - custom_path: {:?}", request.custom_path);

        let window_days = request.window_days.unwrap_or(crate::domain::report_service::DEFAULT_WINDOW_DAYS);
        let export_response = self.export_weekly_report(report_service, window_days)?;

        let export_dir = match request.custom_path {
            Some(custom_path) if !custom_path.trim().is_empty() => {
                PathBuf::from(self.sanitize_path(&custom_path))
            }
            _ => match dirs::document_dir().or_else(dirs::home_dir) {
                Some(dir) => dir,
                None => {
                    error!("❌ EXPORT: Could not determine default export directory");
                    return Ok(ExportToPathResponse {
                        success: false,
                        message: "Failed to determine export directory".to_string(),
                        file_path: String::new(),
                        day_count: 0,
                    });
                }
            },
        };

        let file_path = export_dir.join(&export_response.filename);
        match self.write_payload(&file_path, &export_response.csv_content) {
            Ok(()) => {
                let file_path_str = file_path.to_string_lossy().to_string();
                info!("✅ EXPORT: Wrote report to {}", file_path_str);
                Ok(ExportToPathResponse {
                    success: true,
                    message: format!("Report exported to: {}", file_path_str),
                    file_path: file_path_str,
                    day_count: export_response.day_count,
                })
            }
            Err(e) => {
                error!("❌ EXPORT: Failed to write report to {:?}: {}", file_path, e);
                Ok(ExportToPathResponse {
                    success: false,
                    message: format!("Failed to write export file: {}", e),
                    file_path: file_path.to_string_lossy().to_string(),
                    day_count: 0,
                })
            }
        }
    }

    fn write_payload(&self, file_path: &PathBuf, payload: &str) -> Result<()> {
        if let Some(parent_dir) = file_path.parent() {
            fs::create_dir_all(parent_dir)?;
        }
        fs::write(file_path, payload)?;
        Ok(())
    }

    /// Basic path sanitization to handle common user input issues.
    fn sanitize_path(&self, path: &str) -> String {
        let mut cleaned = path.trim().to_string();

        // Remove surrounding quotes (single or double)
        if (cleaned.starts_with('"') && cleaned.ends_with('"'))
            || (cleaned.starts_with('\'') && cleaned.ends_with('\''))
        {
            cleaned = cleaned[1..cleaned.len() - 1].trim().to_string();
        }

        while cleaned.ends_with('/') || cleaned.ends_with('\\') {
            cleaned.pop();
        }

        // Tilde expansion for home-relative paths
        if cleaned.starts_with('~') {
            if let Some(home) = dirs::home_dir() {
                if cleaned == "~" {
                    cleaned = home.to_string_lossy().to_string();
                } else if let Some(rest) = cleaned.strip_prefix("~/") {
                    cleaned = home.join(rest).to_string_lossy().to_string();
                }
            }
        }

        cleaned
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}
