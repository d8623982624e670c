//! Application configuration.
//!
//! Everything the backend needs from its host is injected here; there
//! is no ambient global state. The day-bucketing zone is a fixed UTC
//! offset, defaulting to whatever the system zone's offset is at
//! startup.

use anyhow::{anyhow, Result};
use chrono::{FixedOffset, Local};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Data directory for the CSV store. Defaults to
    /// `~/Documents/Expense Tracker` when absent.
    pub data_dir: Option<PathBuf>,

    /// Fixed UTC offset in seconds used for all day-boundary
    /// computations. Defaults to the system local offset.
    pub utc_offset_seconds: Option<i32>,
}

impl AppConfig {
    /// The zone every calendar-day computation runs in.
    pub fn zone(&self) -> Result<FixedOffset> {
        match self.utc_offset_seconds {
            Some(seconds) => FixedOffset::east_opt(seconds)
                .ok_or_else(|| anyhow!("invalid utc_offset_seconds: {}", seconds)),
            None => Ok(*Local::now().offset()),
        }
    }
}
