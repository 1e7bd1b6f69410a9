//! Snapshot of the most recent analysis, read back by the dashboard

use crate::error::Result;
use crate::processing::analyzer::AnalysisRow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub job_category: String,
    pub role: String,
    pub analyzed_at: DateTime<Utc>,
    /// Ranked, best match first
    pub rows: Vec<AnalysisRow>,
}

impl SessionSnapshot {
    pub fn new(job_category: &str, role: &str, rows: Vec<AnalysisRow>) -> Self {
        Self {
            job_category: job_category.to_string(),
            role: role.to_string(),
            analyzed_at: Utc::now(),
            rows,
        }
    }

    /// Replace any previous snapshot at `path`
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// `None` when no analysis has been run yet
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }
}
