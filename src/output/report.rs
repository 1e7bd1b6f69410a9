//! CSV reports of ranked analyses and of the full candidate store

use crate::error::{Result, ScreenerError};
use serde::Serialize;
use std::path::Path;

pub const ANALYSIS_REPORT_FILENAME: &str = "resume_analysis_report.csv";
pub const FULL_REPORT_FILENAME: &str = "all_candidates_report.csv";

/// Serialize rows to CSV text with a header taken from the row type
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ScreenerError::Io(e.into_error()))?;

    String::from_utf8(bytes)
        .map_err(|e| ScreenerError::Processing(format!("CSV output is not UTF-8: {}", e)))
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::AnalysisRow;
    use crate::storage::PersistedRow;
    use tempfile::TempDir;

    #[test]
    fn test_analysis_report_columns() {
        let rows = vec![AnalysisRow {
            name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
            phone: "Not Found".to_string(),
            resume: "john.pdf".to_string(),
            similarity: 61.5,
            matched_skills: "python, sql".to_string(),
            skill_gaps: "react".to_string(),
        }];

        let csv_text = to_csv(&rows).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Name,Email,Phone,Resume,Similarity,Matched Skills,Skill Gaps"
        );
        assert_eq!(
            lines.next().unwrap(),
            "John Smith,john@example.com,Not Found,john.pdf,61.5,\"python, sql\",react"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_full_report_columns() {
        let rows = vec![PersistedRow {
            id: 7,
            name: "Unknown".to_string(),
            email: "Not Found".to_string(),
            phone: "Not Found".to_string(),
            filename: "cv.docx".to_string(),
            job_category: "Cloud & DevOps".to_string(),
            role: "Cloud Engineer".to_string(),
            similarity: 12.0,
            matched_skills: String::new(),
            skill_gaps: "aws, azure".to_string(),
        }];

        let csv_text = to_csv(&rows).unwrap();
        assert!(csv_text.starts_with(
            "id,name,email,phone,filename,job_category,role,similarity,matched_skills,skill_gaps\n"
        ));
        assert!(csv_text.contains("7,Unknown,Not Found,Not Found,cv.docx,Cloud & DevOps,Cloud Engineer,12.0,,\"aws, azure\""));
    }

    #[test]
    fn test_empty_report_has_no_header() {
        let rows: Vec<AnalysisRow> = Vec::new();
        assert_eq!(to_csv(&rows).unwrap(), "");
    }

    #[test]
    fn test_save_report_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports").join(ANALYSIS_REPORT_FILENAME);
        save_report_to_file("a,b\n", &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n");
    }
}
