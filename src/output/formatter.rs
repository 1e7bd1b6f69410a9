//! Console rendering of results, dashboard and admin views

use crate::output::insights::{AdminOverview, DashboardInsights, SkillCount};
use crate::processing::analyzer::{AnalysisRow, BatchReport};
use crate::processing::catalog::JobCatalog;
use crate::storage::{PersistedRow, SessionSnapshot};
use colored::{Color, Colorize};

pub struct ConsoleFormatter {
    use_colors: bool,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        let underline = "=".repeat(title.chars().count());
        if self.use_colors {
            format!("{}\n{}\n", title.bold().yellow(), underline.yellow())
        } else {
            format!("{}\n{}\n", title, underline)
        }
    }

    fn format_score(&self, score: f64) -> String {
        let text = format!("{:.2}", score);
        let color = if score >= 70.0 {
            Color::Green
        } else if score >= 40.0 {
            Color::Yellow
        } else {
            Color::Red
        };
        self.colorize(&text, color)
    }

    pub fn format_roles(&self, catalog: &JobCatalog) -> String {
        let mut output = self.format_header("Job Categories");
        for category in catalog.categories() {
            output.push_str(&format!("\n{}\n", self.colorize(category.name, Color::Cyan)));
            for role in category.roles {
                let skills = catalog.skill_text(role);
                let skills = if skills.is_empty() { "(no skill description)" } else { skills };
                output.push_str(&format!("  • {:<22} {}\n", role, skills));
            }
        }
        output
    }

    pub fn format_analysis(&self, report: &BatchReport) -> String {
        let mut output = self.format_header(&format!("Ranked Candidates: {}", report.role));
        output.push('\n');
        output.push_str(&self.format_analysis_table(&report.rows));

        if !report.skipped.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize(&format!("Skipped {} document(s):", report.skipped.len()), Color::Yellow)
            ));
            for skipped in &report.skipped {
                output.push_str(&format!("  • {}: {}\n", skipped.resume, skipped.reason));
            }
        }

        output.push_str(&format!(
            "\nEmbeddings: {} | Processing time: {}ms\n",
            report.embedder, report.processing_time_ms
        ));
        output
    }

    pub fn format_analysis_table(&self, rows: &[AnalysisRow]) -> String {
        let headers = ["Name", "Email", "Phone", "Resume", "Similarity", "Matched Skills", "Skill Gaps"];
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.name.clone(),
                    r.email.clone(),
                    r.phone.clone(),
                    r.resume.clone(),
                    format!("{:.2}", r.similarity),
                    r.matched_skills.clone(),
                    r.skill_gaps.clone(),
                ]
            })
            .collect();
        self.render_table(&headers, &cells, Some(4))
    }

    pub fn format_dashboard(&self, snapshot: &SessionSnapshot, insights: &DashboardInsights) -> String {
        let mut output = self.format_header(&format!("Insights for: {}", snapshot.role));
        output.push_str(&format!(
            "Analyzed {} ({})\n\n",
            snapshot.analyzed_at.format("%Y-%m-%d %H:%M UTC"),
            snapshot.job_category
        ));

        output.push_str(&format!("Total Candidates:     {}\n", insights.total_candidates));
        output.push_str(&format!("Average Match Score:  {:.1}%\n", insights.average_score));
        output.push_str(&format!("Top Candidate Score:  {:.1}%\n", insights.top_score));

        output.push_str(&format!("\n{}\n", self.colorize("Candidate Match Scores", Color::Cyan)));
        let score_rows: Vec<Vec<String>> = snapshot
            .rows
            .iter()
            .map(|r| vec![r.name.clone(), format!("{:.2}", r.similarity)])
            .collect();
        output.push_str(&self.render_table(&["Name", "Similarity"], &score_rows, Some(1)));

        output.push_str(&format!("\n{}\n", self.colorize("Most Common Skill Gaps", Color::Cyan)));
        if insights.gap_frequency.is_empty() {
            output.push_str("No skill gap data available.\n");
        } else {
            output.push_str(&self.format_skill_counts(&insights.gap_frequency, "Count"));
        }

        output.push_str(&format!(
            "\n{}\n",
            self.colorize(
                &format!("Top {} Candidate Match Distribution", insights.top_distribution.len()),
                Color::Cyan
            )
        ));
        let share_rows: Vec<Vec<String>> = insights
            .top_distribution
            .iter()
            .map(|s| vec![s.name.clone(), format!("{:.2}", s.similarity), format!("{:.1}%", s.share)])
            .collect();
        output.push_str(&self.render_table(&["Name", "Similarity", "Share"], &share_rows, None));
        output
    }

    pub fn format_admin(&self, rows: &[PersistedRow], overview: &AdminOverview) -> String {
        let mut output = self.format_header("All Candidate Data");
        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.name.clone(),
                    r.email.clone(),
                    r.phone.clone(),
                    r.filename.clone(),
                    r.job_category.clone(),
                    r.role.clone(),
                    format!("{:.2}", r.similarity),
                    r.matched_skills.clone(),
                    r.skill_gaps.clone(),
                ]
            })
            .collect();
        output.push_str(&self.render_table(
            &[
                "id", "name", "email", "phone", "filename", "job_category", "role", "similarity",
                "matched_skills", "skill_gaps",
            ],
            &cells,
            Some(7),
        ));

        output.push('\n');
        output.push_str(&self.format_header("Analytics Overview"));
        output.push_str(&format!(
            "\n{}\n",
            self.colorize("Role-wise Candidate Score Distribution", Color::Cyan)
        ));
        let distribution: Vec<Vec<String>> = overview
            .role_distribution
            .iter()
            .map(|d| {
                vec![
                    d.role.clone(),
                    d.job_category.clone(),
                    d.count.to_string(),
                    format!("{:.2}", d.min),
                    format!("{:.2}", d.median),
                    format!("{:.2}", d.max),
                    format!("{:.2}", d.mean),
                ]
            })
            .collect();
        output.push_str(&self.render_table(
            &["role", "job_category", "count", "min", "median", "max", "mean"],
            &distribution,
            None,
        ));

        if !overview.gap_frequency.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize("Most Common Skill Gaps (All Candidates)", Color::Cyan)
            ));
            output.push_str(&self.format_skill_counts(&overview.gap_frequency, "Frequency"));
        }
        output
    }

    fn format_skill_counts(&self, counts: &[SkillCount], label: &str) -> String {
        let rows: Vec<Vec<String>> = counts
            .iter()
            .map(|c| vec![c.skill.clone(), c.count.to_string()])
            .collect();
        self.render_table(&["Skill", label], &rows, None)
    }

    /// Left-aligned text table; `score_column` is colored by value
    fn render_table(&self, headers: &[&str], rows: &[Vec<String>], score_column: Option<usize>) -> String {
        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let mut output = String::new();
        let header_line = headers
            .iter()
            .zip(&widths)
            .map(|(h, w)| format!("{:<width$}", h, width = *w))
            .collect::<Vec<_>>()
            .join("  ");
        output.push_str(&self.colorize(header_line.trim_end(), Color::BrightWhite));
        output.push('\n');
        output.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("  "),
        );
        output.push('\n');

        for row in rows {
            let line = row
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(i, (cell, w))| {
                    let padded = format!("{:<width$}", cell, width = *w);
                    match (score_column, cell.parse::<f64>()) {
                        (Some(column), Ok(score)) if column == i => {
                            // pad first so color codes don't skew the width
                            padded.replacen(cell.as_str(), &self.format_score(score), 1)
                        }
                        _ => padded,
                    }
                })
                .collect::<Vec<_>>()
                .join("  ");
            output.push_str(line.trim_end());
            output.push('\n');
        }
        output
    }
}
