//! Aggregates behind the dashboard and admin views

use crate::processing::analyzer::AnalysisRow;
use crate::processing::skills::split_joined;
use crate::storage::PersistedRow;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

/// Count gap tokens across comma-joined gap columns.
///
/// Ordered by count, highest first; equal counts keep first-seen order.
pub fn gap_frequency<'a, I>(gap_columns: I) -> Vec<SkillCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: Vec<SkillCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for column in gap_columns {
        for skill in split_joined(column) {
            match index.get(skill) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(skill.to_string(), counts.len());
                    counts.push(SkillCount {
                        skill: skill.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreShare {
    pub name: String,
    pub similarity: f64,
    /// Percent of the combined score of the listed candidates
    pub share: f64,
}

/// Summary of the last analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardInsights {
    pub total_candidates: usize,
    pub average_score: f64,
    pub top_score: f64,
    pub gap_frequency: Vec<SkillCount>,
    pub top_distribution: Vec<ScoreShare>,
}

impl DashboardInsights {
    /// `rows` must already be ranked
    pub fn from_rows(rows: &[AnalysisRow], top_n: usize) -> Self {
        let scores: Vec<f64> = rows.iter().map(|r| r.similarity).collect();

        let top = &rows[..rows.len().min(top_n)];
        let top_total: f64 = top.iter().map(|r| r.similarity).sum();
        let top_distribution = top
            .iter()
            .map(|r| ScoreShare {
                name: r.name.clone(),
                similarity: r.similarity,
                share: if top_total == 0.0 {
                    0.0
                } else {
                    r.similarity / top_total * 100.0
                },
            })
            .collect();

        Self {
            total_candidates: rows.len(),
            average_score: mean(&scores),
            top_score: scores.iter().cloned().reduce(f64::max).unwrap_or(0.0),
            gap_frequency: gap_frequency(rows.iter().map(|r| r.skill_gaps.as_str())),
            top_distribution,
        }
    }
}

/// Score distribution of one role across all stored analyses
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleDistribution {
    pub role: String,
    pub job_category: String,
    pub count: usize,
    pub min: f64,
    pub median: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminOverview {
    pub total_rows: usize,
    pub role_distribution: Vec<RoleDistribution>,
    pub gap_frequency: Vec<SkillCount>,
}

impl AdminOverview {
    pub fn from_rows(rows: &[PersistedRow]) -> Self {
        let mut groups: Vec<((String, String), Vec<f64>)> = Vec::new();
        for row in rows {
            let key = (row.role.clone(), row.job_category.clone());
            match groups.iter_mut().find(|(k, _)| *k == key) {
                Some((_, scores)) => scores.push(row.similarity),
                None => groups.push((key, vec![row.similarity])),
            }
        }

        let role_distribution = groups
            .into_iter()
            .map(|((role, job_category), mut scores)| {
                scores.sort_by(f64::total_cmp);
                RoleDistribution {
                    role,
                    job_category,
                    count: scores.len(),
                    min: scores[0],
                    median: median(&scores),
                    max: scores[scores.len() - 1],
                    mean: mean(&scores),
                }
            })
            .collect();

        Self {
            total_rows: rows.len(),
            role_distribution,
            gap_frequency: gap_frequency(rows.iter().map(|r| r.skill_gaps.as_str())),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median of sorted, non-empty values
fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis_row(name: &str, similarity: f64, gaps: &str) -> AnalysisRow {
        AnalysisRow {
            name: name.to_string(),
            email: "Not Found".to_string(),
            phone: "Not Found".to_string(),
            resume: format!("{}.txt", name),
            similarity,
            matched_skills: String::new(),
            skill_gaps: gaps.to_string(),
        }
    }

    fn stored_row(role: &str, category: &str, similarity: f64, gaps: &str) -> PersistedRow {
        PersistedRow {
            id: 0,
            name: "Unknown".to_string(),
            email: "Not Found".to_string(),
            phone: "Not Found".to_string(),
            filename: "cv.txt".to_string(),
            job_category: category.to_string(),
            role: role.to_string(),
            similarity,
            matched_skills: String::new(),
            skill_gaps: gaps.to_string(),
        }
    }

    #[test]
    fn test_gap_frequency_ordering() {
        let counts = gap_frequency(vec!["sql, react", "react", "", "docker, sql, react"]);
        let pairs: Vec<_> = counts.iter().map(|c| (c.skill.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("react", 3), ("sql", 2), ("docker", 1)]);
    }

    #[test]
    fn test_dashboard_metrics() {
        let rows = vec![
            analysis_row("A", 60.0, "sql"),
            analysis_row("B", 30.0, "sql, react"),
            analysis_row("C", 10.0, ""),
        ];
        let insights = DashboardInsights::from_rows(&rows, 2);

        assert_eq!(insights.total_candidates, 3);
        assert!((insights.average_score - 33.333).abs() < 0.01);
        assert_eq!(insights.top_score, 60.0);
        assert_eq!(insights.gap_frequency[0].skill, "sql");
        assert_eq!(insights.top_distribution.len(), 2);
        assert!((insights.top_distribution[0].share - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_dashboard_zero_scores() {
        let rows = vec![analysis_row("A", 0.0, "")];
        let insights = DashboardInsights::from_rows(&rows, 5);
        assert_eq!(insights.top_distribution[0].share, 0.0);
        assert!(insights.gap_frequency.is_empty());
    }

    #[test]
    fn test_admin_role_distribution() {
        let rows = vec![
            stored_row("Cloud Engineer", "Cloud & DevOps", 40.0, "gcp"),
            stored_row("Data Scientist", "Data & Analytics", 70.0, ""),
            stored_row("Cloud Engineer", "Cloud & DevOps", 10.0, "gcp, azure"),
            stored_row("Cloud Engineer", "Cloud & DevOps", 25.0, ""),
        ];
        let overview = AdminOverview::from_rows(&rows);

        assert_eq!(overview.total_rows, 4);
        assert_eq!(overview.role_distribution.len(), 2);

        let cloud = &overview.role_distribution[0];
        assert_eq!(cloud.role, "Cloud Engineer");
        assert_eq!(cloud.count, 3);
        assert_eq!(cloud.min, 10.0);
        assert_eq!(cloud.median, 25.0);
        assert_eq!(cloud.max, 40.0);
        assert_eq!(cloud.mean, 25.0);

        assert_eq!(overview.role_distribution[1].median, 70.0);
        assert_eq!(overview.gap_frequency[0].skill, "gcp");
        assert_eq!(overview.gap_frequency[0].count, 2);
    }

    #[test]
    fn test_median_even_count() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
    }
}
