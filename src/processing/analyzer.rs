//! Batch analysis: resumes scored and matched against one job role

use crate::error::Result;
use crate::input::InputManager;
use crate::processing::catalog::JobCatalog;
use crate::processing::embeddings::{cosine_similarity, similarity_score, Embedder};
use crate::processing::extraction::CandidateExtractor;
use crate::processing::skills::JobSkillSet;
use crate::storage::{CandidateStore, NewCandidate, SessionSnapshot};
use indicatif::ProgressBar;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// One row of the ranked results table. Field names are the CSV headers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRow {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Resume")]
    pub resume: String,
    #[serde(rename = "Similarity")]
    pub similarity: f64,
    #[serde(rename = "Matched Skills")]
    pub matched_skills: String,
    #[serde(rename = "Skill Gaps")]
    pub skill_gaps: String,
}

/// A document left out of the results, with the reason
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedDocument {
    pub resume: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct BatchReport {
    pub job_category: String,
    pub role: String,
    /// Best match first
    pub rows: Vec<AnalysisRow>,
    pub skipped: Vec<SkippedDocument>,
    pub embedder: String,
    pub processing_time_ms: u64,
}

impl BatchReport {
    pub fn to_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::new(&self.job_category, &self.role, self.rows.clone())
    }
}

#[derive(Debug, Clone)]
pub enum BatchOutcome {
    /// No documents were supplied
    Empty,
    /// Every document was skipped; nothing was stored
    NothingProcessed { skipped: Vec<SkippedDocument> },
    Completed(BatchReport),
}

/// Job-side inputs computed once per batch
pub struct JobTarget {
    pub job_category: String,
    pub role: String,
    pub skills: JobSkillSet,
    pub embedding: Vec<f32>,
}

/// Owns the embedder and the store for the lifetime of the process.
pub struct AnalysisService {
    embedder: Box<dyn Embedder>,
    store: CandidateStore,
    catalog: JobCatalog,
    extractor: CandidateExtractor,
    input: InputManager,
}

impl AnalysisService {
    pub fn new(embedder: Box<dyn Embedder>, store: CandidateStore, catalog: JobCatalog) -> Self {
        Self {
            embedder,
            store,
            catalog,
            extractor: CandidateExtractor::new(),
            input: InputManager::new(),
        }
    }

    pub fn catalog(&self) -> &JobCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    pub fn embedder_name(&self) -> &str {
        self.embedder.name()
    }

    /// Validate the role and prepare its skill tokens and embedding
    pub fn job_target(&self, job_category: &str, role: &str) -> Result<JobTarget> {
        self.catalog.validate(job_category, role)?;

        let description = self.catalog.skill_text(role);
        if description.is_empty() {
            warn!("Role '{}' has no skill description; no skills will be matched", role);
        }

        Ok(JobTarget {
            job_category: job_category.to_string(),
            role: role.to_string(),
            skills: JobSkillSet::from_description(self.extractor.tokenizer(), description),
            embedding: self.embedder.embed(description)?,
        })
    }

    /// Score and match one resume text against the target role
    pub fn analyze_text(&self, target: &JobTarget, resume: &str, text: &str) -> Result<AnalysisRow> {
        let resume_embedding = self.embedder.embed(text)?;
        let similarity = similarity_score(cosine_similarity(&target.embedding, &resume_embedding)?);

        let candidate = self.extractor.extract(text);
        let result = target.skills.detect_gaps(&candidate.skills);
        debug!(
            "{}: similarity {:.2}, {} matched, {} gaps",
            resume,
            similarity,
            result.matched.len(),
            result.gaps.len()
        );

        Ok(AnalysisRow {
            name: candidate.name,
            email: candidate.email,
            phone: candidate.phone,
            resume: resume.to_string(),
            similarity,
            matched_skills: result.matched_joined(),
            skill_gaps: result.gaps_joined(),
        })
    }

    /// Analyze a batch of resume files for one role.
    ///
    /// Each processed document is appended to the store. Documents that
    /// cannot be read or contain no text are skipped, not fatal.
    pub async fn analyze_batch(
        &mut self,
        job_category: &str,
        role: &str,
        paths: &[PathBuf],
        progress: &ProgressBar,
    ) -> Result<BatchOutcome> {
        if paths.is_empty() {
            return Ok(BatchOutcome::Empty);
        }

        let start_time = Instant::now();
        let target = self.job_target(job_category, role)?;
        info!(
            "Analyzing {} resume(s) for the {} role with {} embeddings",
            paths.len(),
            role,
            self.embedder.name()
        );

        let mut rows = Vec::new();
        let mut skipped = Vec::new();

        for path in paths {
            let resume = display_name(path);
            progress.set_message(resume.clone());

            match self.read_document(path).await {
                Ok(text) if !text.trim().is_empty() => {
                    let row = self.analyze_text(&target, &resume, &text)?;
                    self.store.append(&row.to_new_candidate(&target)).await?;
                    rows.push(row);
                }
                Ok(_) => {
                    warn!("Skipping {}: no text could be extracted", resume);
                    skipped.push(SkippedDocument {
                        resume,
                        reason: "no text could be extracted".to_string(),
                    });
                }
                Err(e) => {
                    warn!("Skipping {}: {}", resume, e);
                    skipped.push(SkippedDocument {
                        resume,
                        reason: e.to_string(),
                    });
                }
            }

            progress.inc(1);
        }

        if rows.is_empty() {
            return Ok(BatchOutcome::NothingProcessed { skipped });
        }

        rank(&mut rows);

        Ok(BatchOutcome::Completed(BatchReport {
            job_category: target.job_category,
            role: target.role,
            rows,
            skipped,
            embedder: self.embedder.name().to_string(),
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        }))
    }

    async fn read_document(&mut self, path: &Path) -> Result<String> {
        self.input.extract_text(path).await
    }

    /// Release the store connection
    pub async fn close(self) {
        self.store.close().await;
    }
}

impl AnalysisRow {
    fn to_new_candidate(&self, target: &JobTarget) -> NewCandidate {
        NewCandidate {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            filename: self.resume.clone(),
            job_category: target.job_category.clone(),
            role: target.role.clone(),
            similarity: self.similarity,
            matched_skills: self.matched_skills.clone(),
            skill_gaps: self.skill_gaps.clone(),
        }
    }
}

/// Sort by similarity, highest first; ties keep their input order
pub fn rank(rows: &mut [AnalysisRow]) {
    rows.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
