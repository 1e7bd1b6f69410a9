//! Job-description skill tokens and skill-gap detection

use crate::processing::extraction::SkillTokenizer;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered skill tokens of a job description. Duplicates are kept so that
/// downstream listings follow the description's own order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JobSkillSet {
    tokens: Vec<String>,
}

impl JobSkillSet {
    pub fn from_description(tokenizer: &SkillTokenizer, description: &str) -> Self {
        Self {
            tokens: tokenizer.tokenize(description),
        }
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Split the job tokens into those the candidate has and those missing.
    pub fn detect_gaps(&self, candidate_skills: &HashSet<String>) -> MatchResult {
        let (matched, gaps): (Vec<String>, Vec<String>) = self
            .tokens
            .iter()
            .cloned()
            .partition(|token| candidate_skills.contains(token));

        MatchResult { matched, gaps }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub gaps: Vec<String>,
}

impl MatchResult {
    pub fn matched_joined(&self) -> String {
        self.matched.join(", ")
    }

    pub fn gaps_joined(&self) -> String {
        self.gaps.join(", ")
    }
}

/// Split a comma-joined skill column back into trimmed, non-empty tokens
pub fn split_joined(joined: &str) -> impl Iterator<Item = &str> {
    joined.split(',').map(str::trim).filter(|s| !s.is_empty())
}
