//! Candidate field extraction from raw resume text
//!
//! All extraction here is pattern based. A field that cannot be found
//! degrades to a sentinel value; nothing in this module returns an error.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const UNKNOWN_NAME: &str = "Unknown";
pub const NOT_FOUND: &str = "Not Found";

/// Letters plus `#` and `+`, between 2 and 15 characters, on word boundaries.
const SKILL_TOKEN_PATTERN: &str = r"\b[A-Za-z#+]{2,15}\b";

/// Structured fields pulled out of one resume
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub skills: HashSet<String>,
}

/// Splits text into lowercase skill tokens.
#[derive(Debug, Clone)]
pub struct SkillTokenizer {
    token_regex: Regex,
}

impl Default for SkillTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl SkillTokenizer {
    pub fn new() -> Self {
        let token_regex = Regex::new(SKILL_TOKEN_PATTERN).expect("Invalid skill token regex");
        Self { token_regex }
    }

    /// Tokens in order of appearance, duplicates kept. Matching runs on the
    /// text as given and each token is lowercased afterwards.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        self.token_regex
            .find_iter(text)
            .map(|m| m.as_str().trim().to_lowercase())
            .collect()
    }

    /// Distinct tokens of the lowercased text.
    pub fn token_set(&self, text: &str) -> HashSet<String> {
        let lowered = text.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// Heuristic extractor for name, email, phone and skill tokens.
#[derive(Debug, Clone)]
pub struct CandidateExtractor {
    name_regex: Regex,
    email_regex: Regex,
    phone_regex: Regex,
    tokenizer: SkillTokenizer,
}

impl Default for CandidateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl CandidateExtractor {
    pub fn new() -> Self {
        let name_regex = Regex::new(r"[A-Z][a-z]+\s[A-Z][a-z]+")
            .expect("Invalid name regex");

        let email_regex = Regex::new(r"[\w.-]+@[\w.-]+\.\w+")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"\+?\d[\d\s\-()]{8,}\d")
            .expect("Invalid phone regex");

        Self {
            name_regex,
            email_regex,
            phone_regex,
            tokenizer: SkillTokenizer::new(),
        }
    }

    pub fn tokenizer(&self) -> &SkillTokenizer {
        &self.tokenizer
    }

    /// Build a candidate record from raw document text
    pub fn extract(&self, text: &str) -> CandidateRecord {
        CandidateRecord {
            name: self.extract_name(text),
            email: self.extract_email(text),
            phone: self.extract_phone(text),
            skills: self.tokenizer.token_set(text),
        }
    }

    /// First pair of consecutive capitalized words.
    pub fn extract_name(&self, text: &str) -> String {
        first_match(&self.name_regex, text, UNKNOWN_NAME)
    }

    pub fn extract_email(&self, text: &str) -> String {
        first_match(&self.email_regex, text, NOT_FOUND)
    }

    pub fn extract_phone(&self, text: &str) -> String {
        first_match(&self.phone_regex, text, NOT_FOUND)
    }
}

fn first_match(regex: &Regex, text: &str, sentinel: &str) -> String {
    regex
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| sentinel.to_string())
}
