//! Extraction, matching and scoring

pub mod extraction;
pub mod skills;
pub mod catalog;
pub mod embeddings;
pub mod embedding_manager;
pub mod analyzer;
