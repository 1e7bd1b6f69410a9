//! CLI interface for the resume screener

use crate::config::EmbeddingBackend;
use crate::output::report::{ANALYSIS_REPORT_FILENAME, FULL_REPORT_FILENAME};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Screen resumes against a job role with semantic similarity and skill-gap detection")]
#[command(long_about = "Rank a batch of resumes (PDF, DOCX, TXT, MD) against a job role, list matched skills and skill gaps, keep an append-only history and export CSV reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a batch of resumes against a role
    Analyze {
        /// Job category (see `roles`)
        #[arg(long)]
        category: String,

        /// Role within the category
        #[arg(short, long)]
        role: String,

        /// Resume files (PDF, DOCX, TXT, MD)
        resumes: Vec<PathBuf>,

        /// Write the ranked table as CSV
        #[arg(long, num_args = 0..=1, default_missing_value = ANALYSIS_REPORT_FILENAME)]
        report: Option<PathBuf>,

        /// Embedding backend override: model2vec, hashing
        #[arg(short, long)]
        embedding: Option<String>,
    },

    /// Show insights for the most recent analysis
    Dashboard,

    /// Recruiter admin panel over all stored analyses
    Admin {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,

        /// Write all stored rows as CSV
        #[arg(long, num_args = 0..=1, default_missing_value = FULL_REPORT_FILENAME)]
        export: Option<PathBuf>,
    },

    /// List job categories, roles and their skills
    Roles,

    /// Embedding model management
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List known embedding models
    List,

    /// Download an embedding model
    Download {
        /// Model id or Hugging Face repo id
        model: String,

        /// Force re-download if model exists
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate an embedding backend name
pub fn parse_embedding_backend(backend: &str) -> Result<EmbeddingBackend, String> {
    match backend.to_lowercase().as_str() {
        "model2vec" | "m2v" => Ok(EmbeddingBackend::Model2vec),
        "hashing" | "hash" => Ok(EmbeddingBackend::Hashing),
        _ => Err(format!("Invalid embedding backend: {}. Supported: model2vec, hashing", backend)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "resume-screener",
            "analyze",
            "--category",
            "Cloud & DevOps",
            "--role",
            "Cloud Engineer",
            "a.pdf",
            "b.docx",
        ])
        .unwrap();

        match cli.command {
            Commands::Analyze { category, role, resumes, report, .. } => {
                assert_eq!(category, "Cloud & DevOps");
                assert_eq!(role, "Cloud Engineer");
                assert_eq!(resumes.len(), 2);
                assert!(report.is_none());
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_export_flag_without_value_uses_default_name() {
        let cli = Cli::try_parse_from([
            "resume-screener", "admin", "-u", "admin", "-p", "12345", "--export",
        ])
        .unwrap();

        match cli.command {
            Commands::Admin { export, .. } => {
                assert_eq!(export, Some(PathBuf::from(FULL_REPORT_FILENAME)));
            }
            _ => panic!("expected admin"),
        }
    }

    #[test]
    fn test_parse_embedding_backend() {
        assert_eq!(parse_embedding_backend("Hashing"), Ok(EmbeddingBackend::Hashing));
        assert_eq!(parse_embedding_backend("m2v"), Ok(EmbeddingBackend::Model2vec));
        assert!(parse_embedding_backend("bert").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("out.CSV"), &["csv"]).is_ok());
        assert!(validate_file_extension(Path::new("out.txt"), &["csv"]).is_err());
        assert!(validate_file_extension(Path::new("out"), &["csv"]).is_err());
    }
}
