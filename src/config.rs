//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub embedding: EmbeddingConfig,
    pub admin: AdminConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub database_path: PathBuf,
    pub session_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    /// Model id as known to the embedding model manager (e.g. "potion-base-8M")
    pub model: String,
    pub models_dir: PathBuf,
    /// Fall back to the hashing embedder when the pretrained model cannot be loaded
    pub allow_fallback: bool,
    pub hashing_dimensions: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingBackend {
    Model2vec,
    Hashing,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub color_output: bool,
    /// Number of leading candidates in the dashboard score distribution
    pub top_n: usize,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = Self::data_dir();

        Self {
            storage: StorageConfig {
                database_path: data_dir.join("resume_data.db"),
                session_path: data_dir.join("last_analysis.json"),
            },
            embedding: EmbeddingConfig {
                backend: EmbeddingBackend::Model2vec,
                model: "potion-base-8M".to_string(),
                models_dir: data_dir.join("models"),
                allow_fallback: true,
                hashing_dimensions: 256,
            },
            admin: AdminConfig {
                username: "admin".to_string(),
                password: "12345".to_string(),
            },
            output: OutputConfig {
                color_output: true,
                top_n: 5,
            },
        }
    }
}

impl Config {
    /// Load the configuration from `path`, or from the default location.
    ///
    /// A missing file is created with defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, self.to_toml()?)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
    }

    /// Create the parent directories of the store and session files
    pub fn ensure_data_dirs(&self) -> Result<()> {
        for path in [&self.storage.database_path, &self.storage.session_path] {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
