//! Download and bookkeeping for Model2Vec embedding models

use crate::error::{Result, ScreenerError};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files a Model2Vec model directory must contain
const REQUIRED_FILES: [&str; 3] = ["tokenizer.json", "model.safetensors", "config.json"];

/// Information about a known embedding model
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingModelInfo {
    pub id: &'static str,
    pub repo_id: &'static str,
    pub size_mb: u64,
    pub dimensions: u32,
    pub description: &'static str,
}

const KNOWN_MODELS: &[EmbeddingModelInfo] = &[
    EmbeddingModelInfo {
        id: "potion-base-8M",
        repo_id: "minishlab/potion-base-8M",
        size_mb: 33,
        dimensions: 256,
        description: "Recommended default: compact general-purpose static embeddings",
    },
    EmbeddingModelInfo {
        id: "potion-retrieval-32M",
        repo_id: "minishlab/potion-retrieval-32M",
        size_mb: 130,
        dimensions: 512,
        description: "Larger model tuned for retrieval-style matching",
    },
    EmbeddingModelInfo {
        id: "m2v-base",
        repo_id: "minishlab/M2V_base_output",
        size_mb: 90,
        dimensions: 256,
        description: "Legacy Model2Vec base model",
    },
];

/// Tracks which embedding models are present in the models directory
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    downloaded_models: HashSet<String>,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&models_dir).await.map_err(|e| {
            ScreenerError::ModelError(format!("Failed to create models directory: {}", e))
        })?;

        let mut manager = Self {
            models_dir,
            downloaded_models: HashSet::new(),
        };
        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await.map_err(|e| {
            ScreenerError::ModelError(format!("Failed to scan models directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() && Self::is_valid_model_directory(&entry.path()).await {
                self.downloaded_models
                    .insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(())
    }

    async fn is_valid_model_directory(path: &Path) -> bool {
        for file in REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    pub fn list_available_models(&self) -> &'static [EmbeddingModelInfo] {
        KNOWN_MODELS
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&'static EmbeddingModelInfo> {
        KNOWN_MODELS
            .iter()
            .find(|m| m.id == model_id || m.repo_id == model_id)
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    pub fn model_path(&self, model_id: &str) -> PathBuf {
        self.models_dir.join(model_id)
    }

    /// Download a model from the Hugging Face Hub into the models directory
    pub async fn download_model(&mut self, model_id: &str, force: bool) -> Result<PathBuf> {
        let model_info = self.get_model_info(model_id).ok_or_else(|| {
            ScreenerError::ModelError(format!("Unknown embedding model: {}", model_id))
        })?;

        let model_dir = self.model_path(model_info.id);
        if !force && self.is_model_downloaded(model_info.id) {
            return Ok(model_dir);
        }

        info!(
            "Downloading embedding model {} ({} MB) from {}",
            model_info.id, model_info.size_mb, model_info.repo_id
        );

        fs::create_dir_all(&model_dir).await.map_err(|e| {
            ScreenerError::ModelError(format!("Failed to create model directory: {}", e))
        })?;

        let api = Api::new()
            .map_err(|e| ScreenerError::ModelError(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.model(model_info.repo_id.to_string());

        for file in REQUIRED_FILES {
            let cached = repo.get(file).await.map_err(|e| {
                ScreenerError::ModelError(format!("Failed to download required file {}: {}", file, e))
            })?;
            fs::copy(&cached, model_dir.join(file)).await.map_err(|e| {
                ScreenerError::ModelError(format!("Failed to copy {}: {}", file, e))
            })?;
            info!("Downloaded {}", file);
        }

        if let Err(e) = repo.get("README.md").await {
            warn!("Optional file README.md not found: {}", e);
        }

        self.downloaded_models.insert(model_info.id.to_string());
        Ok(model_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_manager_creation_scans_directory() {
        let temp_dir = TempDir::new().unwrap();

        let complete = temp_dir.path().join("potion-base-8M");
        std::fs::create_dir_all(&complete).unwrap();
        for file in REQUIRED_FILES {
            std::fs::write(complete.join(file), b"{}").unwrap();
        }

        let partial = temp_dir.path().join("m2v-base");
        std::fs::create_dir_all(&partial).unwrap();
        std::fs::write(partial.join("tokenizer.json"), b"{}").unwrap();

        let manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();
        assert!(manager.is_model_downloaded("potion-base-8M"));
        assert!(!manager.is_model_downloaded("m2v-base"));
    }

    #[tokio::test]
    async fn test_model_lookup() {
        let temp_dir = TempDir::new().unwrap();
        let manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();

        assert!(!manager.list_available_models().is_empty());
        assert_eq!(manager.get_model_info("minishlab/potion-base-8M").unwrap().id, "potion-base-8M");
        assert!(manager.get_model_info("no-such-model").is_none());
    }

    #[tokio::test]
    async fn test_unknown_model_download_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();

        let result = manager.download_model("no-such-model", false).await;
        assert!(matches!(result, Err(ScreenerError::ModelError(_))));
    }
}
