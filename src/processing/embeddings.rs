//! Text embeddings and cosine similarity scoring

use crate::config::{EmbeddingBackend, EmbeddingConfig};
use crate::error::{Result, ScreenerError};
use crate::processing::extraction::SkillTokenizer;
use log::{info, warn};
use model2vec_rs::model::StaticModel;
use std::path::Path;
use std::time::Instant;

/// Anything that turns text into a fixed-length vector
pub trait Embedder {
    fn name(&self) -> &str;
    fn dimensions(&self) -> usize;
    fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Pretrained Model2Vec static embeddings
pub struct StaticEmbedder {
    model: StaticModel,
    model_name: String,
    dimensions: usize,
}

impl StaticEmbedder {
    pub fn load(model_path: &Path, model_name: &str) -> Result<Self> {
        // from_pretrained treats a missing path as a hub repo id; keep loading local
        if !model_path.exists() {
            return Err(ScreenerError::ModelError(format!(
                "Model '{}' is not downloaded ({}). Run: resume-screener models download {}",
                model_name,
                model_path.display(),
                model_name
            )));
        }

        let start_time = Instant::now();
        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )?;

        let dimensions = model.encode_single("dimension check").len();
        info!("Model loaded successfully in {:.2?}", start_time.elapsed());

        Ok(Self {
            model,
            model_name: model_name.to_string(),
            dimensions,
        })
    }
}

impl Embedder for StaticEmbedder {
    fn name(&self) -> &str {
        &self.model_name
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.model.encode_single(text))
    }
}

/// Bag-of-tokens vector built by feature hashing. Deterministic and needs
/// no model files, so it backs offline runs and tests.
pub struct HashingEmbedder {
    tokenizer: SkillTokenizer,
    dimensions: usize,
}

impl HashingEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            tokenizer: SkillTokenizer::new(),
            dimensions: dimensions.max(1),
        }
    }

    fn bucket(&self, token: &str) -> usize {
        // FNV-1a
        let mut hash: u64 = 0xcbf29ce484222325;
        for byte in token.as_bytes() {
            hash ^= u64::from(*byte);
            hash = hash.wrapping_mul(0x100000001b3);
        }
        (hash % self.dimensions as u64) as usize
    }
}

impl Embedder for HashingEmbedder {
    fn name(&self) -> &str {
        "hashing"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![0.0f32; self.dimensions];
        for token in self.tokenizer.tokenize(text) {
            vector[self.bucket(&token)] += 1.0;
        }
        Ok(vector)
    }
}

/// Build the embedder selected in the configuration.
///
/// When the pretrained model cannot be loaded and fallback is allowed, the
/// hashing embedder is used instead.
pub fn embedder_from_config(config: &EmbeddingConfig) -> Result<Box<dyn Embedder>> {
    match config.backend {
        EmbeddingBackend::Hashing => Ok(Box::new(HashingEmbedder::new(config.hashing_dimensions))),
        EmbeddingBackend::Model2vec => {
            let model_path = config.models_dir.join(&config.model);
            match StaticEmbedder::load(&model_path, &config.model) {
                Ok(embedder) => Ok(Box::new(embedder)),
                Err(e) if config.allow_fallback => {
                    warn!(
                        "Could not load embedding model '{}': {}. Falling back to hashing embeddings",
                        config.model, e
                    );
                    Ok(Box::new(HashingEmbedder::new(config.hashing_dimensions)))
                }
                Err(e) => Err(e),
            }
        }
    }
}

/// Calculate cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ScreenerError::Processing(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok((dot_product / (norm_a * norm_b)).clamp(-1.0, 1.0))
    }
}

/// Scale a cosine similarity to 0-100, rounded to two decimals
pub fn similarity_score(cosine: f32) -> f64 {
    (f64::from(cosine) * 100.0 * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 2.0, 3.0];
        assert!((cosine_similarity(&a, &a).unwrap() - 1.0).abs() < 1e-6);

        let b = vec![-1.0, -2.0, -3.0];
        assert!((cosine_similarity(&a, &b).unwrap() + 1.0).abs() < 1e-6);

        let orthogonal = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert_eq!(orthogonal, 0.0);
    }

    #[test]
    fn test_cosine_similarity_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[], &[]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]).unwrap(), 0.0);
        assert!(matches!(
            cosine_similarity(&[1.0], &[1.0, 2.0]),
            Err(ScreenerError::Processing(_))
        ));
    }

    #[test]
    fn test_similarity_score_rounding() {
        assert_eq!(similarity_score(1.0), 100.0);
        assert_eq!(similarity_score(0.0), 0.0);
        assert_eq!(similarity_score(0.123456), 12.35);
        assert_eq!(similarity_score(-0.5), -50.0);
    }

    #[test]
    fn test_hashing_embedder_is_deterministic() {
        let embedder = HashingEmbedder::new(64);
        let first = embedder.embed("Python SQL Docker").unwrap();
        let second = embedder.embed("Python SQL Docker").unwrap();

        assert_eq!(first.len(), 64);
        assert_eq!(first, second);
        assert_eq!(first.iter().sum::<f32>(), 3.0);
    }

    #[test]
    fn test_hashing_embedder_similarity_ordering() {
        let embedder = HashingEmbedder::new(256);
        let job = embedder.embed("Python Django Flask SQL APIs").unwrap();
        let close = embedder.embed("Python developer, Django and Flask, SQL").unwrap();
        let far = embedder.embed("Watercolor painting and pottery").unwrap();

        let close_score = cosine_similarity(&job, &close).unwrap();
        let far_score = cosine_similarity(&job, &far).unwrap();
        assert!(close_score > far_score);
    }

    #[test]
    fn test_fallback_when_model_missing() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut config = crate::config::Config::default().embedding;
        config.models_dir = temp_dir.path().to_path_buf();
        config.hashing_dimensions = 32;

        let embedder = embedder_from_config(&config).unwrap();
        assert_eq!(embedder.name(), "hashing");
        assert_eq!(embedder.dimensions(), 32);

        config.allow_fallback = false;
        assert!(embedder_from_config(&config).is_err());
    }
}
