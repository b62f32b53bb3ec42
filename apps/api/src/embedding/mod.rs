//! Embedding access for the matchers and sub-score calculators.
//!
//! All embedding calls go through a [`ModelHandle`], which owns the backend
//! and its one-time health probe. Nothing else talks to the backend directly.

use async_trait::async_trait;
use thiserror::Error;

pub mod handle;
pub mod http;
pub mod tfidf;

#[cfg(test)]
pub mod testing;

pub use handle::ModelHandle;
pub use http::HttpEmbedder;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Embedding model unavailable: {0}")]
    Unavailable(String),

    #[error("Expected {expected} embeddings, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Embedding dimensions disagree: {expected} vs {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("No terms to vectorize")]
    EmptyVocabulary,
}

/// A text embedding backend. Implementations must return one vector per
/// input text, in input order.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError>;

    /// Human-readable backend name, used in logs and the health endpoint.
    fn name(&self) -> &str;
}

/// Cosine similarity in `[-1, 1]`. Zero-norm or mismatched vectors give 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a <= f32::EPSILON || norm_b <= f32::EPSILON {
        return 0.0;
    }
    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}
