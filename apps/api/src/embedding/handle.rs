use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{error, info};

use super::{Embedder, EmbeddingError};

const PROBE_TEXT: &str = "test";

/// Shared access point to the embedding backend.
///
/// Built once by the orchestrator and passed by reference to every matcher
/// and calculator. The backend is probed on first use; the resulting health
/// flag is written exactly once (concurrent first callers wait on the same
/// probe) and only read afterwards.
pub struct ModelHandle {
    embedder: Option<Arc<dyn Embedder>>,
    healthy: OnceCell<bool>,
}

impl ModelHandle {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self {
            embedder: Some(embedder),
            healthy: OnceCell::new(),
        }
    }

    /// A handle with no backend. Reports unhealthy from the start, so every
    /// caller takes its fallback path.
    pub fn unavailable() -> Self {
        Self {
            embedder: None,
            healthy: OnceCell::new_with(Some(false)),
        }
    }

    /// Runs the health probe if it has not run yet and returns the flag.
    pub async fn ensure_loaded(&self) -> bool {
        *self
            .healthy
            .get_or_init(|| async {
                let Some(embedder) = &self.embedder else {
                    return false;
                };
                match embedder.embed(&[PROBE_TEXT.to_string()]).await {
                    Ok(vectors) if vectors.first().is_some_and(|v| !v.is_empty()) => {
                        info!("Embedding backend ready: {}", embedder.name());
                        true
                    }
                    Ok(_) => {
                        error!(
                            "Embedding backend {} returned an empty probe vector",
                            embedder.name()
                        );
                        false
                    }
                    Err(e) => {
                        error!("Failed to load embedding backend {}: {e}", embedder.name());
                        false
                    }
                }
            })
            .await
    }

    /// Health flag without triggering the probe. `false` until loaded.
    pub fn is_healthy(&self) -> bool {
        self.healthy.get().copied().unwrap_or(false)
    }

    pub fn backend_name(&self) -> &str {
        self.embedder.as_deref().map(|e| e.name()).unwrap_or("none")
    }

    /// Encodes `texts` in one backend call. Refuses when the handle is
    /// unhealthy, and checks the backend returned one equal-width vector per
    /// input.
    pub async fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if !self.ensure_loaded().await {
            return Err(EmbeddingError::Unavailable(format!(
                "backend '{}' failed its health check",
                self.backend_name()
            )));
        }
        let embedder = self
            .embedder
            .as_deref()
            .ok_or_else(|| EmbeddingError::Unavailable("no backend configured".to_string()))?;

        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let vectors = embedder.embed(texts).await?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            });
        }
        if let Some(first) = vectors.first() {
            if let Some(bad) = vectors.iter().find(|v| v.len() != first.len()) {
                return Err(EmbeddingError::DimensionMismatch {
                    expected: first.len(),
                    actual: bad.len(),
                });
            }
        }
        Ok(vectors)
    }
}
