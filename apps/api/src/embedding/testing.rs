//! Embedder doubles for unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use super::{Embedder, EmbeddingError, ModelHandle};

const DIMS: usize = 1024;

/// Deterministic bag-of-words embedder. Words listed as synonyms share a
/// bucket, so e.g. "k8s" and "kubernetes" embed identically.
pub struct StubEmbedder {
    synonyms: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new() -> Self {
        Self {
            synonyms: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with_synonym(mut self, word: &str, canonical: &str) -> Self {
        self.synonyms
            .insert(word.to_lowercase(), canonical.to_lowercase());
        self
    }

    /// Number of `embed` calls so far, including the health probe.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; DIMS];
        for word in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            let word = word.to_lowercase();
            let canonical = self.synonyms.get(&word).unwrap_or(&word);
            v[bucket(canonical)] += 1.0;
        }
        v
    }
}

fn bucket(term: &str) -> usize {
    let mut h: u64 = 0xcbf29ce484222325;
    for b in term.as_bytes() {
        h ^= *b as u64;
        h = h.wrapping_mul(0x100000001b3);
    }
    (h as usize) % DIMS
}

#[async_trait]
impl Embedder for StubEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|t| self.vector(t)).collect())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

/// Passes the health probe, then fails every later call.
pub struct FlakyEmbedder {
    calls: AtomicUsize,
}

impl FlakyEmbedder {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Embedder for FlakyEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            return Ok(texts.iter().map(|_| vec![1.0; 4]).collect());
        }
        Err(EmbeddingError::Api {
            status: 500,
            message: "mock failure".to_string(),
        })
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

/// Fails every call, including the probe.
pub struct FailingEmbedder;

#[async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        Err(EmbeddingError::Unavailable("mock failure".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

pub fn stub_handle() -> ModelHandle {
    ModelHandle::new(Arc::new(StubEmbedder::new()))
}
