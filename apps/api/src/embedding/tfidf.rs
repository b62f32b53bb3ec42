//! TF-IDF cosine similarity between two documents.
//!
//! Statistical stand-in for embedding similarity when no model is
//! available. The corpus is exactly the two documents being compared.

use std::collections::{BTreeMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use super::EmbeddingError;

/// Runs of two or more word characters.
static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TOKEN_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Term frequencies weighted by smoothed idf `ln((1 + n) / (1 + df)) + 1`,
/// L2-normalized per document.
fn tfidf_vectors(docs: &[&str]) -> Result<Vec<BTreeMap<String, f64>>, EmbeddingError> {
    let tokenized: Vec<Vec<String>> = docs.iter().map(|d| tokenize(d)).collect();

    let mut doc_freq: BTreeMap<&str, usize> = BTreeMap::new();
    for tokens in &tokenized {
        let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for term in unique {
            *doc_freq.entry(term).or_default() += 1;
        }
    }
    if doc_freq.is_empty() {
        return Err(EmbeddingError::EmptyVocabulary);
    }

    let n = docs.len() as f64;
    let vectors = tokenized
        .iter()
        .map(|tokens| {
            let mut weights: BTreeMap<String, f64> = BTreeMap::new();
            for tok in tokens {
                *weights.entry(tok.clone()).or_default() += 1.0;
            }
            for (term, w) in weights.iter_mut() {
                let df = doc_freq.get(term.as_str()).copied().unwrap_or(0) as f64;
                *w *= ((1.0 + n) / (1.0 + df)).ln() + 1.0;
            }
            let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
            if norm > f64::EPSILON {
                for w in weights.values_mut() {
                    *w /= norm;
                }
            }
            weights
        })
        .collect();

    Ok(vectors)
}

/// Cosine similarity of the two documents' TF-IDF vectors, in `[0, 1]`.
/// Errors when neither document has a single token.
pub fn tfidf_cosine(a: &str, b: &str) -> Result<f64, EmbeddingError> {
    let vectors = tfidf_vectors(&[a, b])?;
    let (va, vb) = (&vectors[0], &vectors[1]);
    let dot = va
        .iter()
        .filter_map(|(term, wa)| vb.get(term).map(|wb| wa * wb))
        .sum::<f64>();
    Ok(dot.clamp(0.0, 1.0))
}
