//! Whole-document similarity between resume and job description.
//!
//! Tiers are tried in the order given; the first that yields a number
//! wins. The default order is embedding, then TF-IDF, then a neutral 50.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::embedding::{cosine_similarity, tfidf::tfidf_cosine, ModelHandle};
use crate::scoring::SubScore;

pub const NEUTRAL_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityTier {
    Embedding,
    TfIdf,
    #[default]
    Neutral,
}

pub const DEFAULT_TIERS: &[SimilarityTier] = &[
    SimilarityTier::Embedding,
    SimilarityTier::TfIdf,
    SimilarityTier::Neutral,
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentSimilarity {
    pub score: SubScore,
    pub tier: SimilarityTier,
}

async fn try_tier(
    tier: SimilarityTier,
    model: &ModelHandle,
    resume_text: &str,
    jd_text: &str,
) -> Option<f64> {
    match tier {
        SimilarityTier::Embedding => {
            if !model.ensure_loaded().await {
                warn!("Model unavailable. Skipping embedding tier for semantic match.");
                return None;
            }
            let texts = [resume_text.to_string(), jd_text.to_string()];
            match model.encode(&texts).await {
                Ok(v) => Some(cosine_similarity(&v[0], &v[1]) as f64 * 100.0),
                Err(e) => {
                    warn!("Embedding tier failed for semantic match: {e}");
                    None
                }
            }
        }
        SimilarityTier::TfIdf => match tfidf_cosine(resume_text, jd_text) {
            Ok(sim) => Some(sim * 100.0),
            Err(e) => {
                warn!("TF-IDF tier failed for semantic match: {e}");
                None
            }
        },
        SimilarityTier::Neutral => Some(NEUTRAL_SCORE),
    }
}

/// Scores resume/job similarity using the first tier in `tiers` that
/// succeeds. An empty or fully failing chain yields the neutral score.
pub async fn semantic_document_score(
    model: &ModelHandle,
    resume_text: &str,
    jd_text: &str,
    tiers: &[SimilarityTier],
) -> DocumentSimilarity {
    for &tier in tiers {
        if let Some(score) = try_tier(tier, model, resume_text, jd_text).await {
            if score.is_finite() {
                return DocumentSimilarity {
                    score: SubScore::new(score),
                    tier,
                };
            }
        }
    }
    DocumentSimilarity {
        score: SubScore::new(NEUTRAL_SCORE),
        tier: SimilarityTier::Neutral,
    }
}
