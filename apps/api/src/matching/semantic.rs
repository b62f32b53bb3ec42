use tracing::debug;

use crate::embedding::{cosine_similarity, EmbeddingError, ModelHandle};

/// Embedding-based matching for skills the lexical and fuzzy stages left.
///
/// Both sides are truncated to `cap` entries and encoded in a single batch.
/// A job skill matches when its best cosine similarity against any resume
/// skill reaches `threshold`. Resume skills are not consumed here.
pub async fn match_semantic(
    model: &ModelHandle,
    job_keys: &[String],
    resume_keys: &[String],
    threshold: f32,
    cap: usize,
) -> Result<Vec<String>, EmbeddingError> {
    if job_keys.is_empty() || resume_keys.is_empty() || cap == 0 {
        return Ok(Vec::new());
    }

    let jobs = &job_keys[..job_keys.len().min(cap)];
    let resume = &resume_keys[..resume_keys.len().min(cap)];

    let mut texts = Vec::with_capacity(jobs.len() + resume.len());
    texts.extend_from_slice(jobs);
    texts.extend_from_slice(resume);

    let vectors = model.encode(&texts).await?;
    let (job_vectors, resume_vectors) = vectors.split_at(jobs.len());

    let mut matched = Vec::new();
    for (skill, job_vec) in jobs.iter().zip(job_vectors) {
        let best = resume_vectors
            .iter()
            .map(|rv| cosine_similarity(job_vec, rv))
            .fold(f32::NEG_INFINITY, f32::max);
        if best >= threshold {
            debug!("Semantic match: '{skill}' (cos={best:.3})");
            matched.push(skill.clone());
        }
    }
    Ok(matched)
}
