use tracing::warn;

use crate::embedding::{cosine_similarity, ModelHandle};
use crate::models::resume::{ProjectEntry, ScoredProject};

fn unscored(projects: &[ProjectEntry]) -> Vec<ScoredProject> {
    projects.iter().cloned().map(ScoredProject::from).collect()
}

/// Attaches a signed relevance score (-100 to 100) to every project and
/// orders them by it, most relevant first. Equal scores keep their resume
/// order.
///
/// Without a working model the projects come back unscored in their
/// original order.
pub async fn score_project_relevance(
    model: &ModelHandle,
    projects: &[ProjectEntry],
    jd_text: &str,
) -> Vec<ScoredProject> {
    if projects.is_empty() {
        return Vec::new();
    }
    if !model.ensure_loaded().await {
        warn!("Model unavailable. Returning projects unscored.");
        return unscored(projects);
    }

    let texts: Vec<String> = std::iter::once(jd_text.to_string())
        .chain(projects.iter().map(ProjectEntry::embedding_text))
        .collect();
    let vectors = match model.encode(&texts).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Project relevance scoring failed: {e}");
            return unscored(projects);
        }
    };

    let jd = &vectors[0];
    let mut scored: Vec<ScoredProject> = projects
        .iter()
        .zip(&vectors[1..])
        .map(|(project, v)| {
            let relevance = (cosine_similarity(jd, v) as f64 * 100.0).round();
            ScoredProject {
                project: project.clone(),
                relevance_score: Some(relevance as i32),
            }
        })
        .collect();

    scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    scored
}
