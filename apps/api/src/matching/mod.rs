//! Skill coverage engine.
//!
//! Reconciles job-required skills against resume-claimed skills through
//! three stages of increasing cost: exact (normalized) equality, fuzzy
//! token-set similarity, then embedding similarity. Each stage only sees
//! what the previous one left unmatched.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::embedding::ModelHandle;

pub mod exact;
pub mod fuzzy;
pub mod semantic;
pub mod skills;

pub use exact::normalize;

/// Coverage of job skills by resume skills.
///
/// `matched` and `missing` hold original-cased job labels, sorted, and
/// partition the (deduplicated) job skills.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub match_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatcherConfig {
    pub fuzzy_enabled: bool,
    /// 0–100 token-set similarity.
    pub fuzzy_threshold: f64,
    pub semantic_enabled: bool,
    /// Cosine similarity.
    pub semantic_threshold: f32,
    /// Per-side cap on skills sent to the embedding backend.
    pub max_skills_to_match: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            fuzzy_enabled: true,
            fuzzy_threshold: 85.0,
            semantic_enabled: true,
            semantic_threshold: 0.70,
            max_skills_to_match: 50,
        }
    }
}

/// Deduplicates labels by normalized key, keeping the first spelling seen.
/// Blank labels are dropped.
fn dedup_labels(labels: &[String]) -> Vec<(String, String)> {
    let mut seen = HashSet::new();
    labels
        .iter()
        .filter_map(|label| {
            let key = normalize(label);
            if key.is_empty() || !seen.insert(key.clone()) {
                return None;
            }
            Some((key, label.trim().to_string()))
        })
        .collect()
}

pub struct SkillMatcher {
    config: MatcherConfig,
}

impl SkillMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub async fn match_skills(
        &self,
        model: &ModelHandle,
        resume_skills: &[String],
        job_skills: &[String],
    ) -> MatchResult {
        let jobs = dedup_labels(job_skills);
        let resume = dedup_labels(resume_skills);

        if jobs.is_empty() {
            let mut matched: Vec<String> = resume.into_iter().map(|(_, label)| label).collect();
            matched.sort();
            return MatchResult {
                matched,
                missing: Vec::new(),
                match_percent: 100.0,
            };
        }
        if resume.is_empty() {
            let mut missing: Vec<String> = jobs.into_iter().map(|(_, label)| label).collect();
            missing.sort();
            return MatchResult {
                matched: Vec::new(),
                missing,
                match_percent: 0.0,
            };
        }

        let job_keys: Vec<String> = jobs.iter().map(|(k, _)| k.clone()).collect();
        let resume_keys: HashSet<String> = resume.iter().map(|(k, _)| k.clone()).collect();

        let mut matched_keys = exact::match_exact(&job_keys, &resume_keys);
        let exact_count = matched_keys.len();

        let mut remaining_jobs: Vec<String> = job_keys
            .iter()
            .filter(|k| !matched_keys.contains(*k))
            .cloned()
            .collect();
        let mut remaining_resume: Vec<String> = resume
            .iter()
            .map(|(k, _)| k.clone())
            .filter(|k| !matched_keys.contains(k))
            .collect();
        remaining_jobs.sort();
        remaining_resume.sort();

        let mut fuzzy_count = 0;
        if self.config.fuzzy_enabled && !remaining_jobs.is_empty() {
            let fuzzy = fuzzy::match_fuzzy(
                &remaining_jobs,
                &mut remaining_resume,
                self.config.fuzzy_threshold,
            );
            fuzzy_count = fuzzy.len();
            let fuzzy: HashSet<String> = fuzzy.into_iter().collect();
            remaining_jobs.retain(|k| !fuzzy.contains(k));
            matched_keys.extend(fuzzy);
        }

        let mut semantic_count = 0;
        if self.config.semantic_enabled && !remaining_jobs.is_empty() {
            if model.ensure_loaded().await {
                match semantic::match_semantic(
                    model,
                    &remaining_jobs,
                    &remaining_resume,
                    self.config.semantic_threshold,
                    self.config.max_skills_to_match,
                )
                .await
                {
                    Ok(found) => {
                        semantic_count = found.len();
                        matched_keys.extend(found);
                    }
                    Err(e) => warn!("Semantic skill matching skipped: {e}"),
                }
            } else {
                debug!("Semantic skill matching skipped: model unavailable");
            }
        }

        debug!(
            "Skill match stages: exact={exact_count}, fuzzy={fuzzy_count}, semantic={semantic_count}, jobs={}",
            jobs.len()
        );

        let total = jobs.len();
        let mut matched = Vec::new();
        let mut missing = Vec::new();
        for (key, label) in jobs {
            if matched_keys.contains(&key) {
                matched.push(label);
            } else {
                missing.push(label);
            }
        }
        matched.sort();
        missing.sort();

        let match_percent = matched.len() as f64 * 100.0 / total as f64;
        MatchResult {
            matched,
            missing,
            match_percent,
        }
    }
}
