// Top-level orchestration: runs the calculators for one resume/job pair and
// hands the results to the aggregator. Owns the ModelHandle for the process.

pub mod handlers;

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::{Id, JoinSet};
use tracing::{error, info};
use uuid::Uuid;

use crate::config::ScoringConfig;
use crate::embedding::ModelHandle;
use crate::matching::skills::extract_job_skills;
use crate::matching::SkillMatcher;
use crate::models::resume::{ResumeData, ScoredProject};
use crate::scoring::achievements::score_achievements;
use crate::scoring::aggregator::{aggregate, ScoreContext, ScoreResult, ScoreWeights, SubScores};
use crate::scoring::completeness::score_content_completeness;
use crate::scoring::experience::{experience_relevance, rate_skill_levels, SkillLevel};
use crate::scoring::projects::score_project_relevance;
use crate::scoring::role::{industry_fit, role_suitability, seniority_level, SeniorityLevel};
use crate::scoring::semantic::{semantic_document_score, SimilarityTier};
use crate::scoring::SubScore;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ats_score: ScoreResult,
    pub skill_levels: BTreeMap<String, SkillLevel>,
    pub projects: Vec<ScoredProject>,
    pub role_suitability: BTreeMap<String, SubScore>,
    pub industry_fit: SubScore,
    pub seniority_level: SeniorityLevel,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchResumeInput {
    pub label: String,
    pub resume: ResumeData,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchScores {
    pub total: u32,
    pub skills: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchItem {
    pub label: String,
    pub rank: usize,
    pub scores: BatchScores,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalysisResponse {
    pub batch_id: Uuid,
    pub processed_count: usize,
    pub results: Vec<BatchItem>,
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Drains a batch of scoring tasks. A task that panicked or was cancelled
/// still yields an entry for its label, with a zeroed score.
async fn collect_batch(
    batch_id: Uuid,
    mut set: JoinSet<(String, ScoreResult)>,
    mut labels: HashMap<Id, String>,
) -> Vec<(String, ScoreResult)> {
    let mut scored = Vec::with_capacity(labels.len());
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(item) => scored.push(item),
            Err(e) => {
                let label = labels.remove(&e.id()).unwrap_or_default();
                error!("Batch {batch_id}: scoring task for '{label}' failed: {e}");
                scored.push((label, ScoreResult::zeroed()));
            }
        }
    }
    scored
}

pub struct AtsScorer {
    model: ModelHandle,
    matcher: SkillMatcher,
    weights: ScoreWeights,
    similarity_tiers: Vec<SimilarityTier>,
}

impl AtsScorer {
    pub fn new(model: ModelHandle, config: ScoringConfig) -> Self {
        Self {
            model,
            matcher: SkillMatcher::new(config.matcher),
            weights: config.weights,
            similarity_tiers: config.similarity_tiers,
        }
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// Scores one resume against a job description. Always returns a
    /// well-formed result; failures degrade sub-scores or zero the total.
    pub async fn score(&self, resume: &ResumeData, jd_text: &str) -> ScoreResult {
        let job_skills = extract_job_skills(jd_text);

        let (skill_gap, document, experience) = tokio::join!(
            self.matcher
                .match_skills(&self.model, &resume.skills, &job_skills),
            semantic_document_score(
                &self.model,
                &resume.full_text,
                jd_text,
                &self.similarity_tiers
            ),
            experience_relevance(&self.model, &resume.experience, jd_text),
        );
        let achievements = score_achievements(&resume.full_text);
        let content_quality = score_content_completeness(&resume.full_text);

        let scores = SubScores {
            semantic_match: document.score,
            skill_match: SubScore::new(skill_gap.match_percent),
            experience_match: experience,
            achievements,
            content_quality,
        };
        let context = ScoreContext {
            experience_entries: resume.experience.len(),
            projects_analyzed: resume.projects.len(),
            model_healthy: self.model.is_healthy(),
            semantic_tier: document.tier,
            ..ScoreContext::default()
        }
        .with_skill_counts(job_skills.len(), &skill_gap);

        aggregate(&scores, &self.weights, skill_gap, context)
    }

    pub fn rate_skill_levels(&self, resume: &ResumeData) -> BTreeMap<String, SkillLevel> {
        rate_skill_levels(resume, today())
    }

    pub async fn score_project_relevance(
        &self,
        resume: &ResumeData,
        jd_text: &str,
    ) -> Vec<ScoredProject> {
        score_project_relevance(&self.model, &resume.projects, jd_text).await
    }

    /// Score plus the secondary views: skill levels, ranked projects and
    /// role signals.
    pub async fn analyze(&self, resume: &ResumeData, jd_text: &str) -> AnalysisReport {
        let (ats_score, projects) = tokio::join!(
            self.score(resume, jd_text),
            self.score_project_relevance(resume, jd_text),
        );
        let today = today();

        AnalysisReport {
            ats_score,
            skill_levels: rate_skill_levels(resume, today),
            projects,
            role_suitability: role_suitability(resume),
            industry_fit: industry_fit(resume, jd_text),
            seniority_level: seniority_level(resume, today),
        }
    }

    /// Scores many resumes against one job description concurrently and
    /// ranks them by total score, then label.
    pub async fn analyze_batch(
        self: &Arc<Self>,
        inputs: Vec<BatchResumeInput>,
        jd_text: &str,
    ) -> BatchAnalysisResponse {
        let batch_id = Uuid::new_v4();
        let jd: Arc<str> = Arc::from(jd_text);

        let mut set = JoinSet::new();
        let mut labels = HashMap::new();
        for input in inputs {
            let scorer = Arc::clone(self);
            let jd = Arc::clone(&jd);
            let label = input.label.clone();
            let handle = set.spawn(async move {
                let result = scorer.score(&input.resume, &jd).await;
                (input.label, result)
            });
            labels.insert(handle.id(), label);
        }

        let mut scored = collect_batch(batch_id, set, labels).await;

        scored.sort_by(|(la, a), (lb, b)| {
            b.total_score
                .cmp(&a.total_score)
                .then_with(|| la.cmp(lb))
        });

        let results: Vec<BatchItem> = scored
            .into_iter()
            .enumerate()
            .map(|(i, (label, result))| BatchItem {
                label,
                rank: i + 1,
                scores: BatchScores {
                    total: result.total_score,
                    skills: result.breakdown.skill_match,
                },
                missing_skills: result.skill_gap.missing,
            })
            .collect();

        info!("Batch {batch_id}: ranked {} resumes", results.len());

        BatchAnalysisResponse {
            batch_id,
            processed_count: results.len(),
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::testing::stub_handle;
    use crate::matching::MatcherConfig;
    use crate::models::resume::{ExperienceEntry, ProjectEntry};

    const JD: &str = "We are hiring a backend engineer with Python, AWS and Docker \
        experience to build data services.";

    fn offline_scorer() -> AtsScorer {
        AtsScorer::new(ModelHandle::unavailable(), ScoringConfig::default())
    }

    fn resume(skills: &[&str], text: &str) -> ResumeData {
        ResumeData {
            skills: skills.iter().map(|s| s.to_string()).collect(),
            full_text: text.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_score_skill_gap_end_to_end() {
        let scorer = AtsScorer::new(
            ModelHandle::unavailable(),
            ScoringConfig {
                matcher: MatcherConfig {
                    fuzzy_enabled: false,
                    semantic_enabled: false,
                    ..MatcherConfig::default()
                },
                ..ScoringConfig::default()
            },
        );
        let result = scorer
            .score(&resume(&["python", "Kubernetes"], "Python developer"), JD)
            .await;

        assert_eq!(result.skill_gap.matched, vec!["Python"]);
        assert_eq!(result.skill_gap.missing, vec!["AWS", "Docker"]);
        assert_eq!(result.breakdown.skill_match, 33);
        assert_eq!(result.context.skills_required, 3);
        assert!(!result.context.model_healthy);
        assert_eq!(result.context.semantic_tier, SimilarityTier::TfIdf);
        assert!(result.total_score <= 100);
    }

    #[tokio::test]
    async fn test_score_job_without_known_skills_requires_none() {
        let jd = "Friendly team seeking a curious colleague who enjoys learning new things.";
        let result = offline_scorer()
            .score(&resume(&["Python", "Rust", "Go"], "Python, Rust and Go"), jd)
            .await;

        assert_eq!(result.skill_gap.match_percent, 100.0);
        assert_eq!(result.context.skills_required, 0);
        assert_eq!(result.context.skills_matched, 0);
        assert_eq!(result.context.skills_missing, 0);
    }

    #[tokio::test]
    async fn test_score_empty_resume_is_well_formed() {
        let result = offline_scorer().score(&ResumeData::default(), JD).await;
        assert_eq!(result.breakdown.skill_match, 0);
        assert_eq!(result.breakdown.achievements, 30);
        // no experience entries
        assert_eq!(result.breakdown.experience_match, 30);
        // empty resume text leaves TF-IDF a JD-only vocabulary: zero overlap
        assert_eq!(result.breakdown.semantic_match, 0);
    }

    #[tokio::test]
    async fn test_score_with_model_uses_embedding_tier() {
        let scorer = AtsScorer::new(stub_handle(), ScoringConfig::default());
        let result = scorer
            .score(&resume(&["Python", "AWS", "Docker"], JD), JD)
            .await;
        assert!(result.context.model_healthy);
        assert_eq!(result.context.semantic_tier, SimilarityTier::Embedding);
        assert_eq!(result.breakdown.semantic_match, 100);
        assert_eq!(result.breakdown.skill_match, 100);
        assert!(result.total_score >= 70);
    }

    #[tokio::test]
    async fn test_analyze_builds_full_report() {
        let scorer = AtsScorer::new(stub_handle(), ScoringConfig::default());
        let data = ResumeData {
            skills: vec!["Python".into()],
            experience: vec![ExperienceEntry {
                title: "Backend engineer".into(),
                description: "Python services on AWS".into(),
                start_date: Some("2020-01-01".into()),
                end_date: Some("Present".into()),
                technologies: vec!["Python".into()],
                ..Default::default()
            }],
            projects: vec![
                ProjectEntry {
                    title: "Garden planner".into(),
                    description: "plants".into(),
                    technologies: vec![],
                },
                ProjectEntry {
                    title: "Docker data services".into(),
                    description: "Python backend on AWS".into(),
                    technologies: vec!["Python".into()],
                },
            ],
            full_text: "Backend engineer. Python, AWS, Docker.".into(),
        };

        let report = scorer.analyze(&data, JD).await;
        assert_eq!(report.projects[0].project.title, "Docker data services");
        assert_eq!(report.skill_levels["Python"], SkillLevel::Expert);
        assert_eq!(report.industry_fit.value(), 100.0);
        assert_eq!(report.role_suitability.len(), 6);
    }

    #[tokio::test]
    async fn test_failed_batch_task_still_reported() {
        let mut set = JoinSet::new();
        let mut labels = HashMap::new();
        let ok = set.spawn(async {
            let mut result = ScoreResult::zeroed();
            result.total_score = 80;
            ("good".to_string(), result)
        });
        labels.insert(ok.id(), "good".to_string());
        let bad = set.spawn(async {
            if true {
                panic!("scoring blew up");
            }
            (String::new(), ScoreResult::zeroed())
        });
        labels.insert(bad.id(), "broken".to_string());

        let mut scored = collect_batch(Uuid::new_v4(), set, labels).await;
        scored.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(scored.len(), 2);
        assert_eq!(scored[0].0, "broken");
        assert_eq!(scored[0].1, ScoreResult::zeroed());
        assert_eq!(scored[1].0, "good");
        assert_eq!(scored[1].1.total_score, 80);
    }

    #[tokio::test]
    async fn test_batch_ranks_by_total_then_label() {
        let scorer = Arc::new(offline_scorer());
        let strong = "Python AWS Docker backend engineer building data services";
        let inputs = vec![
            BatchResumeInput {
                label: "weak".into(),
                resume: resume(&[], "Florist"),
            },
            BatchResumeInput {
                label: "b-strong".into(),
                resume: resume(&["Python", "AWS", "Docker"], strong),
            },
            BatchResumeInput {
                label: "a-strong".into(),
                resume: resume(&["Python", "AWS", "Docker"], strong),
            },
        ];

        let response = scorer.analyze_batch(inputs, JD).await;
        assert_eq!(response.processed_count, 3);
        let labels: Vec<&str> = response.results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["a-strong", "b-strong", "weak"]);
        assert_eq!(response.results[0].rank, 1);
        assert_eq!(response.results[2].rank, 3);
        assert_eq!(
            response.results[2].missing_skills,
            vec!["AWS", "Docker", "Python"]
        );
    }
}
