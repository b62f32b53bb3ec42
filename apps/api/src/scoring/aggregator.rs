//! Combines calculator outputs into the final ATS score.

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::matching::MatchResult;
use crate::scoring::semantic::SimilarityTier;
use crate::scoring::{ScoringError, SubScore};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreWeights {
    pub semantic_match: f64,
    pub skill_match: f64,
    pub experience_match: f64,
    pub achievements: f64,
    pub content_quality: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            semantic_match: 0.30,
            skill_match: 0.30,
            experience_match: 0.25,
            achievements: 0.10,
            content_quality: 0.05,
        }
    }
}

impl ScoreWeights {
    pub fn validate(&self) -> Result<(), ScoringError> {
        let all = [
            self.semantic_match,
            self.skill_match,
            self.experience_match,
            self.achievements,
            self.content_quality,
        ];
        if all.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(ScoringError::InvalidWeights(
                "weights must be finite and non-negative".to_string(),
            ));
        }
        let sum: f64 = all.iter().sum();
        if (sum - 1.0).abs() > 1e-6 {
            return Err(ScoringError::InvalidWeights(format!(
                "weights sum to {sum}, expected 1.0"
            )));
        }
        Ok(())
    }
}

/// Unrounded calculator outputs for one resume/job pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub semantic_match: SubScore,
    pub skill_match: SubScore,
    pub experience_match: SubScore,
    pub achievements: SubScore,
    pub content_quality: SubScore,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub semantic_match: u32,
    pub skill_match: u32,
    pub experience_match: u32,
    pub achievements: u32,
    pub content_quality: u32,
}

/// What went into a score besides the numbers themselves.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreContext {
    pub skills_matched: usize,
    pub skills_required: usize,
    pub skills_missing: usize,
    pub experience_entries: usize,
    pub projects_analyzed: usize,
    /// Set when the consistency floor raised the total.
    pub score_adjusted: bool,
    pub model_healthy: bool,
    pub semantic_tier: SimilarityTier,
}

impl ScoreContext {
    /// Fills the skill counts from a coverage result. With no job skills
    /// the gap lists the resume's skills as matched, so nothing counts.
    pub fn with_skill_counts(mut self, job_skill_count: usize, skill_gap: &MatchResult) -> Self {
        if job_skill_count == 0 {
            self.skills_required = 0;
            self.skills_matched = 0;
            self.skills_missing = 0;
        } else {
            self.skills_matched = skill_gap.matched.len();
            self.skills_missing = skill_gap.missing.len();
            self.skills_required = self.skills_matched + self.skills_missing;
        }
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoreResult {
    pub total_score: u32,
    pub breakdown: ScoreBreakdown,
    pub skill_gap: MatchResult,
    pub context: ScoreContext,
}

impl ScoreResult {
    /// All zeros with an empty skill gap.
    pub fn zeroed() -> Self {
        Self::default()
    }
}

/// Raises an implausibly low total when skill coverage is high.
/// Returns the adjusted total and whether it changed.
pub fn apply_consistency_floor(raw_total: f64, skill_match: f64) -> (f64, bool) {
    if skill_match >= 90.0 && raw_total < 70.0 {
        (70.0, true)
    } else if skill_match >= 80.0 && raw_total < 60.0 {
        (60.0, true)
    } else {
        (raw_total, false)
    }
}

fn finite(name: &'static str, score: SubScore) -> Result<f64, ScoringError> {
    let value = score.value();
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScoringError::NonFinite { name })
    }
}

pub fn try_aggregate(
    scores: &SubScores,
    weights: &ScoreWeights,
    skill_gap: MatchResult,
    mut context: ScoreContext,
) -> Result<ScoreResult, ScoringError> {
    weights.validate()?;

    let semantic = finite("semantic_match", scores.semantic_match)?;
    let skill = finite("skill_match", scores.skill_match)?;
    let experience = finite("experience_match", scores.experience_match)?;
    let achievements = finite("achievements", scores.achievements)?;
    let content = finite("content_quality", scores.content_quality)?;

    let raw = semantic * weights.semantic_match
        + skill * weights.skill_match
        + experience * weights.experience_match
        + achievements * weights.achievements
        + content * weights.content_quality;

    let (total, adjusted) = apply_consistency_floor(raw, skill);
    context.score_adjusted = adjusted;

    Ok(ScoreResult {
        total_score: total.clamp(0.0, 100.0).round() as u32,
        breakdown: ScoreBreakdown {
            semantic_match: scores.semantic_match.rounded(),
            skill_match: scores.skill_match.rounded(),
            experience_match: scores.experience_match.rounded(),
            achievements: scores.achievements.rounded(),
            content_quality: scores.content_quality.rounded(),
        },
        skill_gap,
        context,
    })
}

/// Weighted total with the consistency floor applied. Never fails: any
/// error is logged and replaced by a zeroed result.
pub fn aggregate(
    scores: &SubScores,
    weights: &ScoreWeights,
    skill_gap: MatchResult,
    context: ScoreContext,
) -> ScoreResult {
    match try_aggregate(scores, weights, skill_gap, context) {
        Ok(result) => result,
        Err(e) => {
            error!("Error calculating ATS score: {e}");
            ScoreResult::zeroed()
        }
    }
}
