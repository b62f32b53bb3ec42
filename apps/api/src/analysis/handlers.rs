//! Axum route handlers for the Analysis API.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::analysis::{AnalysisReport, BatchAnalysisResponse, BatchResumeInput};
use crate::errors::AppError;
use crate::models::resume::{ResumeData, ScoredProject};
use crate::scoring::aggregator::ScoreResult;
use crate::scoring::experience::SkillLevel;
use crate::state::AppState;

pub const MIN_JD_CHARS: usize = 50;
pub const MAX_BATCH_SIZE: usize = 50;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub resume: ResumeData,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct SkillLevelsRequest {
    pub resume: ResumeData,
}

#[derive(Debug, Deserialize)]
pub struct BatchAnalyzeRequest {
    pub resumes: Vec<BatchResumeInput>,
    pub job_description: String,
}

fn validate_job_description(jd: &str) -> Result<(), AppError> {
    if jd.trim().chars().count() < MIN_JD_CHARS {
        return Err(AppError::Validation(format!(
            "job_description must be at least {MIN_JD_CHARS} characters"
        )));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/analyze
///
/// Full report: ATS score, skill levels, ranked projects and role signals.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisReport>, AppError> {
    validate_job_description(&request.job_description)?;
    let report = state
        .scorer
        .analyze(&request.resume, &request.job_description)
        .await;
    Ok(Json(report))
}

/// POST /api/v1/score
pub async fn handle_score(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<ScoreResult>, AppError> {
    validate_job_description(&request.job_description)?;
    let result = state
        .scorer
        .score(&request.resume, &request.job_description)
        .await;
    Ok(Json(result))
}

/// POST /api/v1/analyze/batch
///
/// Ranks up to 50 resumes against one job description.
pub async fn handle_analyze_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchAnalyzeRequest>,
) -> Result<Json<BatchAnalysisResponse>, AppError> {
    validate_job_description(&request.job_description)?;
    if request.resumes.is_empty() {
        return Err(AppError::Validation("resumes cannot be empty".to_string()));
    }
    if request.resumes.len() > MAX_BATCH_SIZE {
        return Err(AppError::Validation(format!(
            "at most {MAX_BATCH_SIZE} resumes per batch"
        )));
    }

    let response = state
        .scorer
        .analyze_batch(request.resumes, &request.job_description)
        .await;
    Ok(Json(response))
}

/// POST /api/v1/skills/levels
pub async fn handle_skill_levels(
    State(state): State<AppState>,
    Json(request): Json<SkillLevelsRequest>,
) -> Json<BTreeMap<String, SkillLevel>> {
    Json(state.scorer.rate_skill_levels(&request.resume))
}

/// POST /api/v1/projects/relevance
pub async fn handle_project_relevance(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<Vec<ScoredProject>>, AppError> {
    validate_job_description(&request.job_description)?;
    let projects = state
        .scorer
        .score_project_relevance(&request.resume, &request.job_description)
        .await;
    Ok(Json(projects))
}
