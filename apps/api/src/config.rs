use std::str::FromStr;

use anyhow::{Context, Result};

use crate::matching::MatcherConfig;
use crate::scoring::aggregator::ScoreWeights;
use crate::scoring::semantic::{SimilarityTier, DEFAULT_TIERS};

/// Application configuration loaded from environment variables.
/// Everything has a default; a present but malformed value is an error.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base URL of the embedding service. Unset means no model: every
    /// calculator runs on its fallback.
    pub embedding_url: Option<String>,
    pub embedding_model: String,
    pub embedding_api_key: Option<String>,
    pub fuzzy_skill_match_threshold: f64,
    pub semantic_skill_match_threshold: f32,
    pub max_skills_to_match: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            embedding_url: optional_env("EMBEDDING_URL"),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or_else(|_| "all-MiniLM-L6-v2".to_string()),
            embedding_api_key: optional_env("EMBEDDING_API_KEY"),
            fuzzy_skill_match_threshold: parse_env("FUZZY_SKILL_MATCH_THRESHOLD", 85.0)?,
            semantic_skill_match_threshold: parse_env("SEMANTIC_SKILL_MATCH_THRESHOLD", 0.70)?,
            max_skills_to_match: parse_env("MAX_SKILLS_TO_MATCH", 50)?,
        })
    }

    pub fn scoring(&self) -> ScoringConfig {
        ScoringConfig {
            matcher: MatcherConfig {
                fuzzy_threshold: self.fuzzy_skill_match_threshold,
                semantic_threshold: self.semantic_skill_match_threshold,
                max_skills_to_match: self.max_skills_to_match,
                ..MatcherConfig::default()
            },
            ..ScoringConfig::default()
        }
    }
}

/// Tunables for one scorer instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub matcher: MatcherConfig,
    pub weights: ScoreWeights,
    /// Document similarity strategies, tried in order.
    pub similarity_tiers: Vec<SimilarityTier>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            matcher: MatcherConfig::default(),
            weights: ScoreWeights::default(),
            similarity_tiers: DEFAULT_TIERS.to_vec(),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
