use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::embedding::{cosine_similarity, ModelHandle};
use crate::models::resume::{ExperienceEntry, ResumeData};
use crate::scoring::SubScore;

pub const DEFAULT_EXPERIENCE_SCORE: f64 = 30.0;
pub const DEFAULT_DURATION_MONTHS: f64 = 6.0;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DAYS_PER_MONTH: f64 = 30.44;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub fn from_weight(weight: f64) -> Self {
        if weight >= 3.0 {
            Self::Expert
        } else if weight >= 1.5 {
            Self::Advanced
        } else if weight > 0.0 {
            Self::Intermediate
        } else {
            Self::Beginner
        }
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Length of a position in months, at least 1.
///
/// A missing or `Present` end date counts up to `today`. Any missing start
/// date or unparseable date gives 6 months.
pub fn duration_months(entry: &ExperienceEntry, today: NaiveDate) -> f64 {
    let Some(start) = entry.start_date.as_deref().and_then(parse_date) else {
        return DEFAULT_DURATION_MONTHS;
    };
    let end = match entry.end_date.as_deref().map(str::trim) {
        None | Some("") => today,
        Some(raw) if raw.eq_ignore_ascii_case("present") => today,
        Some(raw) => match parse_date(raw) {
            Some(d) => d,
            None => return DEFAULT_DURATION_MONTHS,
        },
    };
    let days = (end - start).num_days() as f64;
    (days / DAYS_PER_MONTH).max(1.0)
}

/// Maps every claimed skill to a proficiency level.
///
/// A skill's weight is the number of projects listing it plus the years
/// spent in each position listing it. Technology names are compared
/// case-insensitively.
pub fn rate_skill_levels(resume: &ResumeData, today: NaiveDate) -> BTreeMap<String, SkillLevel> {
    let mut weights: HashMap<String, f64> = resume
        .skills
        .iter()
        .map(|s| (s.trim().to_lowercase(), 0.0))
        .collect();

    for project in &resume.projects {
        for tech in &project.technologies {
            if let Some(w) = weights.get_mut(&tech.trim().to_lowercase()) {
                *w += 1.0;
            }
        }
    }

    for entry in &resume.experience {
        let years = duration_months(entry, today) / 12.0;
        for tech in &entry.technologies {
            if let Some(w) = weights.get_mut(&tech.trim().to_lowercase()) {
                *w += years;
            }
        }
    }

    resume
        .skills
        .iter()
        .map(|skill| {
            let weight = weights
                .get(&skill.trim().to_lowercase())
                .copied()
                .unwrap_or(0.0);
            (skill.clone(), SkillLevel::from_weight(weight))
        })
        .collect()
}

/// Best match between any single position and the job description.
///
/// Uses the maximum rather than the mean so one strongly relevant role is
/// not diluted by unrelated ones. All texts go out in one encode call.
pub async fn experience_relevance(
    model: &ModelHandle,
    entries: &[ExperienceEntry],
    jd_text: &str,
) -> SubScore {
    if entries.is_empty() {
        return SubScore::new(DEFAULT_EXPERIENCE_SCORE);
    }
    if !model.ensure_loaded().await {
        warn!("Model unavailable. Using default experience relevance.");
        return SubScore::new(DEFAULT_EXPERIENCE_SCORE);
    }

    let texts: Vec<String> = std::iter::once(jd_text.to_string())
        .chain(entries.iter().map(ExperienceEntry::embedding_text))
        .collect();

    let vectors = match model.encode(&texts).await {
        Ok(v) => v,
        Err(e) => {
            warn!("Experience relevance fell back to default: {e}");
            return SubScore::new(DEFAULT_EXPERIENCE_SCORE);
        }
    };

    let (jd, rest) = vectors.split_at(1);
    let best = rest
        .iter()
        .map(|v| cosine_similarity(&jd[0], v))
        .fold(f32::MIN, f32::max);
    SubScore::new(best as f64 * 100.0)
}
