use std::collections::BTreeMap;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::matching::skills::extract_job_skills;
use crate::models::resume::ResumeData;
use crate::scoring::experience::duration_months;
use crate::scoring::SubScore;

const ROLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "frontend",
        &[
            "frontend", "front-end", "react", "angular", "vue", "javascript", "typescript", "css",
            "html", "ui", "ux",
        ],
    ),
    (
        "backend",
        &[
            "backend", "back-end", "server", "api", "database", "python", "java", "node", "php",
            "ruby", "sql",
        ],
    ),
    (
        "fullstack",
        &["fullstack", "full-stack", "mern", "mean", "mevn", "full stack"],
    ),
    (
        "devops",
        &[
            "devops", "aws", "azure", "gcp", "docker", "kubernetes", "ci/cd", "terraform",
            "infrastructure",
        ],
    ),
    (
        "data",
        &[
            "data", "analysis", "analytics", "machine learning", "ai", "python", "r", "sql",
            "database", "etl",
        ],
    ),
    (
        "mobile",
        &[
            "mobile", "ios", "android", "flutter", "react native", "swift", "kotlin",
        ],
    ),
];

const LEADERSHIP_TERMS: &[&str] = &[
    "lead",
    "manager",
    "director",
    "head of",
    "architect",
    "principal",
    "senior",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeniorityLevel {
    #[serde(rename = "Entry-Level/Junior")]
    EntryLevel,
    #[serde(rename = "Mid-Level")]
    MidLevel,
    #[serde(rename = "Mid-Level/Senior")]
    MidSenior,
    #[serde(rename = "Senior/Principal")]
    SeniorPrincipal,
}

static TERM_CACHE: Lazy<BTreeMap<&'static str, Regex>> = Lazy::new(|| {
    ROLE_KEYWORDS
        .iter()
        .flat_map(|(_, kws)| kws.iter())
        .chain(LEADERSHIP_TERMS)
        .map(|term| (*term, term_regex(term)))
        .collect()
});

fn term_regex(term: &str) -> Regex {
    let escaped = regex::escape(term);
    Regex::new(&format!(r"(?i)(?:^|[^a-z0-9_]){escaped}(?:$|[^a-z0-9_])")).unwrap()
}

/// Whole-word, case-insensitive containment. Terms outside the fixed
/// keyword tables are compiled on demand.
fn mentions(text: &str, term: &str) -> bool {
    match TERM_CACHE.get(term) {
        Some(re) => re.is_match(text),
        None => term_regex(term).is_match(text),
    }
}

/// Share of each role family's keywords present in the resume, 0–100.
pub fn role_suitability(resume: &ResumeData) -> BTreeMap<String, SubScore> {
    ROLE_KEYWORDS
        .iter()
        .map(|(role, keywords)| {
            let found = keywords
                .iter()
                .filter(|kw| mentions(&resume.full_text, kw))
                .count();
            let score = found as f64 / keywords.len() as f64 * 100.0;
            (role.to_string(), SubScore::new(score))
        })
        .collect()
}

/// Share of the job description's recognised skills that the resume
/// mentions. Zero when the job description names none.
pub fn industry_fit(resume: &ResumeData, jd_text: &str) -> SubScore {
    let terms = extract_job_skills(jd_text);
    if terms.is_empty() {
        return SubScore::new(0.0);
    }
    let found = terms
        .iter()
        .filter(|t| mentions(&resume.full_text, t))
        .count();
    SubScore::new(found as f64 / terms.len() as f64 * 100.0)
}

pub fn seniority_level(resume: &ResumeData, today: NaiveDate) -> SeniorityLevel {
    let years: f64 = resume
        .experience
        .iter()
        .map(|e| duration_months(e, today) / 12.0)
        .sum();
    let leadership = LEADERSHIP_TERMS
        .iter()
        .filter(|t| mentions(&resume.full_text, t))
        .count();

    if years >= 8.0 || leadership >= 3 {
        SeniorityLevel::SeniorPrincipal
    } else if years >= 5.0 {
        SeniorityLevel::MidSenior
    } else if years >= 2.0 {
        SeniorityLevel::MidLevel
    } else {
        SeniorityLevel::EntryLevel
    }
}
