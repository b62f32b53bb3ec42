use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::scoring::SubScore;

const ESSENTIAL_SECTIONS: &[&str] = &["experience", "education", "skills"];
const OPTIONAL_SECTIONS: &[&str] = &["summary", "projects", "certifications", "awards"];

const ESSENTIAL_WEIGHT: f64 = 70.0;
const OPTIONAL_WEIGHT: f64 = 30.0;
const TARGET_WORD_COUNT: f64 = 500.0;

static SECTION_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    ESSENTIAL_SECTIONS
        .iter()
        .chain(OPTIONAL_SECTIONS)
        .map(|s| (*s, Regex::new(&format!(r"(?i)\b{s}\b")).unwrap()))
        .collect()
});

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletenessReport {
    pub score: SubScore,
    pub section_score: f64,
    pub length_score: f64,
    pub word_count: usize,
    pub found_sections: Vec<String>,
    pub missing_sections: Vec<String>,
}

fn has_section(text: &str, section: &str) -> bool {
    SECTION_PATTERNS
        .iter()
        .find(|(name, _)| *name == section)
        .is_some_and(|(_, re)| re.is_match(text))
}

/// Section coverage and length of the resume text.
///
/// Final score is `0.7 * section_score + 0.3 * length_score`, where the
/// section score weights essential headings 70 and optional ones 30, and
/// the length score reaches 100 at 500 words.
pub fn completeness_report(text: &str) -> CompletenessReport {
    let mut found_sections = Vec::new();
    let mut missing_sections = Vec::new();
    let mut count_found = |sections: &[&str]| {
        let mut found = 0usize;
        for section in sections {
            if has_section(text, section) {
                found += 1;
                found_sections.push(section.to_string());
            } else {
                missing_sections.push(section.to_string());
            }
        }
        found as f64 / sections.len() as f64
    };

    let essential = count_found(ESSENTIAL_SECTIONS);
    let optional = count_found(OPTIONAL_SECTIONS);
    let section_score = essential * ESSENTIAL_WEIGHT + optional * OPTIONAL_WEIGHT;

    let word_count = text.split_whitespace().count();
    let length_score = (word_count as f64 / TARGET_WORD_COUNT * 100.0).min(100.0);

    CompletenessReport {
        score: SubScore::new(section_score * 0.7 + length_score * 0.3),
        section_score,
        length_score,
        word_count,
        found_sections,
        missing_sections,
    }
}

pub fn score_content_completeness(text: &str) -> SubScore {
    completeness_report(text).score
}
