use once_cell::sync::Lazy;
use regex::Regex;

use crate::scoring::SubScore;

pub const DEFAULT_ACHIEVEMENT_SCORE: f64 = 30.0;

const MIN_SEGMENT_CHARS: usize = 15;
const ACTION_VERB_POINTS: f64 = 4.0;
const METRIC_POINTS: f64 = 6.0;

const ACTION_VERBS: &[&str] = &[
    "achieved",
    "accelerated",
    "accomplished",
    "architected",
    "automated",
    "built",
    "created",
    "delivered",
    "designed",
    "developed",
    "engineered",
    "enhanced",
    "executed",
    "generated",
    "implemented",
    "improved",
    "increased",
    "initiated",
    "launched",
    "led",
    "managed",
    "optimized",
    "orchestrated",
    "pioneered",
    "produced",
    "reduced",
    "saved",
    "solved",
    "spearheaded",
    "streamlined",
];

// A bullet marker at the start of a line, or a blank line between paragraphs.
static SEGMENT_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*[*•\-]\s*|\n[ \t]*\n\s*").unwrap());

// Plain numbers, percentages, currency amounts and multipliers like "3x".
static METRIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+%?|\$\d+(?:,\d+)*(?:\.\d+)?%?|\d+(?:\.\d+)?x)\b").unwrap()
});

fn segment_points(segment: &str) -> f64 {
    let mut points = 0.0;
    let first_word = segment
        .split_whitespace()
        .next()
        .map(|w| w.to_lowercase())
        .unwrap_or_default();
    if ACTION_VERBS.contains(&first_word.trim_end_matches(['.', ',', ':', ';'])) {
        points += ACTION_VERB_POINTS;
    }
    if METRIC.is_match(segment) {
        points += METRIC_POINTS;
    }
    points
}

/// Rates how achievement-oriented the resume bullets are.
///
/// Each bullet of at least 15 characters earns points for opening with an
/// action verb and for containing a metric; the average is scaled by 10.
/// Text that does not split into at least two segments, or has no segment
/// long enough, gets the default of 30.
pub fn score_achievements(text: &str) -> SubScore {
    let segments: Vec<&str> = SEGMENT_SPLIT.split(text).collect();
    if segments.len() < 2 {
        return SubScore::new(DEFAULT_ACHIEVEMENT_SCORE);
    }

    let points: Vec<f64> = segments
        .iter()
        .map(|s| s.trim())
        .filter(|s| s.chars().count() >= MIN_SEGMENT_CHARS)
        .map(segment_points)
        .collect();

    if points.is_empty() {
        return SubScore::new(DEFAULT_ACHIEVEMENT_SCORE);
    }

    let average = points.iter().sum::<f64>() / points.len() as f64;
    SubScore::new((average * 10.0).min(100.0))
}
